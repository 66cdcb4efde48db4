use crate::component_history::domain::AccessToken;

/// RunRequest - parameters of one pipeline run
///
/// `app_version` and `os_flavor` fill the `{version}` and `{flavor}`
/// placeholders of the configured path template.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub token: AccessToken,
    pub app_version: String,
    pub os_flavor: String,
}

impl RunRequest {
    pub const DEFAULT_APP_VERSION: &'static str = "4.1";
    pub const DEFAULT_OS_FLAVOR: &'static str = "debian-12";

    pub fn new(
        token: AccessToken,
        app_version: impl Into<String>,
        os_flavor: impl Into<String>,
    ) -> Self {
        Self {
            token,
            app_version: app_version.into(),
            os_flavor: os_flavor.into(),
        }
    }

    /// Request for the default version/flavor pair
    pub fn with_defaults(token: AccessToken) -> Self {
        Self::new(token, Self::DEFAULT_APP_VERSION, Self::DEFAULT_OS_FLAVOR)
    }
}
