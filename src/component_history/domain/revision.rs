use crate::shared::error::HistoryError;
use crate::shared::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Maximum length of a single path parameter (security limit)
const MAX_PATH_PARAMETER_LENGTH: usize = 100;

/// Identifier of one historical state of the tracked file (a commit SHA)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RevisionRef(String);

impl RevisionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for progress output
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for RevisionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Repository coordinates in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    owner: String,
    name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        for (part, label) in [(&owner, "owner"), (&name, "name")] {
            if part.is_empty() || part.contains('/') || part.contains("..") {
                return Err(HistoryError::Validation {
                    message: format!("Invalid repository {}: '{}'", label, part),
                }
                .into());
            }
        }
        Ok(Self { owner, name })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Repository {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => Err(HistoryError::Validation {
                message: format!(
                    "Invalid repository '{}'. Expected the form 'owner/name'",
                    s
                ),
            }
            .into()),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Path of the tracked file, parameterized by an application version and an
/// OS flavor, e.g. `bitnami/moodle/{version}/{flavor}/Dockerfile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate(String);

impl PathTemplate {
    pub const VERSION_PLACEHOLDER: &'static str = "{version}";
    pub const FLAVOR_PLACEHOLDER: &'static str = "{flavor}";

    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Renders the concrete file path for one version/flavor pair
    ///
    /// # Errors
    /// Rejects empty parameters and parameters that could escape the
    /// intended directory (path separators, `..`).
    pub fn render(&self, version: &str, flavor: &str) -> Result<String> {
        Self::validate_parameter(version, "Application version")?;
        Self::validate_parameter(flavor, "OS flavor")?;
        Ok(self
            .0
            .replace(Self::VERSION_PLACEHOLDER, version)
            .replace(Self::FLAVOR_PLACEHOLDER, flavor))
    }

    fn validate_parameter(value: &str, label: &str) -> Result<()> {
        let message = if value.trim().is_empty() {
            format!("{} must not be empty", label)
        } else if value.len() > MAX_PATH_PARAMETER_LENGTH {
            format!(
                "{} is too long ({} bytes). Maximum allowed: {} bytes",
                label,
                value.len(),
                MAX_PATH_PARAMETER_LENGTH
            )
        } else if value.contains('/') || value.contains('\\') || value.contains("..") {
            format!("{} contains path separators which are not allowed", label)
        } else if value.contains('#') || value.contains('?') {
            format!("{} contains URL-unsafe characters", label)
        } else {
            return Ok(());
        };
        Err(HistoryError::Validation { message }.into())
    }
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self::new("bitnami/moodle/{version}/{flavor}/Dockerfile")
    }
}

/// API token; never printed in full
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
