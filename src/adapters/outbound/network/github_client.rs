use crate::component_history::domain::{AccessToken, Repository, RevisionRef};
use crate::ports::outbound::{ContentFetcher, HistoryWalker};
use crate::shared::error::HistoryError;
use crate::shared::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// GitHubClient adapter for the GitHub REST API
///
/// Implements both the HistoryWalker port (`GET /repos/{owner}/{repo}/commits`)
/// and the ContentFetcher port (`GET /repos/{owner}/{repo}/contents/{path}`).
///
/// # Behavior
/// - One page of commits only; no pagination
/// - Failed requests are not retried
/// - The token is sent as `Authorization: token <token>`
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    repository: Repository,
}

impl GitHubClient {
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

    /// Creates a client for `repository` against the public GitHub API
    pub fn new(repository: Repository) -> Result<Self> {
        Self::with_options(
            repository,
            Self::DEFAULT_API_URL,
            Duration::from_secs(Self::DEFAULT_TIMEOUT_SECONDS),
        )
    }

    /// Creates a client with an explicit API base URL and request timeout
    pub fn with_options(repository: Repository, api_url: &str, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("component-history/{}", version);

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repository,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    fn commits_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits?path={}",
            self.api_url,
            urlencoding::encode(self.repository.owner()),
            urlencoding::encode(self.repository.name()),
            urlencoding::encode(path)
        )
    }

    fn contents_url(&self, path: &str, revision: &RevisionRef) -> String {
        let encoded_path = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_url,
            urlencoding::encode(self.repository.owner()),
            urlencoding::encode(self.repository.name()),
            encoded_path,
            urlencoding::encode(revision.as_str())
        )
    }

    /// Sends an authenticated GET and deserializes a successful JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &AccessToken) -> Result<T> {
        let authorization = HeaderValue::from_str(&format!("token {}", token.expose()))
            .map_err(|_| HistoryError::Validation {
                message: "Token contains characters that are not allowed in an HTTP header"
                    .to_string(),
            })?;

        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| HistoryError::Transport {
                endpoint: url.to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| HistoryError::Transport {
            endpoint: url.to_string(),
            details: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(HistoryError::ApiStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
                message: api_error_message(&body),
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            HistoryError::Transport {
                endpoint: url.to_string(),
                details: format!("Malformed JSON response: {}", e),
            }
            .into()
        })
    }
}

/// Extracts GitHub's `message` field from an error body, falling back to
/// the raw body
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(error) => error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().chars().take(200).collect(),
    }
}

/// Decodes the base64 `content` field of a contents response
///
/// GitHub wraps the encoded content at 60 columns, so whitespace is
/// removed before decoding.
fn decode_content(response: ContentsResponse, revision: &RevisionRef) -> Result<String> {
    let decode_error = |details: String| HistoryError::Decode {
        revision: revision.to_string(),
        details,
    };

    if let Some(encoding) = response.encoding.as_deref() {
        if encoding != "base64" {
            return Err(decode_error(format!("unsupported content encoding '{}'", encoding)).into());
        }
    }

    let encoded = response
        .content
        .ok_or_else(|| decode_error("response has no content field".to_string()))?;
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| decode_error(format!("invalid base64: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| decode_error(format!("content is not valid UTF-8: {}", e)).into())
}

#[async_trait]
impl HistoryWalker for GitHubClient {
    async fn list_revisions(&self, path: &str, token: &AccessToken) -> Result<Vec<RevisionRef>> {
        let url = self.commits_url(path);
        let commits: Vec<CommitEntry> = self.get_json(&url, token).await?;
        log::info!("{} commit(s) touch {}", commits.len(), path);
        Ok(commits
            .into_iter()
            .map(|commit| RevisionRef::new(commit.sha))
            .collect())
    }
}

#[async_trait]
impl ContentFetcher for GitHubClient {
    async fn fetch_content(
        &self,
        path: &str,
        revision: &RevisionRef,
        token: &AccessToken,
    ) -> Result<String> {
        let url = self.contents_url(path, revision);
        let response: ContentsResponse = self.get_json(&url, token).await?;
        decode_content(response, revision)
    }
}
