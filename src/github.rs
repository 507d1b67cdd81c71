use crate::error::{RepoListError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::iter;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const PER_PAGE: u32 = 100;
const DEFAULT_USER_AGENT: &str = "Repolist Server/0.1.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings the client is built from, usually taken from the command line.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub user_agent: Option<String>,
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Entry point to the GitHub API.
///
/// Holds only the immutable request settings. Connections belong to a
/// [`Session`], which every logical operation opens for itself.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    base: Url,
    headers: HeaderMap,
    timeout: Duration,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let base = Url::parse(&config.api_url)?;
        if base.cannot_be_a_base() {
            return Err(RepoListError::ConfigError(format!(
                "API URL cannot carry a path: {}",
                config.api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|e| RepoListError::ConfigError(format!("Invalid token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let value = HeaderValue::from_str(user_agent)
            .map_err(|e| RepoListError::ConfigError(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, value);

        Ok(GitHubClient {
            base,
            headers,
            timeout: config.timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Open a connection pool for one operation. Dropping the session
    /// closes its connections.
    pub fn session(&self) -> Result<Session> {
        let client = Client::builder()
            .default_headers(self.headers.clone())
            .timeout(self.timeout)
            .build()?;

        Ok(Session { client })
    }

    /// `{base}/users/{username}/repos`, with `username` escaped as a single
    /// path segment.
    pub fn user_repos_url(&self, username: &str) -> String {
        self.endpoint(["users", username, "repos"])
    }

    /// `{base}/repos/{owner}/{repo}/languages`
    pub fn languages_url(&self, full_name: &str) -> String {
        self.endpoint(
            iter::once("repos")
                .chain(full_name.split('/'))
                .chain(iter::once("languages")),
        )
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> String {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }
}

/// Connection pool shared by the concurrent requests of one operation.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    /// Issue a GET and classify the status.
    ///
    /// 404 is an unknown user and 403 an exhausted quota. Any other status
    /// outside 2xx is a transport failure.
    pub async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        debug!(url = %url, ?query, status = %status, "GitHub request completed");

        match status {
            StatusCode::NOT_FOUND => {
                warn!(url = %url, "GitHub reported resource not found");
                Err(RepoListError::InvalidUser(format!("Resource not found: {}", url)))
            }
            StatusCode::FORBIDDEN => {
                let reset = response
                    .headers()
                    .get("X-RateLimit-Reset")
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_string);

                warn!(url = %url, reset = ?reset, "GitHub request quota exceeded");

                Err(RepoListError::QuotaExceeded(match reset {
                    Some(reset) => format!("{} (quota resets at {})", url, reset),
                    None => url.to_string(),
                }))
            }
            status if status.is_success() => Ok(response),
            status => Err(RepoListError::Transport {
                status,
                url: url.to_string(),
            }),
        }
    }
}

/// Read the whole body and decode it as JSON.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
