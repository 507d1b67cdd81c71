use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoListError {
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("User quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Malformed pagination header: {0}")]
    MalformedPagination(String),

    #[error("Request to {url} failed with status {status}")]
    Transport { status: StatusCode, url: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RepoListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let error = RepoListError::Transport {
            status: StatusCode::BAD_GATEWAY,
            url: "http://localhost/users/a/repos".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Request to http://localhost/users/a/repos failed with status 502 Bad Gateway"
        );
    }
}
