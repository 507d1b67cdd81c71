use crate::error::{RepoListError, Result};
use crate::github::{GitHubConfig, DEFAULT_API_URL};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "repolist-server")]
#[command(about = "Repolist Server - Star totals and language rankings for GitHub users")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub API token, sent as `Authorization: token <T>`
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// User agent for GitHub requests
    #[arg(long, env = "GITHUB_USER")]
    pub github_user: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "GITHUB_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,
}

impl Cli {
    pub fn github_config(&self) -> Result<GitHubConfig> {
        if self.request_timeout == 0 {
            return Err(RepoListError::ConfigError(
                "request timeout must be at least one second".to_string(),
            ));
        }

        Ok(GitHubConfig {
            api_url: self.api_url.clone(),
            token: self.github_token.clone().filter(|t| !t.is_empty()),
            user_agent: self.github_user.clone().filter(|u| !u.is_empty()),
            timeout: Duration::from_secs(self.request_timeout),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
