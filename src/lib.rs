pub mod aggregate;
pub mod cli;
pub mod collector;
pub mod error;
pub mod github;
pub mod models;
pub mod pagination;
pub mod server;
pub mod types;

pub use collector::RepositoryStream;
pub use error::{RepoListError, Result};
pub use github::{GitHubClient, GitHubConfig};
pub use models::{LanguageTally, RankedLanguage, Repository};
