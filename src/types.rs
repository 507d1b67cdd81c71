use serde::Deserialize;
use std::collections::HashMap;

// GitHub API response structures
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub id: u64,
    pub full_name: String,
    pub stargazers_count: u64,
}

/// Body of `/repos/{owner}/{repo}/languages`: language name to bytes of code.
pub type LanguageBytes = HashMap<String, u64>;
