#![allow(dead_code)]

use repolist_server::github::{GitHubClient, GitHubConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "test_user";

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(GitHubConfig {
        api_url: server.uri(),
        token: Some("test_token".to_string()),
        user_agent: Some("test_agent".to_string()),
        timeout: Duration::from_secs(10),
    })
    .expect("Failed to create client")
}

/// Raw upstream objects for repo ids in `range`, with a few extra fields
/// like the real API returns.
pub fn raw_repos(range: std::ops::Range<u64>) -> Value {
    Value::Array(
        range
            .map(|i| {
                json!({
                    "id": i,
                    "full_name": format!("{}/repo{}", USERNAME, i),
                    "stargazers_count": i,
                    "private": false,
                    "html_url": format!("https://github.com/{}/repo{}", USERNAME, i),
                })
            })
            .collect(),
    )
}

pub fn link_header(server: &MockServer, last_page: u32) -> String {
    format!(
        "<{uri}/users/{user}/repos?per_page=100&page=2>; rel=\"next\", <{uri}/users/{user}/repos?per_page=100&page={last}>; rel=\"last\"",
        uri = server.uri(),
        user = USERNAME,
        last = last_page,
    )
}

/// Mount one page of the repository listing, expected to be requested once.
pub async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    mount_page_times(server, page, response, 1).await;
}

pub async fn mount_page_times(server: &MockServer, page: u32, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", USERNAME)))
        .and(query_param("per_page", "100"))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Mount `pages` as the full listing; page 1 advertises the last page when
/// there is more than one.
pub async fn mount_listing(server: &MockServer, pages: &[std::ops::Range<u64>]) {
    mount_listing_times(server, pages, 1).await;
}

pub async fn mount_listing_times(server: &MockServer, pages: &[std::ops::Range<u64>], times: u64) {
    let last_page = pages.len() as u32;
    for (index, range) in pages.iter().enumerate() {
        let page = index as u32 + 1;
        let mut response = ResponseTemplate::new(200).set_body_json(raw_repos(range.clone()));
        if page == 1 && last_page > 1 {
            response = response.insert_header("Link", link_header(server, last_page).as_str());
        }
        mount_page_times(server, page, response, times).await;
    }
}

pub async fn mount_languages(server: &MockServer, repo: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/languages", USERNAME, repo)))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}
