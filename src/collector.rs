use crate::error::{RepoListError, Result};
use crate::github::{decode, GitHubClient, Session, PER_PAGE};
use crate::models::Repository;
use crate::pagination;
use crate::types::RawRepository;
use futures::stream::{self, FuturesUnordered, Stream, TryStreamExt};
use reqwest::header::LINK;
use reqwest::Response;
use std::pin::Pin;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Repositories in the order their pages arrive.
pub type RepositoryStream = Pin<Box<dyn Stream<Item = Result<Repository>> + Send>>;

type RepositorySender = mpsc::Sender<Result<Repository>>;

const CHANNEL_CAPACITY: usize = PER_PAGE as usize;

impl GitHubClient {
    /// Stream every repository owned by `username`.
    ///
    /// Page 1 is fetched first; its `Link` header decides how many more pages
    /// exist, and those are all requested at once. Records are yielded as each
    /// page decodes, so pages 2..N interleave in completion order. The first
    /// failure is yielded as the final item. Dropping the stream stops the
    /// producer and cancels any requests still in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn list_repositories(&self, username: &str) -> RepositoryStream {
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        let client = self.clone();
        let username = username.to_string();

        tokio::spawn(async move {
            if let Err(e) = collect_pages(&client, &username, &tx).await {
                debug!(username = %username, error = %e, "Repository collection aborted");
                let _ = tx.send(Err(e)).await;
            }
        });

        Box::pin(stream::poll_fn(move |cx| rx.poll_recv(cx)))
    }

    /// Buffer the whole repository listing.
    pub async fn collect_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.list_repositories(username).try_collect().await
    }
}

async fn collect_pages(
    client: &GitHubClient,
    username: &str,
    tx: &RepositorySender,
) -> Result<()> {
    if matches!(username, "" | "." | "..") {
        return Err(RepoListError::InvalidUser(format!("Invalid username: {:?}", username)));
    }

    let session = client.session()?;
    let url = client.user_repos_url(username);

    let first = fetch_page(&session, &url, 1).await?;
    let link = match first.headers().get(LINK) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|e| RepoListError::MalformedPagination(e.to_string()))?
                .to_string(),
        ),
        None => None,
    };

    let repos: Vec<RawRepository> = decode(first).await?;
    debug!(username = %username, page = 1, count = repos.len(), "Fetched repository page");
    if !forward(tx, repos).await {
        return Ok(());
    }

    let Some(link) = link else {
        debug!(username = %username, "No pagination header, single page");
        return Ok(());
    };

    let last_page = pagination::last_page(&link)?;
    info!(username = %username, last_page, "Fetching remaining repository pages");

    let mut pending = (2..=last_page)
        .map(|page| fetch_repos(&session, &url, page))
        .collect::<FuturesUnordered<_>>();

    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                debug!(username = %username, "Consumer dropped, cancelling page fetches");
                return Ok(());
            }
            next = pending.try_next() => next?,
        };

        let Some((page, repos)) = next else {
            return Ok(());
        };

        debug!(username = %username, page, count = repos.len(), "Fetched repository page");
        if !forward(tx, repos).await {
            return Ok(());
        }
    }
}

async fn fetch_page(session: &Session, url: &str, page: u32) -> Result<Response> {
    let per_page = PER_PAGE.to_string();
    let page = page.to_string();
    session
        .fetch(url, &[("per_page", per_page.as_str()), ("page", page.as_str())])
        .await
}

async fn fetch_repos(
    session: &Session,
    url: &str,
    page: u32,
) -> Result<(u32, Vec<RawRepository>)> {
    let response = fetch_page(session, url, page).await?;
    let repos = decode(response).await?;
    Ok((page, repos))
}

/// Push a page of records to the consumer. Returns false once the consumer
/// has gone away.
async fn forward(tx: &RepositorySender, repos: Vec<RawRepository>) -> bool {
    for repo in repos {
        if tx.send(Ok(Repository::from(repo))).await.is_err() {
            return false;
        }
    }
    true
}
