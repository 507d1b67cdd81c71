use crate::error::Result;
use crate::github::{decode, GitHubClient, Session};
use crate::models::{LanguageTally, RankedLanguage, Repository};
use crate::types::LanguageBytes;
use futures::stream::{FuturesUnordered, TryStreamExt};
use tracing::{debug, info};

impl GitHubClient {
    /// Sum of stargazers over every repository of `username`.
    pub async fn total_stars(&self, username: &str) -> Result<u64> {
        let total = self
            .list_repositories(username)
            .try_fold(0u64, |total, repo| async move { Ok(total + repo.star_count) })
            .await?;

        info!(username = %username, total, "Computed star total");
        Ok(total)
    }

    /// Bytes of code per language across all repositories of `username`,
    /// largest first.
    ///
    /// Needs the full repository list before the per-repository requests can
    /// start. Any failed request fails the whole ranking.
    pub async fn language_ranking(&self, username: &str) -> Result<Vec<RankedLanguage>> {
        let repos = self.collect_repositories(username).await?;

        let session = self.session()?;
        let mut pending = repos
            .iter()
            .map(|repo| self.fetch_languages(&session, repo))
            .collect::<FuturesUnordered<_>>();

        let mut tally = LanguageTally::new();
        while let Some(languages) = pending.try_next().await? {
            tally.merge(languages);
        }

        info!(
            username = %username,
            repos = repos.len(),
            languages = tally.len(),
            "Computed language ranking"
        );
        Ok(tally.into_ranked())
    }

    async fn fetch_languages(&self, session: &Session, repo: &Repository) -> Result<LanguageBytes> {
        let response = session.fetch(&self.languages_url(&repo.name), &[]).await?;
        let languages: LanguageBytes = decode(response).await?;
        debug!(repo = %repo.name, count = languages.len(), "Fetched repository languages");
        Ok(languages)
    }
}
