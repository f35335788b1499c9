// GitHub API endpoint functions and outbound deep links.
// Builds request URLs with encoded query strings and decodes the listings into typed items.

use serde::Deserialize;
use tracing::error;
use url::Url;

use crate::error::Result;

use super::client::{CachePolicy, GitHubClient};
use super::types::{Issue, Release};

impl GitHubClient {
    /// URL of the releases listing for a repository.
    pub fn releases_url(&self, owner: &str, repo: &str, per_page: usize) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/repos/{}/{}/releases",
            self.api_base(),
            owner,
            repo
        ))?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }

    /// URL of the open issues listing, optionally restricted to one label.
    pub fn issues_url(&self, owner: &str, repo: &str, label: &str) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/repos/{}/{}/issues",
            self.api_base(),
            owner,
            repo
        ))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("state", "open");
            query.append_pair("per_page", "100");
            let label = label.trim();
            if !label.is_empty() {
                query.append_pair("labels", label);
            }
        }
        Ok(url)
    }

    /// Latest releases, newest first as returned by the API.
    pub async fn get_releases(
        &self,
        owner: &str,
        repo: &str,
        per_page: usize,
    ) -> Option<Vec<Release>> {
        let url = self.log_err(self.releases_url(owner, repo, per_page))?;
        self.get_list(url.as_str()).await
    }

    /// Open issues carrying `label` (pull requests included, callers filter them).
    pub async fn get_labeled_issues(
        &self,
        owner: &str,
        repo: &str,
        label: &str,
    ) -> Option<Vec<Issue>> {
        let url = self.log_err(self.issues_url(owner, repo, label))?;
        self.get_list(url.as_str()).await
    }

    async fn get_list<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Option<Vec<T>> {
        let value = self.fetch_json(url, CachePolicy::Use).await?;
        if !value.is_array() {
            error!(url, "expected a JSON array");
            return None;
        }
        match Vec::<T>::deserialize(value.as_ref()) {
            Ok(items) => Some(items),
            Err(e) => {
                error!(url, error = %e, "unexpected response shape");
                None
            }
        }
    }

    fn log_err<T>(&self, result: Result<T>) -> Option<T> {
        result
            .map_err(|e| error!(error = %e, "could not build request URL"))
            .ok()
    }
}

/// Issue list page of a repository, without any prefilled query.
pub fn open_issues_url(repo_url: &str) -> String {
    format!("{}/issues", repo_url.trim_end_matches('/'))
}

/// New-issue form with a blank title and the given body prompt.
pub fn submit_fix_url(repo_url: &str, body: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/issues/new", repo_url.trim_end_matches('/')))?;
    url.query_pairs_mut()
        .append_pair("title", "")
        .append_pair("body", body);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::cache::ManualClock;
    use crate::testutil::StubTransport;

    const ISSUES: &str =
        "https://api.github.com/repos/AlgesGT/revolutionmacroguide/issues?state=open&per_page=100&labels=approved";

    fn client(stub: Arc<StubTransport>) -> GitHubClient {
        GitHubClient::new(
            stub,
            "https://api.github.com",
            Duration::from_secs(300),
            Arc::new(ManualClock::default()),
        )
    }

    #[test]
    fn test_request_urls() {
        let client = client(Arc::new(StubTransport::new()));
        assert_eq!(
            client
                .releases_url("nosyliam", "revolution-macro", 15)
                .unwrap()
                .as_str(),
            "https://api.github.com/repos/nosyliam/revolution-macro/releases?per_page=15"
        );
        assert_eq!(
            client
                .issues_url("AlgesGT", "revolutionmacroguide", "approved")
                .unwrap()
                .as_str(),
            ISSUES
        );
        assert_eq!(
            client.issues_url("o", "r", "  ").unwrap().as_str(),
            "https://api.github.com/repos/o/r/issues?state=open&per_page=100"
        );
    }

    #[test]
    fn test_deep_links() {
        let repo = "https://github.com/AlgesGT/revolutionmacroguide";
        assert_eq!(
            open_issues_url(repo),
            "https://github.com/AlgesGT/revolutionmacroguide/issues"
        );
        assert_eq!(
            submit_fix_url(repo, "Explain clearly how you solved the issue")
                .unwrap()
                .as_str(),
            "https://github.com/AlgesGT/revolutionmacroguide/issues/new?title=&body=Explain+clearly+how+you+solved+the+issue"
        );
    }

    #[tokio::test]
    async fn test_get_labeled_issues() {
        let stub = Arc::new(StubTransport::new().with(
            ISSUES,
            r#"[{"id": 9, "number": 3, "title": "t", "body": "b",
                 "html_url": "https://github.com/x/3", "labels": []}]"#,
        ));
        let issues = client(stub)
            .get_labeled_issues("AlgesGT", "revolutionmacroguide", "approved")
            .await
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].number, 3);
    }

    #[tokio::test]
    async fn test_non_array_response_is_none() {
        let stub = Arc::new(StubTransport::new().with(ISSUES, r#"{"message": "Bad credentials"}"#));
        assert!(client(stub)
            .get_labeled_issues("AlgesGT", "revolutionmacroguide", "approved")
            .await
            .is_none());
    }
}
