//! GitHub activity via the search API: commits authored in the window
//! and pull requests opened in the window. Both endpoints cap a page
//! at 100 items, so every fetch walks pages until a short page comes
//! back. A single page used to look complete for busy months; it is
//! not.

use anyhow::{Result, anyhow};
use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures_util::Stream;
use reqwest::Client;
use reqwest::header;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ActivityItem, EventKind, MAX_PAGES, PAGE_SIZE, SourceQuery};

const USER_AGENT: &str = concat!("commitmap/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CommitSearchResponse {
    #[serde(default)]
    items: Vec<CommitSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CommitSearchItem {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    date: String,
}

#[derive(Debug, Deserialize)]
struct IssueSearchResponse {
    #[serde(default)]
    items: Vec<IssueSearchItem>,
}

#[derive(Debug, Deserialize)]
struct IssueSearchItem {
    created_at: String,
}

fn window(query: &SourceQuery) -> String {
    format!(
        "{}..{}",
        query.first.format("%Y-%m-%dT%H:%M:%SZ"),
        query.last.format("%Y-%m-%dT%H:%M:%SZ")
    )
}

fn commit_search_query(query: &SourceQuery) -> String {
    format!("author:{} committer-date:{}", query.username, window(query))
}

fn pr_search_query(query: &SourceQuery) -> String {
    format!("type:pr author:{} created:{}", query.username, window(query))
}

async fn search_page<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    accept: &str,
    token: &str,
) -> Result<T> {
    let res = client
        .get(url)
        .header(header::ACCEPT, accept)
        .header(header::USER_AGENT, USER_AGENT)
        .header(header::AUTHORIZATION, format!("token {token}"))
        .send()
        .await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(anyhow!("GitHub search failed: {} ({})", status, text));
    }
    Ok(serde_json::from_str(&text)?)
}

/// Commits authored by the user within the query window.
pub fn commits<'a>(
    base_url: &'a str,
    token: &'a str,
    query: &'a SourceQuery,
) -> impl Stream<Item = Result<ActivityItem>> + 'a {
    try_stream! {
        let client = Client::new();
        let q = urlencoding::encode(&commit_search_query(query)).into_owned();
        for page in 1..=MAX_PAGES {
            let url = format!(
                "{base_url}/search/commits?q={q}&per_page={PAGE_SIZE}&page={page}"
            );
            // Commit search is still behind the cloak preview media type
            let data: CommitSearchResponse = search_page(
                &client,
                &url,
                "application/vnd.github.cloak-preview",
                token,
            )
            .await?;
            let full_page = data.items.len() >= PAGE_SIZE;
            for item in data.items {
                let occurred_at = item.commit.author.date.parse::<DateTime<Utc>>()?;
                yield ActivityItem {
                    kind: EventKind::Commit,
                    occurred_at,
                };
            }
            if !full_page {
                break;
            }
        }
    }
}

/// Pull requests opened by the user within the query window.
pub fn pull_requests<'a>(
    base_url: &'a str,
    token: &'a str,
    query: &'a SourceQuery,
) -> impl Stream<Item = Result<ActivityItem>> + 'a {
    try_stream! {
        let client = Client::new();
        let q = urlencoding::encode(&pr_search_query(query)).into_owned();
        for page in 1..=MAX_PAGES {
            let url = format!(
                "{base_url}/search/issues?q={q}&per_page={PAGE_SIZE}&page={page}"
            );
            let data: IssueSearchResponse = search_page(
                &client,
                &url,
                "application/vnd.github.v3+json",
                token,
            )
            .await?;
            let full_page = data.items.len() >= PAGE_SIZE;
            for item in data.items {
                let occurred_at = item.created_at.parse::<DateTime<Utc>>()?;
                yield ActivityItem {
                    kind: EventKind::PullRequest,
                    occurred_at,
                };
            }
            if !full_page {
                break;
            }
        }
    }
}
