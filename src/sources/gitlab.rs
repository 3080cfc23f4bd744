//! GitLab activity via the user events API. The username is resolved
//! to a user id first; an unknown username contributes zero items.
//! Event pages are followed through the `x-next-page` response header
//! until the upstream stops advertising one.

use anyhow::{Result, anyhow};
use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures_util::Stream;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use super::{ActivityItem, EventKind, MAX_PAGES, PAGE_SIZE, SourceQuery};

#[derive(Debug, Deserialize)]
struct GitLabUser {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct GitLabEvent {
    created_at: String,
}

/// Page number advertised by GitLab for the next page, if any. The
/// header is present but empty on the last page.
fn next_page(headers: &HeaderMap) -> Option<u32> {
    headers
        .get("x-next-page")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Platform events for the user within the query window.
pub fn events<'a>(
    base_url: &'a str,
    token: &'a str,
    query: &'a SourceQuery,
) -> impl Stream<Item = Result<ActivityItem>> + 'a {
    try_stream! {
        let client = Client::new();

        let user_url = format!(
            "{base_url}/users?username={}",
            urlencoding::encode(&query.username)
        );
        let res = client
            .get(&user_url)
            .header("Private-Token", token)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            Err(anyhow!("GitLab user lookup failed: {} ({})", status, text))?;
        }
        let users: Vec<GitLabUser> = serde_json::from_str(&text)?;
        if users.is_empty() {
            tracing::warn!("No GitLab user found for username {}", query.username);
        }

        if let Some(user) = users.first() {
            // The events API filters by date, exclusive on both ends
            let after = query.first.date_naive().pred_opt().unwrap_or(query.first.date_naive());
            let before = query.last.date_naive().succ_opt().unwrap_or(query.last.date_naive());

            let mut page = 1u32;
            let mut pages_fetched = 0u32;
            loop {
                let url = format!(
                    "{base_url}/users/{}/events?per_page={PAGE_SIZE}&page={page}&after={after}&before={before}",
                    user.id
                );
                let res = client
                    .get(&url)
                    .header("Private-Token", token)
                    .send()
                    .await?;
                let status = res.status();
                let next = next_page(res.headers());
                let text = res.text().await.unwrap_or_default();
                if !status.is_success() {
                    Err(anyhow!("GitLab events fetch failed: {} ({})", status, text))?;
                }
                let events: Vec<GitLabEvent> = serde_json::from_str(&text)?;
                for event in events {
                    let occurred_at = event.created_at.parse::<DateTime<Utc>>()?;
                    yield ActivityItem {
                        kind: EventKind::PlatformEvent,
                        occurred_at,
                    };
                }

                pages_fetched += 1;
                match next {
                    Some(n) if pages_fetched < MAX_PAGES => page = n,
                    _ => break,
                }
            }
        }
    }
}
