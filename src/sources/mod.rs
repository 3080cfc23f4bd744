//! Activity sources. Each platform exposes its activity as a lazy,
//! finite stream of [`ActivityItem`] that follows pagination to
//! completion. Streams are restartable by calling the constructor
//! again; nothing is cached between requests.

pub mod github;
pub mod gitlab;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use futures_util::{Stream, TryStreamExt};

/// Timezone used to bucket activity timestamps into calendar days.
/// Fixed so the same inputs aggregate identically no matter where the
/// aggregation runs.
pub const REPORTING_TZ: Tz = chrono_tz::Europe::Prague;

/// Items per page requested from both platforms.
pub const PAGE_SIZE: usize = 100;

/// Hard ceiling on pages fetched per source to bound worst-case
/// latency when an upstream keeps advertising more pages.
pub const MAX_PAGES: u32 = 10;

/// One in-scope activity record from a platform. Only the timestamp
/// survives into aggregation; the kind is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityItem {
    pub kind: EventKind,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Commit,
    PullRequest,
    PlatformEvent,
}

/// Scopes one aggregation request to a single platform: the username
/// plus the UTC instants bounding the target month in the reporting
/// timezone.
#[derive(Debug, Clone)]
pub struct SourceQuery {
    pub username: String,
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
}

impl SourceQuery {
    /// Build the query window for one calendar month. Fails only on an
    /// invalid year/month, which is a caller contract violation.
    pub fn for_month(username: &str, year: i32, month: u32) -> Result<Self> {
        let first = REPORTING_TZ
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .earliest()
            .with_context(|| format!("invalid year/month: {year}-{month}"))?;
        let last_day = last_day_of_month(year, month)
            .with_context(|| format!("invalid year/month: {year}-{month}"))?;
        let last = REPORTING_TZ
            .with_ymd_and_hms(year, month, last_day, 23, 59, 59)
            .earliest()
            .with_context(|| format!("invalid year/month: {year}-{month}"))?;

        Ok(Self {
            username: username.to_string(),
            first: first.with_timezone(&Utc),
            last: last.with_timezone(&Utc),
        })
    }

    /// A source with no username is skipped, not an error.
    pub fn is_enabled(&self) -> bool {
        !self.username.is_empty()
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first = chrono::NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .count() as u32,
    )
}

/// Drain a source stream into a vec, normalizing any failure to an
/// empty contribution. A broken source never aborts aggregation of
/// the others.
pub async fn collect_source<S>(name: &str, stream: S) -> Vec<ActivityItem>
where
    S: Stream<Item = Result<ActivityItem>>,
{
    match stream.try_collect::<Vec<_>>().await {
        Ok(items) => {
            tracing::debug!("Fetched {} items from {}", items.len(), name);
            items
        }
        Err(err) => {
            tracing::error!("Error fetching {}: {:#}", name, err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_stream::try_stream;

    #[test]
    fn test_month_window_bounds() {
        let query = SourceQuery::for_month("octocat", 2025, 6).unwrap();
        // Prague is UTC+2 in June, so local midnight is 22:00 UTC the
        // previous day.
        assert_eq!(query.first.to_rfc3339(), "2025-05-31T22:00:00+00:00");
        assert_eq!(query.last.to_rfc3339(), "2025-06-30T21:59:59+00:00");
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(SourceQuery::for_month("octocat", 2025, 13).is_err());
        assert!(SourceQuery::for_month("octocat", 2025, 0).is_err());
    }

    #[test]
    fn test_empty_username_disables_source() {
        let query = SourceQuery::for_month("", 2025, 6).unwrap();
        assert!(!query.is_enabled());
    }

    #[tokio::test]
    async fn test_collect_source_normalizes_failure_to_empty() {
        let stream = try_stream! {
            yield ActivityItem {
                kind: EventKind::Commit,
                occurred_at: Utc::now(),
            };
            Err(anyhow::anyhow!("boom"))?;
        };
        let items = collect_source("broken source", stream).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_collect_source_passes_items_through() {
        let now = Utc::now();
        let stream = try_stream! {
            for _ in 0..3 {
                yield ActivityItem {
                    kind: EventKind::PlatformEvent,
                    occurred_at: now,
                };
            }
        };
        let items = collect_source("ok source", stream).await;
        assert_eq!(items.len(), 3);
    }
}
