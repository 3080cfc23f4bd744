//! Folds activity items from every enabled source into one per-day
//! count table for the target month. Sources are fetched concurrently
//! and merged fold-then-merge, so completion order never changes the
//! result. A failed source contributes zero; the table is always
//! returned.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Serialize, Serializer};

use crate::core::AppConfig;
use crate::sources::{
    ActivityItem, REPORTING_TZ, SourceQuery, collect_source, github, gitlab,
};

use super::layout::CalendarGrid;

/// Calendar day an activity timestamp belongs to, in the reporting
/// timezone.
pub fn day_key(occurred_at: DateTime<Utc>) -> NaiveDate {
    occurred_at.with_timezone(&REPORTING_TZ).date_naive()
}

/// Per-day event counts for one month. Holds exactly one entry per
/// day of the month, zero-initialized; folding only ever increments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountTable {
    first_day: NaiveDate,
    counts: BTreeMap<NaiveDate, u32>,
}

impl DayCountTable {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("invalid year/month: {year}-{month}"))?;
        let counts = first_day
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|d| (d, 0))
            .collect();

        Ok(Self { first_day, counts })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn grid(&self) -> CalendarGrid {
        CalendarGrid::from_first_day(self.first_day)
    }

    pub fn get(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.counts.iter().map(|(date, count)| (*date, *count))
    }

    /// Count one event on the given day. Days outside the month are
    /// discarded; a source window is allowed to leak neighbors.
    pub fn record(&mut self, date: NaiveDate) -> bool {
        match self.counts.get_mut(&date) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    /// Fold a batch of items into the table, one count per item.
    pub fn fold(&mut self, items: impl IntoIterator<Item = ActivityItem>) {
        let mut discarded = 0u32;
        for item in items {
            if !self.record(day_key(item.occurred_at)) {
                discarded += 1;
            }
        }
        if discarded > 0 {
            tracing::debug!("Discarded {} items outside the target month", discarded);
        }
    }
}

/// Serializes as a JSON object keyed `YYYY-MM-DD`.
impl Serialize for DayCountTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}

/// Aggregate one month of activity for the given usernames across
/// both platforms. Sources with an empty username or no configured
/// credential are skipped; sources that fail contribute zero. The
/// only error is an invalid year/month.
pub async fn aggregate(
    config: &AppConfig,
    github_username: &str,
    gitlab_username: &str,
    year: i32,
    month: u32,
) -> Result<DayCountTable> {
    let mut table = DayCountTable::new(year, month)?;
    let github_query = SourceQuery::for_month(github_username, year, month)?;
    let gitlab_query = SourceQuery::for_month(gitlab_username, year, month)?;

    let (commits, pull_requests, events) = tokio::join!(
        async {
            match &config.github_token {
                Some(token) if github_query.is_enabled() => {
                    collect_source(
                        "github commits",
                        github::commits(&config.github_api_url, token, &github_query),
                    )
                    .await
                }
                _ => Vec::new(),
            }
        },
        async {
            match &config.github_token {
                Some(token) if github_query.is_enabled() => {
                    collect_source(
                        "github pull requests",
                        github::pull_requests(&config.github_api_url, token, &github_query),
                    )
                    .await
                }
                _ => Vec::new(),
            }
        },
        async {
            match &config.gitlab_token {
                Some(token) if gitlab_query.is_enabled() => {
                    collect_source(
                        "gitlab events",
                        gitlab::events(&config.gitlab_api_url, token, &gitlab_query),
                    )
                    .await
                }
                _ => Vec::new(),
            }
        },
    );

    table.fold(commits);
    table.fold(pull_requests);
    table.fold(events);

    Ok(table)
}
