use anyhow::Result;
use chrono::{Datelike, Utc};

use crate::core::AppConfig;
use crate::heatmap::aggregate;
use crate::sources::REPORTING_TZ;

pub async fn run(github: &str, gitlab: &str, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let config = AppConfig::default();
    let now = Utc::now().with_timezone(&REPORTING_TZ);
    let year = year.unwrap_or_else(|| now.year());
    let month = month.unwrap_or_else(|| now.month());

    let table = aggregate(&config, github, gitlab, year, month).await?;
    println!("{}", serde_json::to_string_pretty(&table)?);

    Ok(())
}
