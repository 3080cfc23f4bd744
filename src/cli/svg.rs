use std::fs;

use anyhow::Result;
use chrono::{Datelike, Utc};

use crate::core::AppConfig;
use crate::heatmap::svg::SvgOptions;
use crate::heatmap::{Mode, aggregate, svg};
use crate::sources::REPORTING_TZ;

pub async fn run(
    github: &str,
    gitlab: &str,
    mode: Mode,
    bg: Option<String>,
    out: Option<String>,
) -> Result<()> {
    let config = AppConfig::default();
    let now = Utc::now().with_timezone(&REPORTING_TZ);

    let table = aggregate(&config, github, gitlab, now.year(), now.month()).await?;
    let image = svg::render(&table, &SvgOptions { mode, background: bg });

    match out {
        Some(path) => fs::write(&path, image)?,
        None => println!("{}", image),
    }

    Ok(())
}
