use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod fetch;
pub mod serve;
pub mod svg;

use crate::heatmap::Mode;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Aggregate a month of activity and print the day-count table
    Fetch {
        /// GitHub username (empty skips GitHub)
        #[arg(long, default_value = "")]
        github: String,
        /// GitLab username (empty skips GitLab)
        #[arg(long, default_value = "")]
        gitlab: String,
        /// Target year, defaults to the current month
        #[arg(long)]
        year: Option<i32>,
        /// Target month (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,
    },
    /// Render the current month as a static SVG image
    Svg {
        /// GitHub username (empty skips GitHub)
        #[arg(long, default_value = "")]
        github: String,
        /// GitLab username (empty skips GitLab)
        #[arg(long, default_value = "")]
        gitlab: String,
        /// Display mode
        #[arg(long, value_enum, default_value = "light")]
        mode: ModeArg,
        /// Background color override
        #[arg(long)]
        bg: Option<String>,
        /// Output file, defaults to stdout
        #[arg(long)]
        out: Option<String>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    Light,
    Dark,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Light => Mode::Light,
            ModeArg::Dark => Mode::Dark,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await;
        }
        Some(Command::Fetch {
            github,
            gitlab,
            year,
            month,
        }) => {
            fetch::run(&github, &gitlab, year, month).await?;
        }
        Some(Command::Svg {
            github,
            gitlab,
            mode,
            bg,
            out,
        }) => {
            svg::run(&github, &gitlab, mode.into(), bg, out).await?;
        }
        None => {}
    }

    Ok(())
}
