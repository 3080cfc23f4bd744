use anyhow::Result;
use commitmap::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
