use clap::Parser;
use site_quality::cli::{run, Cli};
use site_quality::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env takes precedence over the inherited environment
    dotenvy::dotenv_override().ok();

    let cli = Cli::parse();
    run(cli).await
}
