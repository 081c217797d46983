use clap::Parser;

use tradedesk_cli::commands::Cli;
use tradedesk_cli::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    tradedesk_observability::init(config.log_format);

    if let Err(e) = tradedesk_cli::run(cli, config).await {
        tracing::error!("Command failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
