use clap::Parser;
use datasearch::cli::{self, Cli};
use datasearch::observability;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = cli::resolve_config(&cli)?;
    observability::init_tracing(&config.logging);
    info!(
        "Configuration loaded (backend: {}, mock: {})",
        config.backend.base_url, config.backend.use_mock
    );

    cli::run(cli, config).await
}
