use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use muutalk::connector::api::{Container, ContainerConfig, Router};
use muutalk::{Commands, ProviderConfig};

#[derive(Parser)]
#[command(name = "muutalk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Provider deadline per message, in seconds
    #[arg(long, global = true, default_value = "12")]
    timeout_secs: u64,

    /// Answer from a built-in scripted client instead of the provider
    #[arg(long, global = true)]
    mock_provider: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let provider =
        ProviderConfig::from_env().with_timeout(Duration::from_secs(cli.timeout_secs.max(1)));

    let container = Container::new(ContainerConfig {
        mock_provider: cli.mock_provider,
        provider,
    });

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
