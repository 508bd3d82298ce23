use anyhow::Result;
use clap::Parser;
use scribe_console::{app, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Terminal client for the live transcription service.
#[derive(Parser)]
#[command(name = "scribe-console", version)]
struct Cli {
    /// Base URL of the transcription service (overrides the config file).
    #[arg(long)]
    server: Option<String>,

    /// Config file path, without extension.
    #[arg(long, default_value = "config/scribe-console")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't tangle with the raw-mode transcript
    // view on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(url) = cli.server {
        config.server.url = url;
    }

    info!("scribe-console connecting to {}", config.server.url);

    app::run(config).await
}
