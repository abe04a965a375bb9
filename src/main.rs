use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use futures::StreamExt;
use rlogs::config::Config;
use rlogs::loaders::FsStore;
use rlogs::{Reader, SourceDescriptor};

#[derive(Parser)]
#[command(name = "rlogs", about = "Read one object through the configured ingestion rules")]
struct Cli {
    /// Rule file (TOML).
    #[arg(long, short)]
    config: PathBuf,

    #[arg(long)]
    region: String,

    #[arg(long)]
    bucket: String,

    #[arg(long)]
    key: String,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load(&cli.config)?;
    tracing::debug!(entries = config.entries.len(), root = %config.store.root.display(), "config loaded");

    let store = Arc::new(FsStore::new(config.store.root.clone()));
    let reader = Reader::from_config(&config, store);
    let target = SourceDescriptor::new(cli.region, cli.bucket, cli.key);

    let mut stdout = std::io::stdout().lock();
    let mut results = reader.read(&target);
    let (mut ok, mut failed) = (0usize, 0usize);
    while let Some(result) = results.next().await {
        match result {
            Ok(record) => {
                serde_json::to_writer(&mut stdout, &record)?;
                writeln!(stdout)?;
                ok += 1;
            }
            Err(err) => {
                tracing::error!(error = %err, "read failed");
                failed += 1;
            }
        }
    }
    stdout.flush()?;

    tracing::info!(object = %target, ok, failed, "read finished");
    if failed > 0 {
        anyhow::bail!("{failed} of {} results failed", ok + failed);
    }
    Ok(())
}
