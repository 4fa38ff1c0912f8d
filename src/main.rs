use clap::Parser;
use color_eyre::eyre::Result;
use folderstat::cli::{Cli, render};
use folderstat_config::Settings;
use folderstat_core::{Aggregator, LocalFileSystem};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Install error hooks
    color_eyre::install()?;

    setup_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("folderstat failed: {}", e);
        return Err(e);
    }

    Ok(())
}

fn setup_logging() {
    // Results go to stdout, logs to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folderstat=info,warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_thread_ids(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path).await?,
        None => Settings::load().await?,
    };
    cli.apply(&mut settings);

    let folder = cli.command.target().folder_or(&std::env::current_dir()?);
    let request = cli.request(&settings);
    debug!("Running {:?} on {:?} with {:?}", request, folder, settings);

    let source = LocalFileSystem::from_settings(&settings);
    let result = Aggregator::from_settings(&settings).run(&source, Some(&folder), &request)?;

    println!("{}", render(&result, cli.json)?);
    Ok(())
}
