use color_eyre::Result;
use tempfile::TempDir;
use tokio::fs;

use folderstat::cli::Cli;
use folderstat::config::Settings;
use folderstat::engine::{Aggregator, LocalFileSystem, TraversalLimits};
use folderstat::models::AggregationKind;

use clap::Parser;

#[tokio::test]
async fn test_config_file_drives_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "count_recursive = true\nlast_modified_recursive = false\nmax_depth = 3\ndetect_cycles = false\n",
    )
    .await?;

    let settings = Settings::load_from(&config_path).await?;
    assert!(settings.recursive_for(AggregationKind::Count));
    assert!(!settings.recursive_for(AggregationKind::LatestModified));
    assert_eq!(
        Aggregator::from_settings(&settings).limits(),
        TraversalLimits {
            max_depth: Some(3),
            detect_cycles: false,
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_cli_request_against_tree() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("nested/deeper")).await?;
    fs::write(root.join("top.txt"), b"T").await?;
    fs::write(root.join("nested/deeper/bottom.txt"), b"B").await?;

    let root_arg = root.to_string_lossy().to_string();
    let cli = Cli::try_parse_from(["folderstat", "count", root_arg.as_str(), "--max-depth", "1"])?;
    let mut settings = Settings::default();
    cli.apply(&mut settings);

    let folder = cli.command.target().folder_or(root);
    let source = LocalFileSystem::from_settings(&settings);
    let aggregator = Aggregator::from_settings(&settings);

    // Flat by default, so the depth cap is never reached.
    let flat = aggregator.run(&source, Some(&folder), &cli.request(&settings))?;
    assert_eq!(flat.as_integer(), Some(1));

    let recursive = cli.request(&settings).recursive(true);
    assert!(aggregator.run(&source, Some(&folder), &recursive).is_err());
    Ok(())
}
