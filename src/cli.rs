use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use folderstat_config::Settings;
use folderstat_models::{AggregationKind, AggregationRequest, AggregationResult};
use folderstat_utils::format_timestamp;
use std::path::{Path, PathBuf};

/// Folder statistics: file counts, newest modification time and sizes.
#[derive(Debug, Parser)]
#[command(name = "folderstat", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Read settings from this TOML file instead of the user config
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Deepest folder level to descend into (0 = unlimited)
    #[arg(long, global = true, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Descend into symlinked folders and count symlinked files
    #[arg(long, global = true)]
    pub follow_links: bool,

    /// Ignore dot-files and dot-folders
    #[arg(long, global = true)]
    pub skip_hidden: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Number of files (flat by default)
    Count(Target),
    /// Newest modification time as unix seconds (recursive by default)
    LastModified(Target),
    /// Total size in bytes (flat by default)
    Size(Target),
    /// Files, folders, size and newest modification time (recursive by default)
    Stats(Target),
}

#[derive(Debug, Args)]
pub struct Target {
    /// Folder to inspect [default: current directory]
    pub path: Option<PathBuf>,

    /// Include files in all subfolders
    #[arg(short, long, conflicts_with = "no_recursive")]
    pub recursive: bool,

    /// Only look at files directly in the folder
    #[arg(long)]
    pub no_recursive: bool,
}

impl Target {
    #[must_use]
    pub const fn recursive(&self) -> Option<bool> {
        if self.recursive {
            Some(true)
        } else if self.no_recursive {
            Some(false)
        } else {
            None
        }
    }

    /// The folder to aggregate, falling back to `cwd` when none was given.
    #[must_use]
    pub fn folder_or(&self, cwd: &Path) -> PathBuf {
        self.path.clone().unwrap_or_else(|| cwd.to_path_buf())
    }
}

impl Command {
    #[must_use]
    pub const fn kind(&self) -> AggregationKind {
        match self {
            Self::Count(_) => AggregationKind::Count,
            Self::LastModified(_) => AggregationKind::LatestModified,
            Self::Size(_) => AggregationKind::TotalSize,
            Self::Stats(_) => AggregationKind::Stats,
        }
    }

    #[must_use]
    pub const fn target(&self) -> &Target {
        match self {
            Self::Count(target) | Self::LastModified(target) | Self::Size(target) | Self::Stats(target) => target,
        }
    }
}

impl Cli {
    /// Overrides file settings with command line flags.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        settings.follow_links |= self.follow_links;
        settings.skip_hidden_files |= self.skip_hidden;
    }

    #[must_use]
    pub fn request(&self, settings: &Settings) -> AggregationRequest {
        let kind = self.command.kind();
        AggregationRequest::new(kind)
            .recursive(settings.recursive_for(kind))
            .with_recursive(self.command.target().recursive())
    }
}

/// Formats a result for the terminal.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(result: &AggregationResult, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }

    Ok(match result {
        AggregationResult::LatestModified(ts) => format!("{ts} ({})", format_timestamp(*ts)),
        AggregationResult::Stats(stats) => format!(
            "files:         {}\nfolders:       {}\ntotal size:    {} bytes\nlast modified: {} ({})",
            stats.files,
            stats.folders,
            stats.total_size,
            stats.latest_modified,
            format_timestamp(stats.latest_modified)
        ),
        other => other.to_string(),
    })
}
