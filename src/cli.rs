// CLI argument parsing
use crate::domain::SortCriterion;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Cull - review a folder's files one at a time in the terminal
///
/// Swipe right (or press k) to keep a file, swipe left (or press t) to move
/// it to the trash. Nothing is ever permanently deleted.
#[derive(Parser, Debug, Clone)]
#[command(name = "cull")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory whose files should be reviewed
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Review order
    #[arg(short = 's', long = "sort", value_enum, default_value = "name")]
    pub sort: SortOrder,

    /// Trash without the confirmation dialog
    #[arg(long = "skip-confirm", action = ArgAction::SetTrue)]
    pub skip_confirm: bool,

    /// Show the welcome screen even if it was dismissed before
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub show_welcome: bool,

    /// Increase log verbosity (-v debug, -vv trace); logs go to stderr
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    pub quiet: bool,
}

/// Review order options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SortOrder {
    /// Alphabetical by file name
    #[default]
    Name,
    /// Oldest modification time first
    Oldest,
    /// Largest file first
    Largest,
}

impl From<SortOrder> for SortCriterion {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Name => SortCriterion::Name,
            SortOrder::Oldest => SortCriterion::OldestFirst,
            SortOrder::Largest => SortCriterion::LargestFirst,
        }
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Checks the arguments before any terminal setup happens.
    pub fn validate(&self) -> Result<(), String> {
        if !self.directory.exists() {
            return Err(format!(
                "Directory does not exist: {}",
                self.directory.display()
            ));
        }

        if !self.directory.is_dir() {
            return Err(format!(
                "Path is not a directory: {}",
                self.directory.display()
            ));
        }

        Ok(())
    }
}
