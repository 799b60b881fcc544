//! Cull - a terminal-based file decluttering library
//!
//! This crate provides the core functionality for the cull application:
//! directory review sessions with keep/trash decisions, previews, and a
//! reversible trash action.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod gesture;
pub mod grant;
pub mod opener;
pub mod preview;
pub mod preview_manager;
pub mod tui;

// Re-export primary types for convenience
pub use app::Session;
pub use config::UserConfig;
pub use domain::{
    resolve_directory, sort_entries, Decision, Disposition, DispositionEngine, DispositionTally,
    Entry, FileKind, ReviewQueue, SortCriterion, SystemTrash, Trasher,
};
pub use error::{CullError, Result};
pub use gesture::{classify_drag, DragTracker, SwipeCommand};
pub use grant::AccessGrant;
pub use opener::open_with_default;
