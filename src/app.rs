//! Session state: everything the presentation layer owns.

use crate::domain::{
    resolve_directory, Decision, Disposition, DispositionEngine, DispositionTally, Entry,
    ReviewQueue, SortCriterion, Trasher,
};
use crate::error::Result;
use crate::grant::AccessGrant;
use std::path::{Path, PathBuf};

/// One review session over one directory.
///
/// Holds the selected directory, its access grant, the queue, the active
/// criterion, and the last error message. The core functions it delegates
/// to take and return values, so the whole session is testable without a
/// terminal.
pub struct Session {
    directory: PathBuf,
    grant: AccessGrant,
    queue: ReviewQueue,
    engine: DispositionEngine,
    /// Entries in the directory when it was last (re)loaded.
    total: usize,
    last_error: Option<String>,
}

impl Session {
    /// Opens a session on `directory`: acquires the grant, lists, sorts.
    pub fn open(directory: &Path, criterion: SortCriterion) -> Result<Self> {
        Self::open_with_engine(directory, criterion, DispositionEngine::new())
    }

    /// Same as [`Session::open`] but with a caller-supplied trasher, for
    /// tests and dry runs.
    pub fn open_with_trasher(
        directory: &Path,
        criterion: SortCriterion,
        trasher: Box<dyn Trasher>,
    ) -> Result<Self> {
        Self::open_with_engine(directory, criterion, DispositionEngine::with_trasher(trasher))
    }

    fn open_with_engine(
        directory: &Path,
        criterion: SortCriterion,
        engine: DispositionEngine,
    ) -> Result<Self> {
        let grant = AccessGrant::acquire(directory)?;
        let entries = resolve_directory(&grant)?;

        let mut queue = ReviewQueue::new(criterion);
        let total = entries.len();
        queue.replace(entries);

        log::info!(
            "reviewing {} entries in {}",
            total,
            directory.display()
        );

        Ok(Self {
            directory: directory.to_path_buf(),
            grant,
            queue,
            engine,
            total,
            last_error: None,
        })
    }

    /// Switches the session to a different directory.
    ///
    /// The old grant is released and all per-directory state resets. On
    /// failure the queue is left empty and the error message is kept for
    /// display; the error is also returned.
    pub fn select_directory(&mut self, directory: &Path) -> Result<()> {
        self.queue.clear();
        self.last_error = None;

        let grant = match AccessGrant::acquire(directory) {
            Ok(grant) => grant,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        match resolve_directory(&grant) {
            Ok(entries) => {
                self.directory = directory.to_path_buf();
                self.grant = grant;
                self.total = entries.len();
                self.queue.replace(entries);
                self.engine.reset();
                Ok(())
            }
            Err(e) => {
                self.directory = directory.to_path_buf();
                self.grant = grant;
                self.total = 0;
                self.engine.reset();
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn grant(&self) -> &AccessGrant {
        &self.grant
    }

    /// The entry currently on screen.
    pub fn current(&self) -> Option<&Entry> {
        self.queue.front()
    }

    pub fn criterion(&self) -> SortCriterion {
        self.queue.criterion()
    }

    /// Changes the review order; the remaining entries re-sort.
    pub fn set_criterion(&mut self, criterion: SortCriterion) {
        self.queue.set_criterion(criterion);
    }

    /// Applies a decision to the current entry.
    ///
    /// On failure the entry is already back in the queue and the message
    /// is recorded for the status line. Returns what happened, or `None`
    /// when the queue was empty.
    pub fn decide(&mut self, decision: Decision) -> Option<Disposition> {
        match self.engine.decide(&mut self.queue, decision, &self.grant) {
            Ok(outcome) => {
                self.last_error = None;
                outcome
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    pub fn tally(&self) -> DispositionTally {
        self.engine.tally()
    }

    /// Entries found when the directory was loaded.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// True once every entry has been decided.
    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}
