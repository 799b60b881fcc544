//! Applying a decision to the front of the review queue.

use super::queue::ReviewQueue;
use crate::error::{CullError, DispositionCause, Result};
use crate::grant::AccessGrant;
use std::path::Path;

/// The user's verdict on the front entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Leave the file untouched; only the queue moves on.
    Keep,
    /// Move the file to the OS trash. Reversible by design; the permanent
    /// delete primitive is never used.
    Discard,
}

/// What a completed disposition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Kept,
    Discarded,
}

/// The trash primitive, behind a seam so the engine is testable without a
/// real trash can.
pub trait Trasher {
    fn send_to_trash(&self, path: &Path) -> std::result::Result<(), DispositionCause>;
}

/// Production trasher backed by the OS trash.
pub struct SystemTrash;

impl Trasher for SystemTrash {
    fn send_to_trash(&self, path: &Path) -> std::result::Result<(), DispositionCause> {
        trash::delete(path).map_err(|e| {
            let msg = e.to_string();
            let lowered = msg.to_lowercase();
            if lowered.contains("permission") || lowered.contains("access") {
                DispositionCause::PermissionLost(msg)
            } else {
                DispositionCause::Io(msg)
            }
        })
    }
}

/// Running counts for the end-of-session summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispositionTally {
    pub kept: usize,
    pub discarded: usize,
}

impl DispositionTally {
    pub fn decided(&self) -> usize {
        self.kept + self.discarded
    }
}

/// Applies decisions to the queue front, one at a time.
///
/// A discard removes the entry from the visible queue first, so the next
/// entry renders without waiting on I/O, then moves the file to the trash.
/// If the move fails the entry is reinserted at its sorted position and the
/// error is returned for display; the entry is reviewable again. A target
/// that is already gone counts as a successful discard.
pub struct DispositionEngine {
    trasher: Box<dyn Trasher>,
    tally: DispositionTally,
}

impl DispositionEngine {
    pub fn new() -> Self {
        Self::with_trasher(Box::new(SystemTrash))
    }

    pub fn with_trasher(trasher: Box<dyn Trasher>) -> Self {
        Self {
            trasher,
            tally: DispositionTally::default(),
        }
    }

    pub fn tally(&self) -> DispositionTally {
        self.tally
    }

    /// Zeroes the tally for a fresh directory.
    pub fn reset(&mut self) {
        self.tally = DispositionTally::default();
    }

    /// Decides the front entry. Returns `Ok(None)` on an empty queue.
    pub fn decide(
        &mut self,
        queue: &mut ReviewQueue,
        decision: Decision,
        grant: &AccessGrant,
    ) -> Result<Option<Disposition>> {
        let entry = match queue.take_front() {
            Some(entry) => entry,
            None => return Ok(None),
        };

        match decision {
            Decision::Keep => {
                log::debug!("kept {}", entry.path.display());
                self.tally.kept += 1;
                Ok(Some(Disposition::Kept))
            }
            Decision::Discard => {
                let _active = match grant.activate() {
                    Ok(active) => active,
                    Err(e) => {
                        queue.reinsert(entry);
                        return Err(e);
                    }
                };

                if !entry.path.exists() {
                    // Already gone; the delete intent is satisfied.
                    log::debug!("{} vanished before discard; treating as done", entry.path.display());
                    self.tally.discarded += 1;
                    return Ok(Some(Disposition::Discarded));
                }

                match self.trasher.send_to_trash(&entry.path) {
                    Ok(()) => {
                        log::debug!("trashed {}", entry.path.display());
                        self.tally.discarded += 1;
                        Ok(Some(Disposition::Discarded))
                    }
                    Err(_) if !entry.path.exists() => {
                        // Lost a race with another remover mid-call.
                        self.tally.discarded += 1;
                        Ok(Some(Disposition::Discarded))
                    }
                    Err(cause) => {
                        log::warn!("trash failed for {}: {}", entry.path.display(), cause);
                        let path = entry.path.clone();
                        queue.reinsert(entry);
                        Err(CullError::DispositionFailed { path, cause })
                    }
                }
            }
        }
    }
}

impl Default for DispositionEngine {
    fn default() -> Self {
        Self::new()
    }
}
