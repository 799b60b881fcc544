//! Scoped access grants for the selected directory.
//!
//! The original design hands out a revocable permission token tied to the
//! user-picked folder; every read or write under that folder must happen
//! while the token is active, and the token is released when a different
//! folder is selected or the process exits. This module models that token
//! as an explicit acquire/activate/release object so the resolver and the
//! disposition action can take it as a parameter instead of relying on
//! ambient state.

use crate::error::{CullError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A grant of access to one directory. Exactly one grant exists per
/// selected directory; dropping it releases the access.
#[derive(Debug)]
pub struct AccessGrant {
    root: PathBuf,
}

impl AccessGrant {
    /// Acquires a grant for `path`, verifying that it is a readable
    /// directory.
    pub fn acquire(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| CullError::AccessDenied {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !metadata.is_dir() {
            return Err(CullError::AccessDenied {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        log::debug!("acquired access grant for {}", path.display());
        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    /// The directory this grant covers.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-activates the grant for a batch of filesystem operations.
    ///
    /// Returns a scope guard; the batch must complete while the guard is
    /// live. Fails with `AccessDenied` if the directory can no longer be
    /// read (revoked permission, unmounted volume, deleted directory).
    pub fn activate(&self) -> Result<ActiveGrant<'_>> {
        fs::read_dir(&self.root)
            .map_err(|e| CullError::AccessDenied {
                path: self.root.clone(),
                reason: e.to_string(),
            })
            .map(|_| {
                log::trace!("grant active for {}", self.root.display());
                ActiveGrant { grant: self }
            })
    }
}

impl Drop for AccessGrant {
    fn drop(&mut self) {
        log::debug!("released access grant for {}", self.root.display());
    }
}

/// Scope guard for one activated batch of operations under a grant.
#[derive(Debug)]
pub struct ActiveGrant<'a> {
    grant: &'a AccessGrant,
}

impl ActiveGrant<'_> {
    pub fn root(&self) -> &Path {
        self.grant.root()
    }
}

impl Drop for ActiveGrant<'_> {
    fn drop(&mut self) {
        log::trace!("grant batch finished for {}", self.grant.root.display());
    }
}
