//! Opening the current entry with the OS default handler.

use crate::error::{CullError, Result};
use crate::grant::AccessGrant;
use std::path::Path;

/// Launches the default application for `path`. Blocks until the launcher
/// returns; the caller is expected to have suspended the TUI first.
pub fn open_with_default(path: &Path, grant: &AccessGrant) -> Result<()> {
    let _active = grant.activate()?;

    open::that(path).map_err(|e| CullError::OpenFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::debug!("opened {} with default handler", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_requires_active_grant() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("victim");
        std::fs::create_dir(&dir).unwrap();
        let file = dir.join("a.txt");
        std::fs::write(&file, b"x").unwrap();

        let grant = AccessGrant::acquire(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        // The grant can no longer activate, so nothing is launched.
        assert!(matches!(
            open_with_default(&file, &grant),
            Err(CullError::AccessDenied { .. })
        ));
    }
}
