//! Core review domain: directory entries, classification, sorting, the
//! review queue, and the disposition action.

pub mod disposition;
pub mod queue;

pub use disposition::{
    Decision, Disposition, DispositionEngine, DispositionTally, SystemTrash, Trasher,
};
pub use queue::ReviewQueue;

use crate::error::{CullError, Result};
use crate::grant::AccessGrant;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Preview category for a directory entry.
///
/// This only selects which preview strategy the presentation layer uses;
/// the actual decoding is delegated to the respective library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Pdf,
    Text,
    /// No preview strategy: unknown extensions and directories.
    None,
}

impl FileKind {
    /// Classifies a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "heic" | "tif" | "tiff" | "bmp" | "webp" => {
                FileKind::Image
            }

            "mp4" | "mov" | "avi" | "mkv" | "m4v" | "webm" | "flv" | "wmv" | "mpg" | "mpeg"
            | "3gp" => FileKind::Video,

            "pdf" => FileKind::Pdf,

            "txt" | "md" | "json" | "csv" | "log" | "xml" | "html" | "rs" | "py" | "js" | "ts"
            | "jsx" | "tsx" | "toml" | "yaml" | "yml" | "css" | "sh" | "c" | "cpp" | "h"
            | "hpp" | "java" | "go" | "rb" | "php" | "swift" | "kt" | "cs" | "sql" => {
                FileKind::Text
            }

            _ => FileKind::None,
        }
    }

    /// Classifies a path. Directories always classify as `None`.
    pub fn from_path(path: &Path, is_dir: bool) -> Self {
        if is_dir {
            return FileKind::None;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileKind::None)
    }
}

/// One direct child of the selected directory, with cached metadata.
///
/// The path doubles as the identity key; paths are unique within one
/// listing snapshot.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    /// 0 when the size could not be read.
    pub size: u64,
    /// Unix epoch when the modification time could not be read.
    pub modified: DateTime<Utc>,
    pub kind: FileKind,
}

impl Entry {
    /// Builds an entry from a path, reading metadata best-effort: an
    /// unreadable attribute yields its sentinel instead of an error.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let metadata = fs::metadata(path).ok();
        let is_dir = metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false);
        let size = metadata
            .as_ref()
            .filter(|m| !m.is_dir())
            .map(|m| m.len())
            .unwrap_or(0);
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Entry {
            path: path.to_path_buf(),
            name,
            is_dir,
            size,
            modified,
            kind: FileKind::from_path(path, is_dir),
        }
    }
}

/// Order applied to the review queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortCriterion {
    /// Ascending, case-folded, by display name.
    #[default]
    Name,
    /// Ascending by modification time.
    OldestFirst,
    /// Descending by size.
    LargestFirst,
}

/// Comparator behind [`sort_entries`]; equal keys compare `Equal` so the
/// stable sort preserves listing order for ties.
pub(crate) fn criterion_cmp(a: &Entry, b: &Entry, criterion: SortCriterion) -> Ordering {
    match criterion {
        SortCriterion::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortCriterion::OldestFirst => a.modified.cmp(&b.modified),
        SortCriterion::LargestFirst => b.size.cmp(&a.size),
    }
}

/// Stable in-place sort by the given criterion.
pub fn sort_entries(entries: &mut [Entry], criterion: SortCriterion) {
    entries.sort_by(|a, b| criterion_cmp(a, b, criterion));
}

/// Lists the non-hidden direct children of the granted directory.
///
/// No recursion into subdirectories; directories themselves are listed as
/// entries. Children whose names start with `.` are skipped, as are
/// children whose names are not valid Unicode. Per-child metadata failures
/// degrade to sentinels; only a failure of the listing itself is an error.
pub fn resolve_directory(grant: &AccessGrant) -> Result<Vec<Entry>> {
    let active = grant.activate()?;
    let dir_path = active.root();

    let read_dir = fs::read_dir(dir_path).map_err(|e| CullError::ListingFailed {
        path: dir_path.to_path_buf(),
        source: e,
    })?;

    let mut entries = Vec::new();
    for entry_result in read_dir {
        let dir_entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                log::warn!("skipping unreadable child of {}: {}", dir_path.display(), e);
                continue;
            }
        };

        let path = dir_entry.path();
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if file_name.starts_with('.') {
            continue;
        }

        entries.push(Entry::from_path(&path));
    }

    log::debug!("resolved {} entries in {}", entries.len(), dir_path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod file_kind_tests {
        use super::*;

        #[test]
        fn test_image_extensions() {
            assert_eq!(FileKind::from_extension("png"), FileKind::Image);
            assert_eq!(FileKind::from_extension("jpg"), FileKind::Image);
            assert_eq!(FileKind::from_extension("jpeg"), FileKind::Image);
            assert_eq!(FileKind::from_extension("heic"), FileKind::Image);
            assert_eq!(FileKind::from_extension("webp"), FileKind::Image);
            assert_eq!(FileKind::from_extension("tiff"), FileKind::Image);
        }

        #[test]
        fn test_video_extensions() {
            assert_eq!(FileKind::from_extension("mp4"), FileKind::Video);
            assert_eq!(FileKind::from_extension("mov"), FileKind::Video);
            assert_eq!(FileKind::from_extension("mkv"), FileKind::Video);
            assert_eq!(FileKind::from_extension("3gp"), FileKind::Video);
        }

        #[test]
        fn test_text_extensions() {
            assert_eq!(FileKind::from_extension("txt"), FileKind::Text);
            assert_eq!(FileKind::from_extension("md"), FileKind::Text);
            assert_eq!(FileKind::from_extension("csv"), FileKind::Text);
            assert_eq!(FileKind::from_extension("log"), FileKind::Text);
            assert_eq!(FileKind::from_extension("rs"), FileKind::Text);
        }

        #[test]
        fn test_pdf_and_unknown() {
            assert_eq!(FileKind::from_extension("pdf"), FileKind::Pdf);
            assert_eq!(FileKind::from_extension("zip"), FileKind::None);
            assert_eq!(FileKind::from_extension(""), FileKind::None);
        }

        #[test]
        fn test_case_insensitive_match() {
            // photo.HEIC, clip.mov, doc.PDF, notes.md, archive.zip
            assert_eq!(
                FileKind::from_path(Path::new("photo.HEIC"), false),
                FileKind::Image
            );
            assert_eq!(
                FileKind::from_path(Path::new("clip.mov"), false),
                FileKind::Video
            );
            assert_eq!(
                FileKind::from_path(Path::new("doc.PDF"), false),
                FileKind::Pdf
            );
            assert_eq!(
                FileKind::from_path(Path::new("notes.md"), false),
                FileKind::Text
            );
            assert_eq!(
                FileKind::from_path(Path::new("archive.zip"), false),
                FileKind::None
            );
        }

        #[test]
        fn test_directories_classify_none() {
            assert_eq!(
                FileKind::from_path(Path::new("folder.png"), true),
                FileKind::None
            );
        }
    }

    mod entry_tests {
        use super::*;
        use std::fs;
        use tempfile::TempDir;

        #[test]
        fn test_entry_from_path_reads_metadata() {
            let temp_dir = TempDir::new().unwrap();
            let file_path = temp_dir.path().join("notes.txt");
            fs::write(&file_path, b"hello entry").unwrap();

            let entry = Entry::from_path(&file_path);

            assert_eq!(entry.name, "notes.txt");
            assert_eq!(entry.size, 11);
            assert!(!entry.is_dir);
            assert_eq!(entry.kind, FileKind::Text);
            assert!(entry.modified > DateTime::<Utc>::UNIX_EPOCH);
        }

        #[test]
        fn test_entry_from_missing_path_uses_sentinels() {
            let entry = Entry::from_path(Path::new("/nonexistent/ghost.txt"));

            assert_eq!(entry.name, "ghost.txt");
            assert_eq!(entry.size, 0);
            assert_eq!(entry.modified, DateTime::<Utc>::UNIX_EPOCH);
        }

        #[test]
        fn test_directory_entry() {
            let temp_dir = TempDir::new().unwrap();
            let sub = temp_dir.path().join("stuff");
            fs::create_dir(&sub).unwrap();

            let entry = Entry::from_path(&sub);

            assert!(entry.is_dir);
            assert_eq!(entry.size, 0);
            assert_eq!(entry.kind, FileKind::None);
        }
    }

    mod sort_tests {
        use super::*;
        use chrono::TimeZone;

        fn entry(name: &str, size: u64, modified_secs: i64) -> Entry {
            Entry {
                path: PathBuf::from(name),
                name: name.to_string(),
                is_dir: false,
                size,
                modified: Utc.timestamp_opt(modified_secs, 0).unwrap(),
                kind: FileKind::None,
            }
        }

        #[test]
        fn test_sort_by_name_ascending() {
            let mut entries = vec![entry("charlie", 1, 1), entry("Alpha", 2, 2), entry("bravo", 3, 3)];
            sort_entries(&mut entries, SortCriterion::Name);

            let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
        }

        #[test]
        fn test_sort_oldest_first() {
            let mut entries = vec![entry("new", 1, 300), entry("old", 1, 100), entry("mid", 1, 200)];
            sort_entries(&mut entries, SortCriterion::OldestFirst);

            let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["old", "mid", "new"]);
        }

        #[test]
        fn test_sort_largest_first() {
            let mut entries = vec![entry("small", 10, 1), entry("big", 3000, 1), entry("mid", 500, 1)];
            sort_entries(&mut entries, SortCriterion::LargestFirst);

            let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["big", "mid", "small"]);
        }

        #[test]
        fn test_sort_is_stable_on_ties() {
            let mut entries = vec![entry("first", 100, 1), entry("second", 100, 1), entry("third", 100, 1)];
            sort_entries(&mut entries, SortCriterion::LargestFirst);

            let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["first", "second", "third"]);
        }

        #[test]
        fn test_resort_is_idempotent() {
            let mut entries = vec![entry("b", 2, 2), entry("a", 1, 1), entry("c", 3, 3)];
            sort_entries(&mut entries, SortCriterion::Name);
            let once: Vec<_> = entries.iter().map(|e| e.name.clone()).collect();

            sort_entries(&mut entries, SortCriterion::Name);
            let twice: Vec<_> = entries.iter().map(|e| e.name.clone()).collect();

            assert_eq!(once, twice);
        }
    }

    mod resolve_tests {
        use super::*;
        use std::collections::HashSet;
        use std::fs;
        use tempfile::TempDir;

        #[test]
        fn test_resolve_lists_non_hidden_children() {
            let temp_dir = TempDir::new().unwrap();
            let dir = temp_dir.path();
            fs::write(dir.join("a.txt"), b"a").unwrap();
            fs::write(dir.join("b.png"), b"b").unwrap();
            fs::write(dir.join(".hidden"), b"h").unwrap();

            let grant = AccessGrant::acquire(dir).unwrap();
            let entries = resolve_directory(&grant).unwrap();

            let names: HashSet<_> = entries.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, HashSet::from(["a.txt", "b.png"]));
        }

        #[test]
        fn test_resolve_includes_directories_without_recursing() {
            let temp_dir = TempDir::new().unwrap();
            let dir = temp_dir.path();
            let sub = dir.join("photos");
            fs::create_dir(&sub).unwrap();
            fs::write(sub.join("nested.png"), b"n").unwrap();
            fs::write(dir.join("root.txt"), b"r").unwrap();

            let grant = AccessGrant::acquire(dir).unwrap();
            let entries = resolve_directory(&grant).unwrap();

            let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(entries.len(), 2);
            assert!(names.contains(&"photos"));
            assert!(names.contains(&"root.txt"));
            assert!(!names.contains(&"nested.png"));

            let sub_entry = entries.iter().find(|e| e.name == "photos").unwrap();
            assert!(sub_entry.is_dir);
            assert_eq!(sub_entry.kind, FileKind::None);
        }

        #[test]
        fn test_resolve_identities_are_unique() {
            let temp_dir = TempDir::new().unwrap();
            let dir = temp_dir.path();
            for i in 0..20 {
                fs::write(dir.join(format!("file{}.txt", i)), b"x").unwrap();
            }

            let grant = AccessGrant::acquire(dir).unwrap();
            let entries = resolve_directory(&grant).unwrap();

            let paths: HashSet<_> = entries.iter().map(|e| e.path.clone()).collect();
            assert_eq!(paths.len(), entries.len());
        }

        #[test]
        fn test_resolve_empty_directory() {
            let temp_dir = TempDir::new().unwrap();
            let grant = AccessGrant::acquire(temp_dir.path()).unwrap();

            let entries = resolve_directory(&grant).unwrap();
            assert!(entries.is_empty());
        }

        #[test]
        fn test_resolve_vanished_directory_is_access_denied() {
            let temp_dir = TempDir::new().unwrap();
            let dir = temp_dir.path().join("victim");
            fs::create_dir(&dir).unwrap();

            let grant = AccessGrant::acquire(&dir).unwrap();
            fs::remove_dir(&dir).unwrap();

            // The grant can no longer be re-activated.
            assert!(matches!(
                resolve_directory(&grant),
                Err(CullError::AccessDenied { .. })
            ));
        }
    }
}
