// Synchronous preview loading with a small LRU cache keyed by path
use crate::domain::Entry;
use crate::preview::{generate_preview, PreviewContent};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maximum number of cached previews.
const CACHE_SIZE: usize = 10;

/// Outcome of a preview request.
#[derive(Debug, Clone)]
pub enum PreviewState {
    Ready(PreviewContent),
    Error(String),
}

/// LRU-ish cache for previews.
#[derive(Debug)]
struct PreviewCache {
    cache: HashMap<PathBuf, PreviewContent>,
    /// Access order for eviction, most recent at the end.
    access_order: Vec<PathBuf>,
    max_size: usize,
}

impl PreviewCache {
    fn new(max_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            access_order: Vec::new(),
            max_size,
        }
    }

    fn get(&mut self, path: &Path) -> Option<PreviewContent> {
        if let Some(preview) = self.cache.get(path) {
            self.access_order.retain(|p| p != path);
            self.access_order.push(path.to_path_buf());
            Some(preview.clone())
        } else {
            None
        }
    }

    fn insert(&mut self, path: PathBuf, preview: PreviewContent) {
        if self.cache.contains_key(&path) {
            self.access_order.retain(|p| p != &path);
        }

        if self.cache.len() >= self.max_size && !self.cache.contains_key(&path) {
            if let Some(oldest) = self.access_order.first().cloned() {
                self.cache.remove(&oldest);
                self.access_order.remove(0);
            }
        }

        self.cache.insert(path.clone(), preview);
        self.access_order.push(path);
    }

    fn remove(&mut self, path: &Path) {
        self.cache.remove(path);
        self.access_order.retain(|p| p != path);
    }

    fn len(&self) -> usize {
        self.cache.len()
    }

    fn clear(&mut self) {
        self.cache.clear();
        self.access_order.clear();
    }
}

/// Generates previews on demand for the TUI loop.
///
/// Generation runs on the calling thread; small files make the brief block
/// acceptable, and the cache absorbs re-renders of the same entry.
pub struct PreviewManager {
    cache: PreviewCache,
}

impl PreviewManager {
    pub fn new() -> Self {
        Self {
            cache: PreviewCache::new(CACHE_SIZE),
        }
    }

    /// Returns the preview for `entry`, generating and caching it on a miss.
    pub fn preview_for(&mut self, entry: &Entry) -> PreviewState {
        if let Some(cached) = self.cache.get(&entry.path) {
            return PreviewState::Ready(cached);
        }

        match generate_preview(entry) {
            Ok(preview) => {
                self.cache.insert(entry.path.clone(), preview.clone());
                PreviewState::Ready(preview)
            }
            Err(e) => PreviewState::Error(e.to_string()),
        }
    }

    /// Drops a single cached preview, e.g. after the file was trashed.
    pub fn invalidate(&mut self, path: &Path) {
        self.cache.remove(path);
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for PreviewManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileKind;
    use chrono::Utc;
    use std::fs;
    use tempfile::TempDir;

    fn text_entry(path: PathBuf) -> Entry {
        Entry {
            name: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("test")
                .to_string(),
            size: fs::metadata(&path).map(|m| m.len()).unwrap_or(0),
            path,
            is_dir: false,
            modified: Utc::now(),
            kind: FileKind::Text,
        }
    }

    #[test]
    fn test_cache_insert_and_get() {
        let mut cache = PreviewCache::new(3);
        cache.insert(
            PathBuf::from("/a"),
            PreviewContent::Text(vec!["a".to_string()]),
        );

        assert!(cache.get(Path::new("/a")).is_some());
        assert!(cache.get(Path::new("/b")).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let mut cache = PreviewCache::new(2);
        cache.insert(PathBuf::from("/a"), PreviewContent::Text(vec![]));
        cache.insert(PathBuf::from("/b"), PreviewContent::Text(vec![]));

        // Touch /a so /b becomes the eviction candidate.
        cache.get(Path::new("/a"));
        cache.insert(PathBuf::from("/c"), PreviewContent::Text(vec![]));

        assert!(cache.get(Path::new("/a")).is_some());
        assert!(cache.get(Path::new("/b")).is_none());
        assert!(cache.get(Path::new("/c")).is_some());
    }

    #[test]
    fn test_cache_reinsert_updates_in_place() {
        let mut cache = PreviewCache::new(2);
        cache.insert(PathBuf::from("/a"), PreviewContent::Text(vec!["v1".to_string()]));
        cache.insert(PathBuf::from("/a"), PreviewContent::Text(vec!["v2".to_string()]));

        assert_eq!(cache.len(), 1);
        match cache.get(Path::new("/a")).unwrap() {
            PreviewContent::Text(lines) => assert_eq!(lines, vec!["v2"]),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn test_manager_caches_generated_previews() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("note.txt");
        fs::write(&path, "hello").unwrap();

        let mut manager = PreviewManager::new();
        let entry = text_entry(path.clone());

        assert!(matches!(manager.preview_for(&entry), PreviewState::Ready(_)));
        assert_eq!(manager.cache_size(), 1);

        // Second request is served from cache even if the file is gone.
        fs::remove_file(&path).unwrap();
        assert!(matches!(manager.preview_for(&entry), PreviewState::Ready(_)));
    }

    #[test]
    fn test_manager_invalidate_forces_regeneration() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("note.txt");
        fs::write(&path, "hello").unwrap();

        let mut manager = PreviewManager::new();
        let entry = text_entry(path.clone());
        manager.preview_for(&entry);

        manager.invalidate(&path);
        assert_eq!(manager.cache_size(), 0);
    }
}
