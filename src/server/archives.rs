use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Downloadable builds kept by [`ArchiveIndex::new`] when no capacity is given.
pub const DEFAULT_TRACKED_BUILDS: usize = 1024;

/// Finished builds by id, oldest evicted first once full.
///
/// Eviction only forgets the id; the archive on disk is left alone.
#[derive(Debug)]
pub struct ArchiveIndex {
    capacity: usize,
    paths: HashMap<Uuid, PathBuf>,
    order: VecDeque<Uuid>,
}

impl ArchiveIndex {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TRACKED_BUILDS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            paths: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn insert(&mut self, id: Uuid, archive: PathBuf) {
        if self.paths.insert(id, archive).is_some() {
            return;
        }
        self.order.push_back(id);

        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.paths.remove(&evicted);
                debug!(id = %evicted, "Stopped tracking build for download");
            }
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&Path> {
        self.paths.get(id).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for ArchiveIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_after_insert() {
        let mut index = ArchiveIndex::new();
        let id = Uuid::new_v4();
        index.insert(id, PathBuf::from("/w/build-1/output/wasm_package.zip"));

        assert_eq!(
            index.get(&id),
            Some(Path::new("/w/build-1/output/wasm_package.zip"))
        );
        assert!(index.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_oldest_build_is_evicted_when_full() {
        let mut index = ArchiveIndex::with_capacity(2);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for (i, id) in ids.iter().enumerate() {
            index.insert(*id, PathBuf::from(format!("/w/{}.zip", i)));
        }

        assert_eq!(index.len(), 2);
        assert!(index.get(&ids[0]).is_none());
        assert!(index.get(&ids[1]).is_some());
        assert!(index.get(&ids[2]).is_some());
    }

    #[test]
    fn test_reinserting_an_id_does_not_grow() {
        let mut index = ArchiveIndex::with_capacity(2);
        let id = Uuid::new_v4();
        index.insert(id, PathBuf::from("/w/a.zip"));
        index.insert(id, PathBuf::from("/w/b.zip"));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&id), Some(Path::new("/w/b.zip")));
    }
}
