//! Persistence seam for watches.

use std::collections::BTreeMap;

use watch_core::{Watch, WatchId};

/// Storage of watches by identifier.
pub trait WatchRepository {
    fn find_all(&self) -> Vec<Watch>;

    fn find_by_id(&self, id: WatchId) -> Option<Watch>;

    /// Store `watch`, assigning a fresh identifier when it has none.
    ///
    /// Returns the stored watch.
    fn save(&mut self, watch: Watch) -> Watch;

    /// Returns whether a watch was removed.
    fn delete_by_id(&mut self, id: WatchId) -> bool;
}

/// Volatile repository ordered by identifier.
#[derive(Debug, Clone)]
pub struct InMemoryWatchRepository {
    rows: BTreeMap<WatchId, Watch>,
    next_id: WatchId,
}

impl Default for InMemoryWatchRepository {
    fn default() -> Self {
        Self { rows: BTreeMap::new(), next_id: 1 }
    }
}

impl InMemoryWatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl WatchRepository for InMemoryWatchRepository {
    fn find_all(&self) -> Vec<Watch> {
        self.rows.values().cloned().collect()
    }

    fn find_by_id(&self, id: WatchId) -> Option<Watch> {
        self.rows.get(&id).cloned()
    }

    fn save(&mut self, mut watch: Watch) -> Watch {
        let id = match watch.id {
            Some(id) => id,
            None => {
                let id = self.next_id;
                watch.id = Some(id);
                id
            }
        };
        self.next_id = self.next_id.max(id.saturating_add(1));
        self.rows.insert(id, watch.clone());
        watch
    }

    fn delete_by_id(&mut self, id: WatchId) -> bool {
        self.rows.remove(&id).is_some()
    }
}
