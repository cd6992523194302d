use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::corpus::{CorpusStore, Entry};
use crate::engine::filter::LevelFilter;
use crate::engine::sampling::shuffle_copy;
use crate::error::{EngineError, Result};

/// Mode-specific hooks plugged into [`Session`].
pub trait SelectionPolicy {
    fn name(&self) -> &'static str;

    /// Entries eligible for the active set, before shuffling. Defaults to the
    /// unmastered entries at the selected level.
    fn candidates(&self, store: &CorpusStore, filter: LevelFilter) -> Vec<Entry> {
        filter.apply(store.entries_excluding_mastered())
    }

    /// Called each time an entry becomes current.
    fn on_select(&mut self, _store: &CorpusStore, _current: &Entry, _rng: &mut SmallRng) {}

    /// Called when a selection yields nothing.
    fn on_clear(&mut self) {}
}

/// Filter, shuffle, then iterate cyclically over a corpus.
///
/// The session starts unready; `init` builds the active set. Iteration wraps
/// around without reshuffling, so once every item has been shown the same
/// order repeats.
pub struct Session<P> {
    policy: P,
    active: Vec<Entry>,
    cursor: usize,
    level: u32,
    current: Option<Entry>,
    built_for: Option<u64>,
    rng: SmallRng,
}

impl<P: SelectionPolicy> Session<P> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            policy,
            active: Vec::new(),
            cursor: 0,
            level: 0,
            current: None,
            built_for: None,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    /// Rebuild the active set for `level` and rewind. Always reshuffles, so
    /// callers that want to keep their place check [`Session::is_ready_for`]
    /// first.
    pub fn init(&mut self, store: &CorpusStore, level: u32) {
        let candidates = self.policy.candidates(store, LevelFilter::new(level));
        self.active = shuffle_copy(&candidates, &mut self.rng);
        self.cursor = 0;
        self.level = level;
        self.current = None;
        self.built_for = Some(store.revision());
        self.policy.on_clear();
        debug!(
            mode = self.policy.name(),
            level,
            active = self.active.len(),
            "session initialized"
        );
    }

    pub fn is_ready(&self) -> bool {
        self.built_for.is_some()
    }

    /// Whether the active set was built for this level from the store's
    /// current contents.
    pub fn is_ready_for(&self, store: &CorpusStore, level: u32) -> bool {
        self.built_for == Some(store.revision()) && self.level == level
    }

    /// Advance to the next entry. `Ok(None)` means the active set is empty.
    pub fn next(&mut self, store: &CorpusStore) -> Result<Option<&Entry>> {
        if !self.is_ready() {
            return Err(EngineError::precondition(
                "next",
                "an initialized session",
            ));
        }
        if self.active.is_empty() {
            return Ok(self.clear_current());
        }
        let entry = self.active[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.active.len();
        Ok(self.make_current(store, entry))
    }

    /// Jump to `index` in the active set, clamped into range. Does not move
    /// the iteration cursor.
    pub fn select(&mut self, store: &CorpusStore, index: usize) -> Result<Option<&Entry>> {
        if !self.is_ready() {
            return Err(EngineError::precondition(
                "select",
                "an initialized session",
            ));
        }
        let Some(last) = self.active.len().checked_sub(1) else {
            return Ok(self.clear_current());
        };
        let entry = self.active[index.min(last)].clone();
        Ok(self.make_current(store, entry))
    }

    fn make_current(&mut self, store: &CorpusStore, entry: Entry) -> Option<&Entry> {
        self.policy.on_select(store, &entry, &mut self.rng);
        self.current = Some(entry);
        self.current.as_ref()
    }

    fn clear_current(&mut self) -> Option<&Entry> {
        self.current = None;
        self.policy.on_clear();
        None
    }

    pub fn current(&self) -> Option<&Entry> {
        self.current.as_ref()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn active(&self) -> &[Entry] {
        &self.active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::entry::sample;
    use crate::session::listening::ListeningPolicy;

    fn store_with(levels: &[(u32, u32)]) -> CorpusStore {
        let mut store = CorpusStore::new();
        for &(id, level) in levels {
            store.add_entry(sample(id, level));
        }
        store
    }

    fn session() -> Session<ListeningPolicy> {
        Session::with_policy(ListeningPolicy).with_rng(SmallRng::seed_from_u64(11))
    }

    #[test]
    fn test_next_before_init_fails() {
        let store = store_with(&[(1, 1)]);
        let mut s = session();
        assert!(matches!(
            s.next(&store),
            Err(EngineError::PreconditionNotMet { .. })
        ));
        assert!(!s.is_ready());
    }

    #[test]
    fn test_init_excludes_mastered_and_filters_level() {
        let mut store = store_with(&[(1, 1), (2, 1), (3, 2), (4, 1)]);
        store.mark_mastered(2);
        let mut s = session();
        s.init(&store, 1);
        let mut ids: Vec<u32> = s.active().iter().map(Entry::id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.level(), 1);
    }

    #[test]
    fn test_level_zero_takes_all_levels() {
        let store = store_with(&[(1, 1), (2, 2), (3, 3)]);
        let mut s = session();
        s.init(&store, 0);
        assert_eq!(s.active_len(), 3);
    }

    #[test]
    fn test_iteration_is_cyclic_without_reshuffle() {
        let store = store_with(&[(1, 1), (2, 1), (3, 1)]);
        let mut s = session();
        s.init(&store, 1);
        let first_pass: Vec<u32> = (0..3)
            .map(|_| s.next(&store).unwrap().unwrap().id())
            .collect();
        let second_pass: Vec<u32> = (0..3)
            .map(|_| s.next(&store).unwrap().unwrap().id())
            .collect();
        assert_eq!(first_pass, second_pass);
        let mut sorted = first_pass.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_active_set_yields_none() {
        let mut store = store_with(&[(1, 1)]);
        store.mark_mastered(1);
        let mut s = session();
        s.init(&store, 0);
        assert_eq!(s.next(&store), Ok(None));
        assert!(s.current().is_none());
    }

    #[test]
    fn test_is_ready_for_tracks_level_and_revision() {
        let mut store = store_with(&[(1, 1)]);
        let mut s = session();
        assert!(!s.is_ready_for(&store, 1));
        s.init(&store, 1);
        assert!(s.is_ready_for(&store, 1));
        assert!(!s.is_ready_for(&store, 2));
        store.add_entry(sample(2, 1));
        assert!(!s.is_ready_for(&store, 1));
    }

    #[test]
    fn test_reinit_resets_cursor() {
        let store = store_with(&[(1, 1), (2, 1), (3, 1)]);
        let mut s = session();
        s.init(&store, 1);
        s.next(&store).unwrap();
        s.next(&store).unwrap();
        assert_eq!(s.cursor(), 2);
        s.init(&store, 1);
        assert_eq!(s.cursor(), 0);
        assert!(s.current().is_none());
    }

    #[test]
    fn test_select_clamps_index() {
        let store = store_with(&[(1, 1), (2, 1)]);
        let mut s = session();
        s.init(&store, 0);
        let last = s.active()[1].id();
        assert_eq!(s.select(&store, 99).unwrap().map(Entry::id), Some(last));
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_select_on_empty_set() {
        let store = CorpusStore::new();
        let mut s = session();
        s.init(&store, 0);
        assert_eq!(s.select(&store, 0), Ok(None));
    }
}
