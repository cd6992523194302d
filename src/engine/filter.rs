use crate::corpus::Entry;

/// Level selector used by the session engines. Level 0 means every level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelFilter {
    pub level: u32,
}

impl LevelFilter {
    pub fn new(level: u32) -> Self {
        Self { level }
    }

    pub fn apply(&self, entries: Vec<Entry>) -> Vec<Entry> {
        if self.level == 0 {
            return entries;
        }
        entries_at_level(&entries, self.level)
    }
}

/// Entries whose level equals `level`, in the order they appear in `source`.
pub fn entries_at_level(source: &[Entry], level: u32) -> Vec<Entry> {
    source
        .iter()
        .filter(|e| e.level() == level)
        .cloned()
        .collect()
}
