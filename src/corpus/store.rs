use std::collections::HashSet;

use tracing::{debug, warn};

use crate::corpus::entry::{Entry, FIELD_COUNT};

/// Outcome of a bulk corpus load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub added: usize,
    pub skipped: usize,
    /// Source line of every skipped row, in load order.
    pub skipped_lines: Vec<usize>,
}

impl LoadReport {
    fn skip(&mut self, line: usize) {
        self.skipped += 1;
        self.skipped_lines.push(line);
    }
}

/// All corpus entries plus the set of ids the learner has mastered.
///
/// The store does not check that mastered ids exist in the corpus; importers
/// of external mastery data validate membership first.
#[derive(Clone, Debug, Default)]
pub struct CorpusStore {
    entries: Vec<Entry>,
    ids: HashSet<u32>,
    mastered: Vec<u32>,
    mastered_set: HashSet<u32>,
    revision: u64,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.ids.insert(entry.id());
        self.entries.push(entry);
        self.revision += 1;
    }

    /// Append every well-formed row. A row needs exactly nine fields and a
    /// non-empty id; anything else is skipped. Rows are numbered from 1 in
    /// the report and the logs.
    pub fn load_rows<I, R, S>(&mut self, rows: I) -> LoadReport
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.load_numbered_rows(rows.into_iter().enumerate().map(|(i, row)| (i + 1, row)))
    }

    /// Like [`CorpusStore::load_rows`], for rows paired with the source line
    /// they came from.
    pub fn load_numbered_rows<I, R, S>(&mut self, rows: I) -> LoadReport
    where
        I: IntoIterator<Item = (usize, R)>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();
        for (line, row) in rows {
            let fields: Vec<&str> = row.as_ref().iter().map(AsRef::as_ref).collect();
            let Ok(fields) = <[&str; FIELD_COUNT]>::try_from(fields.as_slice()) else {
                warn!(
                    line,
                    fields = fields.len(),
                    expected = FIELD_COUNT,
                    "skipping corpus row with wrong field count"
                );
                report.skip(line);
                continue;
            };
            if fields[0].trim().is_empty() {
                warn!(line, "skipping corpus row with empty id");
                report.skip(line);
                continue;
            }
            self.add_entry(Entry::from_fields(&fields));
            report.added += 1;
        }
        debug!(
            added = report.added,
            skipped = report.skipped,
            total = self.entries.len(),
            "corpus rows loaded"
        );
        report
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped on every append; engines compare it to know whether their
    /// active set predates the current corpus.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Returns true if the id was not already mastered.
    pub fn mark_mastered(&mut self, id: u32) -> bool {
        if !self.mastered_set.insert(id) {
            return false;
        }
        self.mastered.push(id);
        true
    }

    /// Returns true if the id was present.
    pub fn unmark_mastered(&mut self, id: u32) -> bool {
        if !self.mastered_set.remove(&id) {
            return false;
        }
        self.mastered.retain(|&m| m != id);
        true
    }

    pub fn clear_mastered(&mut self) {
        self.mastered.clear();
        self.mastered_set.clear();
    }

    pub fn is_mastered(&self, id: u32) -> bool {
        self.mastered_set.contains(&id)
    }

    /// Mastered ids in the order they were first marked.
    pub fn mastered_ids(&self) -> &[u32] {
        &self.mastered
    }

    pub fn mastered_len(&self) -> usize {
        self.mastered.len()
    }

    pub fn entries_excluding_mastered(&self) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| !self.mastered_set.contains(&e.id()))
            .cloned()
            .collect()
    }

    pub fn entries_only_mastered(&self) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| self.mastered_set.contains(&e.id()))
            .cloned()
            .collect()
    }
}
