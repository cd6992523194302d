//! The operations a UI host drives: corpus and mastery management plus the
//! three drill sessions. `Host` owns every piece of state; nothing is global.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::corpus::{CorpusStore, Entry, LoadReport};
use crate::engine::filter::LevelFilter;
use crate::engine::sampling::shuffle_copy;
use crate::error::{EngineError, Result};
use crate::session::quiz::DEFAULT_OPTIONS_COUNT;
use crate::session::{ListeningSession, QuizOptions, QuizSession, TypingSession};
use crate::typing::{LanguageMode, validate};

/// Counts from replacing the mastery set with externally stored ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MasteryImport {
    pub added: usize,
    /// Ids not present in the corpus.
    pub skipped: usize,
    pub duplicates: usize,
}

pub struct Host {
    store: CorpusStore,
    corpus_loaded: bool,
    listening: ListeningSession,
    quiz: QuizSession,
    typing: TypingSession,
    rng: SmallRng,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    pub fn new() -> Self {
        Self {
            store: CorpusStore::new(),
            corpus_loaded: false,
            listening: ListeningSession::new(),
            quiz: QuizSession::new(DEFAULT_OPTIONS_COUNT),
            typing: TypingSession::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic shuffles for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            store: CorpusStore::new(),
            corpus_loaded: false,
            listening: ListeningSession::new().with_rng(SmallRng::seed_from_u64(seed)),
            quiz: QuizSession::new(DEFAULT_OPTIONS_COUNT)
                .with_rng(SmallRng::seed_from_u64(seed.wrapping_add(1))),
            typing: TypingSession::new().with_rng(SmallRng::seed_from_u64(seed.wrapping_add(2))),
            rng: SmallRng::seed_from_u64(seed.wrapping_add(3)),
        }
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    fn require_corpus(&self, operation: &'static str) -> Result<()> {
        if self.corpus_loaded {
            Ok(())
        } else {
            Err(EngineError::precondition(operation, "a loaded corpus"))
        }
    }

    /// Append corpus rows. Malformed rows are skipped, not fatal.
    pub fn load_corpus<I, R, S>(&mut self, rows: I) -> LoadReport
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let report = self.store.load_rows(rows);
        self.finish_load(report)
    }

    /// Append rows read from a file, keeping their line numbers for the
    /// report.
    pub fn load_numbered_corpus<I, R, S>(&mut self, rows: I) -> LoadReport
    where
        I: IntoIterator<Item = (usize, R)>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let report = self.store.load_numbered_rows(rows);
        self.finish_load(report)
    }

    fn finish_load(&mut self, report: LoadReport) -> LoadReport {
        self.corpus_loaded = true;
        info!(
            added = report.added,
            skipped = report.skipped,
            total = self.store.len(),
            "corpus loaded"
        );
        report
    }

    /// Replace the mastery set with `ids`, keeping only ids the corpus knows.
    pub fn set_mastery_ids(&mut self, ids: &[u32]) -> Result<MasteryImport> {
        self.require_corpus("set_mastery_ids")?;
        let known: HashSet<u32> = self.store.entries().iter().map(Entry::id).collect();

        self.store.clear_mastered();
        let mut import = MasteryImport::default();
        for &id in ids {
            if !known.contains(&id) {
                import.skipped += 1;
            } else if self.store.mark_mastered(id) {
                import.added += 1;
            } else {
                import.duplicates += 1;
            }
        }
        if import.skipped > 0 {
            warn!(
                skipped = import.skipped,
                "stored mastery ids not found in the corpus were dropped"
            );
        }
        info!(
            added = import.added,
            duplicates = import.duplicates,
            "mastery ids restored"
        );
        Ok(import)
    }

    /// Returns the new number of mastered ids.
    pub fn mark_mastered(&mut self, id: u32) -> Result<usize> {
        self.require_corpus("mark_mastered")?;
        if !self.store.contains_id(id) {
            return Err(EngineError::invalid(
                "id",
                format!("{id} is not in the corpus"),
            ));
        }
        self.store.mark_mastered(id);
        Ok(self.store.mastered_len())
    }

    /// Returns the new number of mastered ids. Unknown ids are ignored.
    pub fn unmark_mastered(&mut self, id: u32) -> Result<usize> {
        self.require_corpus("unmark_mastered")?;
        self.store.unmark_mastered(id);
        Ok(self.store.mastered_len())
    }

    pub fn clear_mastered(&mut self) -> Result<usize> {
        self.require_corpus("clear_mastered")?;
        self.store.clear_mastered();
        Ok(self.store.mastered_len())
    }

    /// Mastered ids in insertion order, for the storage collaborator.
    pub fn mastered_ids(&self) -> &[u32] {
        self.store.mastered_ids()
    }

    /// Level 0 lists the mastered entries; any other level lists unmastered
    /// entries at that level. Results are shuffled.
    pub fn search_entries(&mut self, level: u32) -> Result<Vec<Entry>> {
        self.require_corpus("search_entries")?;
        let found = if level == 0 {
            self.store.entries_only_mastered()
        } else {
            LevelFilter::new(level).apply(self.store.entries_excluding_mastered())
        };
        Ok(shuffle_copy(&found, &mut self.rng))
    }

    /// Build the listening set unless it is already built for `level`.
    /// Returns the number of items available.
    pub fn start_listening(&mut self, level: u32) -> Result<usize> {
        self.require_corpus("start_listening")?;
        if !self.listening.is_ready_for(&self.store, level) {
            self.listening.init(&self.store, level);
        }
        Ok(self.listening.active_len())
    }

    pub fn next_listening_item(&mut self) -> Result<Option<Entry>> {
        self.require_corpus("next_listening_item")?;
        if !self.listening.is_ready() {
            return Err(EngineError::precondition(
                "next_listening_item",
                "start_listening",
            ));
        }
        Ok(self.listening.next(&self.store)?.cloned())
    }

    /// Build the quiz set unless it is already built for `level` with the
    /// same number of options. Returns the number of items available.
    pub fn start_quiz(&mut self, level: u32, options_count: usize) -> Result<usize> {
        self.require_corpus("start_quiz")?;
        if options_count == 0 {
            return Err(EngineError::invalid(
                "options_count",
                "at least one option is required",
            ));
        }
        if !self.quiz.is_ready_for(&self.store, level) || self.quiz.options_count() != options_count
        {
            self.quiz.set_options_count(options_count);
            self.quiz.init(&self.store, level);
        }
        Ok(self.quiz.active_len())
    }

    pub fn next_quiz_item(&mut self) -> Result<Option<Entry>> {
        self.require_corpus("next_quiz_item")?;
        if !self.quiz.is_ready() {
            return Err(EngineError::precondition("next_quiz_item", "start_quiz"));
        }
        Ok(self.quiz.next(&self.store)?.cloned())
    }

    pub fn current_quiz_options(&self) -> Result<QuizOptions> {
        self.require_corpus("current_quiz_options")?;
        if self.quiz.current().is_none() {
            return Err(EngineError::precondition(
                "current_quiz_options",
                "a quiz item from next_quiz_item",
            ));
        }
        Ok(self.quiz.options())
    }

    /// Always reshuffles. Returns the number of items available.
    pub fn start_typing(&mut self) -> Result<usize> {
        self.require_corpus("start_typing")?;
        self.typing.init(&self.store, 0);
        Ok(self.typing.active_len())
    }

    /// Select the typing item at `index`, clamped into range.
    pub fn typing_item_at(&mut self, index: usize) -> Result<Option<Entry>> {
        self.require_corpus("typing_item_at")?;
        if !self.typing.is_ready() {
            return Err(EngineError::precondition("typing_item_at", "start_typing"));
        }
        Ok(self.typing.select(&self.store, index)?.cloned())
    }

    pub fn tokens_for(&self, mode: LanguageMode) -> Result<&[String]> {
        self.require_corpus("tokens_for")?;
        if self.typing.current().is_none() {
            return Err(EngineError::precondition("tokens_for", "typing_item_at"));
        }
        Ok(self.typing.tokens(mode))
    }

    /// Index of the first untyped token after the learner's input so far.
    pub fn on_keystroke(&self, input: &str, index: usize, mode: LanguageMode) -> Result<usize> {
        let tokens = self.tokens_for(mode)?;
        Ok(validate(tokens, index, input))
    }
}
