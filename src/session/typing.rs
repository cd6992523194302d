use rand::rngs::SmallRng;

use crate::corpus::{CorpusStore, Entry};
use crate::engine::filter::LevelFilter;
use crate::session::cycle::{SelectionPolicy, Session};
use crate::typing::{LanguageMode, tokenize};

/// Typing practice over the whole corpus. Mastered entries and levels are
/// ignored: typing is free practice rather than review.
#[derive(Clone, Debug, Default)]
pub struct TypingPolicy {
    english: Vec<String>,
    japanese: Vec<String>,
}

impl TypingPolicy {
    pub fn tokens(&self, mode: LanguageMode) -> &[String] {
        match mode {
            LanguageMode::English => &self.english,
            LanguageMode::Japanese => &self.japanese,
        }
    }
}

impl SelectionPolicy for TypingPolicy {
    fn name(&self) -> &'static str {
        "typing"
    }

    fn candidates(&self, store: &CorpusStore, _filter: LevelFilter) -> Vec<Entry> {
        store.entries().to_vec()
    }

    fn on_select(&mut self, _store: &CorpusStore, current: &Entry, _rng: &mut SmallRng) {
        self.english = tokenize(current.example_en());
        self.japanese = tokenize(current.kana());
    }

    fn on_clear(&mut self) {
        self.english.clear();
        self.japanese.clear();
    }
}

pub type TypingSession = Session<TypingPolicy>;

impl TypingSession {
    pub fn new() -> Self {
        Session::with_policy(TypingPolicy::default())
    }

    /// Tokens of the current item's text for `mode`; empty when no item is
    /// selected.
    pub fn tokens(&self, mode: LanguageMode) -> &[String] {
        self.policy().tokens(mode)
    }
}

impl Default for TypingSession {
    fn default() -> Self {
        Self::new()
    }
}
