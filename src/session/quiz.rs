use std::collections::HashSet;

use rand::rngs::SmallRng;
use tracing::warn;

use crate::corpus::{CorpusStore, Entry};
use crate::engine::sampling::{random_element, shuffle_copy};
use crate::session::cycle::{SelectionPolicy, Session};

pub const DEFAULT_OPTIONS_COUNT: usize = 4;

/// The answer choices for the current quiz item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptions {
    pub options: Vec<Entry>,
    pub requested: usize,
}

impl QuizOptions {
    /// Fewer distinct entries existed than were asked for. Still usable.
    pub fn is_partial(&self) -> bool {
        self.options.len() < self.requested
    }
}

/// Multiple choice: each new item gets a fresh, shuffled set of options.
#[derive(Clone, Debug)]
pub struct QuizPolicy {
    options_count: usize,
    options: Vec<Entry>,
}

impl QuizPolicy {
    pub fn new(options_count: usize) -> Self {
        Self {
            options_count,
            options: Vec::new(),
        }
    }
}

impl SelectionPolicy for QuizPolicy {
    fn name(&self) -> &'static str {
        "quiz"
    }

    fn on_select(&mut self, store: &CorpusStore, current: &Entry, rng: &mut SmallRng) {
        self.options = build_options(store.entries(), current, self.options_count, rng);
        if self.options.len() < self.options_count {
            warn!(
                found = self.options.len(),
                requested = self.options_count,
                corpus = store.len(),
                "not enough distinct entries for a full set of quiz options"
            );
        }
    }

    fn on_clear(&mut self) {
        self.options.clear();
    }
}

/// Options for `correct`: the answer itself plus distractors drawn at random
/// from the whole corpus, deduplicated by id and shuffled. Drawing gives up
/// after twice the corpus size, so a small corpus yields a short list.
pub fn build_options(
    corpus: &[Entry],
    correct: &Entry,
    options_count: usize,
    rng: &mut SmallRng,
) -> Vec<Entry> {
    let mut options = vec![correct.clone()];
    let mut seen = HashSet::from([correct.id()]);
    let max_attempts = corpus.len() * 2;

    for _ in 0..max_attempts {
        if options.len() >= options_count {
            break;
        }
        let Ok(candidate) = random_element(corpus, rng) else {
            break;
        };
        if seen.insert(candidate.id()) {
            options.push(candidate.clone());
        }
    }

    shuffle_copy(&options, rng)
}

pub type QuizSession = Session<QuizPolicy>;

impl QuizSession {
    pub fn new(options_count: usize) -> Self {
        Session::with_policy(QuizPolicy::new(options_count))
    }

    pub fn options_count(&self) -> usize {
        self.policy().options_count
    }

    /// Takes effect from the next item.
    pub fn set_options_count(&mut self, options_count: usize) {
        self.policy_mut().options_count = options_count;
    }

    pub fn options(&self) -> QuizOptions {
        QuizOptions {
            options: self.policy().options.clone(),
            requested: self.policy().options_count,
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(DEFAULT_OPTIONS_COUNT)
    }
}
