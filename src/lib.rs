//! Practice-session engine for a bilingual vocabulary corpus: listening
//! playback, multiple-choice quizzes and romaji typing drills over the words a
//! learner has not yet mastered.

pub mod app;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod host;
pub mod session;
pub mod store;
pub mod typing;

pub use error::{EngineError, Result};
pub use host::Host;
