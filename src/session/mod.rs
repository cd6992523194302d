pub mod cycle;
pub mod listening;
pub mod quiz;
pub mod typing;

pub use cycle::{SelectionPolicy, Session};
pub use listening::ListeningSession;
pub use quiz::{QuizOptions, QuizSession};
pub use typing::TypingSession;
