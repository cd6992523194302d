pub mod filter;
pub mod sampling;

pub use filter::{LevelFilter, entries_at_level};
pub use sampling::{random_element, shuffle_copy};
