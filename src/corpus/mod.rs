pub mod entry;
pub mod loader;
pub mod store;

pub use entry::Entry;
pub use store::{CorpusStore, LoadReport};
