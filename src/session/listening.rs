use crate::session::cycle::{SelectionPolicy, Session};

/// Listening playback: the plain lifecycle, nothing extra per item.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListeningPolicy;

impl SelectionPolicy for ListeningPolicy {
    fn name(&self) -> &'static str {
        "listening"
    }
}

pub type ListeningSession = Session<ListeningPolicy>;

impl ListeningSession {
    pub fn new() -> Self {
        Session::with_policy(ListeningPolicy)
    }
}

impl Default for ListeningSession {
    fn default() -> Self {
        Self::new()
    }
}
