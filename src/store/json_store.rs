use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Persists the mastered-id list as a JSON array of integers.
pub struct MasteryStore {
    path: PathBuf,
}

impl MasteryStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file means nothing mastered yet. A file that does not parse
    /// is an error: dropping it silently would lose the learner's progress.
    pub fn load_ids(&self) -> Result<Vec<u32>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no mastery file yet");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let ids: Vec<u32> = serde_json::from_str(&content)
            .with_context(|| format!("decoding mastery ids from {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = ids.len(), "mastery ids read");
        Ok(ids)
    }

    /// Write through a temporary file so a crash never leaves a half-written
    /// list behind.
    pub fn save_ids(&self, ids: &[u32]) -> Result<()> {
        let tmp_path = self.path.with_extension("tmp");

        let json = serde_json::to_string(ids)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), count = ids.len(), "mastery ids written");
        Ok(())
    }
}
