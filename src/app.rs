use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::corpus::loader;
use crate::host::Host;
use crate::store::MasteryStore;

/// Wires the engine to its collaborators: corpus source, mastery file and
/// config. Every mastery mutation is written back immediately.
pub struct App {
    pub config: Config,
    host: Host,
    mastery: MasteryStore,
}

impl App {
    pub fn new(config: Config, seed: Option<u64>) -> Result<Self> {
        let mastery = MasteryStore::new(PathBuf::from(&config.mastery_path))?;
        let host = match seed {
            Some(seed) => Host::with_seed(seed),
            None => Host::new(),
        };
        let mut app = Self {
            config,
            host,
            mastery,
        };
        app.load_corpus()?;
        app.restore_mastery()?;
        Ok(app)
    }

    fn load_corpus(&mut self) -> Result<()> {
        let text = match &self.config.corpus_url {
            Some(url) => {
                info!(%url, "fetching corpus");
                loader::fetch_url(url)?
            }
            None => loader::read_file(Path::new(&self.config.corpus_path))?,
        };
        let report = self.host.load_numbered_corpus(loader::read_rows(&text));
        if report.skipped > 0 {
            warn!(lines = ?report.skipped_lines, "corpus rows skipped");
        }
        if report.added == 0 {
            anyhow::bail!("corpus contains no usable rows ({} skipped)", report.skipped);
        }
        Ok(())
    }

    fn restore_mastery(&mut self) -> Result<()> {
        let stored = self
            .mastery
            .load_ids()
            .context("restoring mastered words")?;
        let import = self.host.set_mastery_ids(&stored)?;
        if import.skipped > 0 || import.duplicates > 0 {
            // Rewrite so the file only holds ids this corpus knows.
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.mastery.save_ids(self.host.mastered_ids())
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    pub fn mark_mastered(&mut self, id: u32) -> Result<usize> {
        let size = self.host.mark_mastered(id)?;
        self.persist()?;
        Ok(size)
    }

    pub fn unmark_mastered(&mut self, id: u32) -> Result<usize> {
        let size = self.host.unmark_mastered(id)?;
        self.persist()?;
        Ok(size)
    }

    pub fn clear_mastered(&mut self) -> Result<usize> {
        let size = self.host.clear_mastered()?;
        self.persist()?;
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CORPUS: &str = "id\tword\tdef_en\tdef_ja\tex_en\tex_ja\tkana\tlevel\tsimilar\n\
        1\tapple\ta fruit\tりんご\tAn apple.\tりんごだ。\tりんご\t1\t\n\
        2\tpen\ta tool\tペン\tA pen.\tペンだ。\tぺん\t2\t\n";

    fn config_in(dir: &TempDir) -> Config {
        let corpus_path = dir.path().join("word.csv");
        fs::write(&corpus_path, CORPUS).unwrap();
        Config {
            corpus_path: corpus_path.to_string_lossy().to_string(),
            mastery_path: dir.path().join("mastered.json").to_string_lossy().to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_mutations_are_persisted() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut app = App::new(config.clone(), Some(1)).unwrap();
        assert_eq!(app.mark_mastered(2).unwrap(), 1);

        let reopened = App::new(config, Some(1)).unwrap();
        assert_eq!(reopened.host().mastered_ids(), &[2]);
    }

    #[test]
    fn test_unknown_stored_ids_are_dropped_from_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(dir.path().join("mastered.json"), "[1, 77]").unwrap();

        let app = App::new(config, Some(1)).unwrap();
        assert_eq!(app.host().mastered_ids(), &[1]);
        let on_disk = fs::read_to_string(dir.path().join("mastered.json")).unwrap();
        assert_eq!(on_disk, "[1]");
    }

    #[test]
    fn test_clear_mastered_writes_empty_list() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut app = App::new(config, Some(1)).unwrap();
        app.mark_mastered(1).unwrap();
        app.unmark_mastered(1).unwrap();
        app.mark_mastered(2).unwrap();
        assert_eq!(app.clear_mastered().unwrap(), 0);
        let on_disk = fs::read_to_string(dir.path().join("mastered.json")).unwrap();
        assert_eq!(on_disk, "[]");
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        let empty = dir.path().join("empty.csv");
        fs::write(&empty, "id\tword\n").unwrap();
        config.corpus_path = empty.to_string_lossy().to_string();
        assert!(App::new(config, None).is_err());
    }
}
