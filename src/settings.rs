//! Small on-disk state under the user data directory.
//!
//! Two files: `help_seen` suppresses the help popup on later launches, and
//! `opening.txt` caches the ranked opening suggestions so large word lists are
//! only ranked once. Persistence is disabled when no data directory exists.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{debug_log, info_log};

const APP_DIR: &str = "wordle-assist";
const HELP_SEEN_FILE: &str = "help_seen";
const OPENING_FILE: &str = "opening.txt";
const LOG_FILE: &str = "wordle-assist.log";

#[derive(Debug, Clone)]
pub struct Settings {
    dir: Option<PathBuf>,
}

impl Settings {
    #[must_use]
    pub fn from_data_dir() -> Self {
        Self {
            dir: dirs::data_dir().map(|d| d.join(APP_DIR)),
        }
    }

    #[must_use]
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn file(&self, name: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(name))
    }

    fn ensure_dir(&self) -> io::Result<()> {
        match &self.dir {
            Some(dir) => fs::create_dir_all(dir),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        self.file(LOG_FILE)
    }

    #[must_use]
    pub fn help_seen(&self) -> bool {
        self.file(HELP_SEEN_FILE)
            .and_then(|path| fs::read_to_string(path).ok())
            .is_some_and(|content| content.trim() == "1")
    }

    pub fn mark_help_seen(&self) -> io::Result<()> {
        let Some(path) = self.file(HELP_SEEN_FILE) else {
            return Ok(());
        };
        self.ensure_dir()?;
        fs::write(&path, "1\n")?;
        debug_log!("mark_help_seen() - wrote {}", path.display());
        Ok(())
    }

    pub fn forget_help_seen(&self) -> io::Result<()> {
        let Some(path) = self.file(HELP_SEEN_FILE) else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Cached opening ranking, if it is a reordering of exactly `candidates`.
    #[must_use]
    pub fn read_opening_words(&self, candidates: &[String]) -> Option<Vec<String>> {
        let path = self.file(OPENING_FILE)?;
        let content = fs::read_to_string(&path).ok()?;
        let words: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        let expected: HashSet<&str> = candidates.iter().map(String::as_str).collect();
        let cached: HashSet<&str> = words.iter().map(String::as_str).collect();
        if words.len() != candidates.len() || cached != expected {
            info_log!(
                "read_opening_words() - {} is stale, ignoring",
                path.display()
            );
            return None;
        }
        Some(words)
    }

    pub fn write_opening_words(&self, words: &[String]) -> io::Result<()> {
        let Some(path) = self.file(OPENING_FILE) else {
            return Ok(());
        };
        self.ensure_dir()?;
        let mut content = words.join("\n");
        content.push('\n');
        fs::write(&path, content)?;
        info_log!(
            "write_opening_words() - cached {} words to {}",
            words.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings(name: &str) -> Settings {
        let dir = std::env::temp_dir().join(format!("wordle_assist_{name}"));
        let _ = fs::remove_dir_all(&dir);
        Settings::in_dir(dir)
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_help_flag_round_trip() {
        let settings = temp_settings("help_flag");
        assert!(!settings.help_seen());
        settings.mark_help_seen().unwrap();
        assert!(settings.help_seen());
        settings.forget_help_seen().unwrap();
        assert!(!settings.help_seen());
        settings.forget_help_seen().unwrap();
        let _ = fs::remove_dir_all(settings.dir().unwrap());
    }

    #[test]
    fn test_opening_cache_accepts_reordering() {
        let settings = temp_settings("opening_ok");
        let candidates = words(&["crane", "slate", "raise"]);
        assert!(settings.read_opening_words(&candidates).is_none());

        let ranked = words(&["raise", "slate", "crane"]);
        settings.write_opening_words(&ranked).unwrap();
        assert_eq!(settings.read_opening_words(&candidates), Some(ranked));
        let _ = fs::remove_dir_all(settings.dir().unwrap());
    }

    #[test]
    fn test_opening_cache_rejects_other_list() {
        let settings = temp_settings("opening_stale");
        settings
            .write_opening_words(&words(&["crane", "slate"]))
            .unwrap();
        assert!(
            settings
                .read_opening_words(&words(&["crane", "slate", "raise"]))
                .is_none()
        );
        assert!(
            settings
                .read_opening_words(&words(&["crane", "trace"]))
                .is_none()
        );
        let _ = fs::remove_dir_all(settings.dir().unwrap());
    }

    #[test]
    fn test_disabled_settings_are_inert() {
        let settings = Settings::disabled();
        assert!(!settings.help_seen());
        settings.mark_help_seen().unwrap();
        assert!(!settings.help_seen());
        assert!(settings.log_path().is_none());
        assert!(settings.read_opening_words(&words(&["crane"])).is_none());
        settings.write_opening_words(&words(&["crane"])).unwrap();
    }
}
