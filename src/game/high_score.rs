//! High score persistence.
//!
//! The record is a single decimal number in a text file. A missing or unreadable record counts as
//! zero; a failed save is logged and otherwise ignored.

use std::io;
use std::path::{Path, PathBuf};

pub const HIGH_SCORE_FILE: &str = "highscore";

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    /// Store backed by `<save_dir>/highscore`.
    pub fn new(save_dir: &Path) -> Self {
        Self {
            path: save_dir.join(HIGH_SCORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored high score, or 0 if there is none.
    pub fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => parse_high_score(&text),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("Failed to read high score {}: {e}", self.path.display());
                }
                0
            }
        }
    }

    /// Writes `score`, creating the save directory if needed.
    pub fn save(&self, score: u32) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, score.to_string())
    }
}

/// Parses the leading decimal number on the first line, skipping leading whitespace.
///
/// Anything after the digits is ignored. No digits, or a value that does not fit, gives 0.
pub fn parse_high_score(text: &str) -> u32 {
    let line = text.lines().next().unwrap_or("").trim_start();
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    line[..digits_end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "bamboo-flight-{name}-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ))
    }

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score("42"), 42);
        assert_eq!(parse_high_score("  17\n99"), 17);
        assert_eq!(parse_high_score("123abc"), 123);
        assert_eq!(parse_high_score(""), 0);
        assert_eq!(parse_high_score("abc"), 0);
        assert_eq!(parse_high_score("-5"), 0);
        assert_eq!(parse_high_score("99999999999999"), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = temp_dir("roundtrip");
        let store = HighScoreStore::new(&dir.join("nested"));

        assert_eq!(store.load(), 0);
        store.save(1234).expect("save");
        assert_eq!(store.load(), 1234);
        store.save(7).expect("save");
        assert_eq!(store.load(), 7);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_loads_as_zero() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).expect("create dir");
        let store = HighScoreStore::new(&dir);
        std::fs::write(store.path(), "not a number").expect("write");

        assert_eq!(store.load(), 0);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
