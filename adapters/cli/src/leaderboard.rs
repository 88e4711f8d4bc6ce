//! Persistent top-ten table of wins, fewest moves first.
//!
//! The table lives in a pretty-printed JSON file. A missing or unreadable
//! file is treated as an empty table so that a corrupt save never blocks
//! play. Concurrent sessions writing the same file may lose entries.

use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of entries kept on disk.
pub(crate) const LEADERBOARD_SIZE: usize = 10;
const NAME_LENGTH: usize = 4;
const UNKNOWN_NAME: &str = "????";
const FILE_NAME: &str = "leaderboard.json";

/// One recorded win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Entry {
    /// Four-character upper-case player tag.
    #[serde(default = "unknown_name")]
    pub(crate) name: String,
    /// Turns the player needed to win.
    #[serde(default)]
    pub(crate) moves: u32,
}

fn unknown_name() -> String {
    UNKNOWN_NAME.to_owned()
}

/// Ordered leaderboard bound to its backing file.
#[derive(Clone, Debug)]
pub(crate) struct Leaderboard {
    path: PathBuf,
    entries: Vec<Entry>,
}

impl Leaderboard {
    /// Platform data directory location, e.g. `~/.local/share/cat-chase` on
    /// Linux. `None` when no home directory can be determined.
    pub(crate) fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "cat-chase").map(|dirs| dirs.data_dir().join(FILE_NAME))
    }

    /// Reads the table stored at `path`.
    pub(crate) fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|error| {
                warn!(path = %path.display(), %error, "ignoring malformed leaderboard");
                Vec::new()
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                warn!(path = %path.display(), %error, "leaderboard unreadable");
                Vec::new()
            }
        };

        let mut board = Self { path, entries };
        board.rank();
        board
    }

    /// File backing the table.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in rank order.
    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Adds a win, keeps the best entries and writes the table back.
    pub(crate) fn record(&mut self, name: &str, moves: u32) -> Result<()> {
        let name = normalize_name(name);
        debug!(%name, moves, "recording score");
        self.entries.push(Entry { name, moves });
        self.rank();
        self.save()
    }

    /// Human-readable table.
    pub(crate) fn render(&self) -> String {
        if self.entries.is_empty() {
            return "No scores yet.".to_owned();
        }

        let mut table = String::from("Top scores (fewest moves):");
        for (rank, entry) in self.entries.iter().enumerate() {
            let _ = write!(table, "\n{:>2}. {:<4} {:>4}", rank + 1, entry.name, entry.moves);
        }
        table
    }

    fn rank(&mut self) {
        self.entries
            .sort_by(|a, b| a.moves.cmp(&b.moves).then_with(|| a.name.cmp(&b.name)));
        self.entries.truncate(LEADERBOARD_SIZE);
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .context("failed to serialize leaderboard")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

/// Trims a player name to its first four characters in upper case.
pub(crate) fn normalize_name(name: &str) -> String {
    let tag = name
        .chars()
        .take(NAME_LENGTH)
        .collect::<String>()
        .trim()
        .to_uppercase();
    if tag.is_empty() {
        unknown_name()
    } else {
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn board_in(dir: &TempDir) -> Leaderboard {
        Leaderboard::load(dir.path().join(FILE_NAME))
    }

    #[test]
    fn names_are_cut_to_four_upper_case_characters() {
        assert_eq!(normalize_name("alice"), "ALIC");
        assert_eq!(normalize_name("bo"), "BO");
        assert_eq!(normalize_name(" ab "), "AB");
        assert_eq!(normalize_name(""), "????");
        assert_eq!(normalize_name("    x"), "????");
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().expect("temp dir");
        let board = board_in(&dir);

        assert!(board.entries().is_empty());
        assert_eq!(board.render(), "No scores yet.");
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join(FILE_NAME), "{not json").expect("write");

        assert!(board_in(&dir).entries().is_empty());
    }

    #[test]
    fn records_persist_in_rank_order() {
        let dir = TempDir::new().expect("temp dir");
        let mut board = board_in(&dir);
        board.record("zed", 12).expect("record");
        board.record("amy", 12).expect("record");
        board.record("bob", 4).expect("record");

        let reloaded = board_in(&dir);
        let ranked: Vec<(&str, u32)> = reloaded
            .entries()
            .iter()
            .map(|entry| (entry.name.as_str(), entry.moves))
            .collect();
        assert_eq!(ranked, vec![("BOB", 4), ("AMY", 12), ("ZED", 12)]);
    }

    #[test]
    fn only_the_best_ten_are_kept() {
        let dir = TempDir::new().expect("temp dir");
        let mut board = board_in(&dir);
        for moves in (1..=12).rev() {
            board.record("p", moves).expect("record");
        }

        let reloaded = board_in(&dir);
        assert_eq!(reloaded.entries().len(), LEADERBOARD_SIZE);
        assert_eq!(reloaded.entries().first().map(|entry| entry.moves), Some(1));
        assert_eq!(reloaded.entries().last().map(|entry| entry.moves), Some(10));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(
            dir.path().join(FILE_NAME),
            r#"[{"moves": 9}, {"name": "KIM"}]"#,
        )
        .expect("write");

        let board = board_in(&dir);
        assert_eq!(
            board.entries(),
            &[
                Entry {
                    name: "KIM".to_owned(),
                    moves: 0
                },
                Entry {
                    name: "????".to_owned(),
                    moves: 9
                },
            ]
        );
    }

    #[test]
    fn render_lists_ranks() {
        let dir = TempDir::new().expect("temp dir");
        let mut board = board_in(&dir);
        board.record("ann", 7).expect("record");

        assert_eq!(board.render(), "Top scores (fewest moves):\n 1. ANN     7");
    }

    #[test]
    fn nested_paths_are_created_on_save() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("deep").join("nested").join(FILE_NAME);
        let mut board = Leaderboard::load(&path);
        board.record("ann", 3).expect("record");

        assert!(path.exists());
        assert_eq!(board.path(), path.as_path());
    }
}
