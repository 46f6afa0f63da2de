//! Lifetime statistics, persisted as pretty JSON after every answer.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog;

/// Cumulative counters for one symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStat {
    pub correct: u32,
    pub attempts: u32,
}

/// The persisted record. Field names are the on-disk format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_correct: u32,
    pub total_attempts: u32,
    pub hiragana_stats: BTreeMap<String, CardStat>,
    pub streak: u32,
    pub longest_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_session: Option<String>,
}

impl GlobalStats {
    /// All-zero record with an entry for every catalog symbol.
    fn with_catalog() -> Self {
        let mut stats = Self::default();
        stats.backfill_catalog();
        stats
    }

    /// Ensure every catalog symbol has an entry. Entries for symbols outside
    /// the current catalog are kept as-is.
    fn backfill_catalog(&mut self) {
        for card in catalog::all_cards() {
            self.hiragana_stats
                .entry(card.symbol.to_string())
                .or_default();
        }
    }

    /// Counter sanity checks; a record that fails any of these is treated
    /// the same as an unparsable file.
    fn is_valid(&self) -> bool {
        self.total_correct <= self.total_attempts
            && self.streak <= self.longest_streak
            && self
                .hiragana_stats
                .values()
                .all(|s| s.correct <= s.attempts)
    }

    /// Lifetime accuracy in [0, 1]; 0 when nothing was attempted.
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_attempts)
        }
    }
}

/// Owns the stats record and its file on disk.
pub struct StatsStore {
    path: PathBuf,
    pub stats: GlobalStats,
}

impl StatsStore {
    /// Default location, kept beside the process like the config of old
    /// terminal tools: the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("kana_stats.json")
    }

    /// Load the record, falling back silently to an all-zero record on a
    /// missing file, a parse error, or inconsistent counters.
    pub fn load(path: PathBuf) -> Self {
        let stats = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str::<GlobalStats>(&json).ok())
            .filter(GlobalStats::is_valid)
            .map(|mut stats| {
                stats.backfill_catalog();
                stats
            })
            .unwrap_or_else(GlobalStats::with_catalog);

        Self { path, stats }
    }

    /// Fold one answer into the record and persist immediately.
    ///
    /// The in-memory update always applies; only the write can fail, and the
    /// caller decides how to report that.
    pub fn record_answer(&mut self, symbol: &str, is_correct: bool) -> Result<()> {
        let entry = self
            .stats
            .hiragana_stats
            .entry(symbol.to_string())
            .or_default();
        entry.attempts += 1;
        self.stats.total_attempts += 1;

        if is_correct {
            entry.correct += 1;
            self.stats.total_correct += 1;
            self.stats.streak += 1;
            self.stats.longest_streak = self.stats.longest_streak.max(self.stats.streak);
        } else {
            self.stats.streak = 0;
        }

        self.stats.last_session =
            Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.stats)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write stats file: {:?}", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> StatsStore {
        StatsStore::load(dir.path().join("stats.json"))
    }

    #[test]
    fn missing_file_yields_zeroed_record_for_every_symbol() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.stats.total_correct, 0);
        assert_eq!(store.stats.total_attempts, 0);
        assert_eq!(store.stats.streak, 0);
        assert_eq!(store.stats.longest_streak, 0);
        assert!(store.stats.last_session.is_none());
        assert_eq!(store.stats.hiragana_stats.len(), catalog::all_cards().len());
        assert!(store
            .stats
            .hiragana_stats
            .values()
            .all(|s| s.correct == 0 && s.attempts == 0));
    }

    #[test]
    fn garbage_file_falls_back_silently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "{ not json").unwrap();

        let store = StatsStore::load(path);
        assert_eq!(store.stats.total_attempts, 0);
        assert_eq!(store.stats.hiragana_stats.len(), catalog::all_cards().len());
    }

    #[test]
    fn inconsistent_counters_are_treated_as_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(
            &path,
            r#"{"total_correct": 9, "total_attempts": 3, "hiragana_stats": {}, "streak": 0, "longest_streak": 0}"#,
        )
        .unwrap();

        let store = StatsStore::load(path);
        assert_eq!(store.stats.total_correct, 0);
        assert_eq!(store.stats.total_attempts, 0);
    }

    #[test]
    fn record_answer_updates_counters_and_streaks() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.record_answer("あ", true).unwrap();
        store.record_answer("あ", true).unwrap();
        store.record_answer("い", false).unwrap();
        store.record_answer("あ", true).unwrap();

        let a = store.stats.hiragana_stats["あ"];
        assert_eq!(a, CardStat { correct: 3, attempts: 3 });
        let i = store.stats.hiragana_stats["い"];
        assert_eq!(i, CardStat { correct: 0, attempts: 1 });

        assert_eq!(store.stats.total_correct, 3);
        assert_eq!(store.stats.total_attempts, 4);
        assert_eq!(store.stats.streak, 1);
        assert_eq!(store.stats.longest_streak, 2);
        assert!(store.stats.last_session.is_some());
        assert!(store.stats.is_valid());
    }

    #[test]
    fn record_answer_persists_across_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.json");

        let mut store = StatsStore::load(path.clone());
        store.record_answer("か", true).unwrap();
        store.record_answer("か", false).unwrap();

        let reloaded = StatsStore::load(path);
        assert_eq!(reloaded.stats.total_attempts, 2);
        assert_eq!(reloaded.stats.total_correct, 1);
        assert_eq!(
            reloaded.stats.hiragana_stats["か"],
            CardStat { correct: 1, attempts: 1 }
        );
    }

    #[test]
    fn unknown_symbol_gets_a_lazy_entry() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.record_answer("が", true).unwrap();
        assert_eq!(
            store.stats.hiragana_stats["が"],
            CardStat { correct: 1, attempts: 1 }
        );
    }

    #[test]
    fn save_failure_keeps_the_in_memory_update() {
        let dir = TempDir::new().unwrap();
        // A directory at the stats path makes every write fail.
        let path = dir.path().join("stats.json");
        fs::create_dir(&path).unwrap();

        let mut store = StatsStore::load(path);
        assert!(store.record_answer("あ", true).is_err());
        assert_eq!(store.stats.total_correct, 1);
        assert_eq!(store.stats.streak, 1);
    }

    #[test]
    fn longest_streak_is_monotone() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut best = 0;
        for correct in [true, true, true, false, true, false, true, true] {
            store.record_answer("ん", correct).unwrap();
            assert!(store.stats.longest_streak >= best);
            best = store.stats.longest_streak;
        }
        assert_eq!(store.stats.longest_streak, 3);
        assert_eq!(store.stats.streak, 2);
    }
}
