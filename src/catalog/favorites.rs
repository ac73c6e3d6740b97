use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::PathBuf;

use super::filter::fold_diacritics;

/// Persisted set of favorited game names.
///
/// Names are kept as written, one per line in the backing file, but
/// membership is always tested through diacritic folding so favorite
/// status survives locale variants of the same name.
pub struct FavoritesLedger {
    /// Backing file, one name per line
    path: PathBuf,
    /// Raw names; the sorted set makes every save deterministic
    names: BTreeSet<String>,
}

impl FavoritesLedger {
    /// Load the ledger from disk. A missing file is an empty ledger,
    /// not an error.
    pub fn load(path: PathBuf) -> Self {
        let names = match fs::read_to_string(&path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                warn!("Favorites file {} not readable ({}), starting empty", path.display(), e);
                BTreeSet::new()
            }
        };

        info!("Loaded {} favorites from {}", names.len(), path.display());
        Self { path, names }
    }

    /// Folded names, for bulk membership tests at catalog load time
    pub fn folded_set(&self) -> HashSet<String> {
        self.names.iter().map(|name| fold_diacritics(name)).collect()
    }

    /// Folded membership test for a single name
    pub fn contains(&self, name: &str) -> bool {
        let folded = fold_diacritics(name);
        self.names.iter().any(|entry| fold_diacritics(entry) == folded)
    }

    /// Add or remove a name. Removal drops every entry whose folded
    /// form matches, mirroring the folded membership test.
    pub fn toggle(&mut self, name: &str, favorite: bool) {
        if favorite {
            self.names.insert(name.trim().to_string());
        } else {
            let folded = fold_diacritics(name);
            self.names.retain(|entry| fold_diacritics(entry) != folded);
        }
    }

    /// Rewrite the backing file in full: one name per line, sorted.
    pub fn save(&self) -> Result<()> {
        let mut contents = String::new();
        for name in &self.names {
            contents.push_str(name);
            contents.push('\n');
        }

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write favorites file: {}", self.path.display()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_empty_ledger() {
        let dir = tempdir().unwrap();
        let ledger = FavoritesLedger::load(dir.path().join("favorites.txt"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn toggle_save_reload_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.txt");

        let mut ledger = FavoritesLedger::load(path.clone());
        ledger.toggle("Pac Man", true);
        ledger.save().unwrap();

        let reloaded = FavoritesLedger::load(path.clone());
        assert!(reloaded.contains("Pac Man"));

        let mut reloaded = reloaded;
        reloaded.toggle("Pac Man", false);
        reloaded.save().unwrap();

        assert!(!FavoritesLedger::load(path).contains("Pac Man"));
    }

    #[test]
    fn save_is_sorted_and_deterministic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.txt");

        let mut ledger = FavoritesLedger::load(path.clone());
        ledger.toggle("Zelda", true);
        ledger.toggle("Asteroids", true);
        ledger.save().unwrap();
        let first = fs::read_to_string(&path).unwrap();

        ledger.save().unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, "Asteroids\nZelda\n");
        assert_eq!(first, second);
    }

    #[test]
    fn membership_and_removal_fold_diacritics() {
        let dir = tempdir().unwrap();
        let mut ledger = FavoritesLedger::load(dir.path().join("favorites.txt"));

        ledger.toggle("Oyün", true);
        assert!(ledger.contains("Oyun"));
        assert!(ledger.contains("OYÜN"));

        ledger.toggle("Oyun", false);
        assert!(ledger.is_empty());
    }
}
