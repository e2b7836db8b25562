//! On-disk tree store, one JSON document per token id.

use crate::error::{BonsaiError, Result};
use crate::grid::Grid;
use crate::seed::Seed;
use crate::sim::SimulationState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A minted tree as persisted between waterings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeRecord {
    pub token_id: u64,
    pub minted_at: DateTime<Utc>,
    pub last_watered: DateTime<Utc>,
    pub state: SimulationState,
    /// SVG as of the last change, served without re-rendering
    pub cached_svg: String,
}

impl TreeRecord {
    pub fn growth_steps(&self) -> u64 {
        self.state.step
    }
}

pub struct TreeStore {
    root: PathBuf,
}

impl TreeStore {
    /// Open (creating if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// `<data dir>/pixelbonsai/trees`
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pixelbonsai")
            .join("trees")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, token_id: u64) -> PathBuf {
        self.root.join(format!("{token_id}.json"))
    }

    fn token_ids(&self) -> Result<Vec<u64>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|s| s.to_str()).and_then(|s| s.parse().ok()) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    /// Plant a new tree under the next free token id
    pub fn mint(&self, grid: Grid, seed: Seed) -> Result<TreeRecord> {
        let token_id = self.token_ids()?.last().map_or(1, |last| last + 1);
        let now = Utc::now();
        let state = SimulationState::initialize(grid, seed);
        let record = TreeRecord {
            token_id,
            minted_at: now,
            last_watered: now,
            cached_svg: state.svg(),
            state,
        };
        self.save(&record)?;
        info!(token_id, seed = %seed, "minted bonsai");
        Ok(record)
    }

    pub fn load(&self, token_id: u64) -> Result<TreeRecord> {
        let path = self.path_for(token_id);
        if !path.exists() {
            return Err(BonsaiError::TreeNotFound(token_id));
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, record: &TreeRecord) -> Result<()> {
        let text = serde_json::to_string_pretty(record)?;
        fs::write(self.path_for(record.token_id), text)?;
        Ok(())
    }

    /// Apply one growth step to a stored tree and persist it
    pub fn water(&self, token_id: u64, seed: Seed) -> Result<TreeRecord> {
        let mut record = self.load(token_id)?;
        let score = record.state.water(seed)?;
        record.last_watered = Utc::now();
        record.cached_svg = record.state.svg();
        self.save(&record)?;
        info!(
            token_id,
            step = record.state.step,
            score = score.total,
            can_grow = record.state.can_grow(),
            "watered bonsai"
        );
        Ok(record)
    }

    pub fn burn(&self, token_id: u64) -> Result<()> {
        let path = self.path_for(token_id);
        if !path.exists() {
            return Err(BonsaiError::TreeNotFound(token_id));
        }
        fs::remove_file(path)?;
        info!(token_id, "burned bonsai");
        Ok(())
    }

    /// All stored trees by ascending token id
    pub fn list(&self) -> Result<Vec<TreeRecord>> {
        self.token_ids()?.into_iter().map(|id| self.load(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, TreeStore) {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::open(dir.path().join("trees")).unwrap();
        (dir, store)
    }

    #[test]
    fn mint_assigns_increasing_ids() {
        let (_dir, store) = open_temp();
        let a = store.mint(Grid::default(), Seed::default()).unwrap();
        let b = store.mint(Grid::default(), Seed::from_e8s(1)).unwrap();
        assert_eq!(a.token_id, 1);
        assert_eq!(b.token_id, 2);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn water_persists_growth() {
        let (_dir, store) = open_temp();
        let minted = store.mint(Grid::default(), Seed::default()).unwrap();

        let watered = store.water(minted.token_id, Seed::default()).unwrap();
        assert_eq!(watered.growth_steps(), 1);
        assert!(watered.last_watered >= minted.last_watered);

        let reloaded = store.load(minted.token_id).unwrap();
        assert_eq!(reloaded.state, watered.state);
        assert_eq!(reloaded.cached_svg, watered.state.svg());
    }

    #[test]
    fn watering_a_mature_tree_fails() {
        let (_dir, store) = open_temp();
        let mut record = store.mint(Grid::default(), Seed::default()).unwrap();
        record.state.grow_to_maturity(Seed::default(), 10_000);
        store.save(&record).unwrap();

        let err = store.water(record.token_id, Seed::default()).unwrap_err();
        assert!(matches!(err, BonsaiError::Dormant));
    }

    #[test]
    fn burn_removes_record() {
        let (_dir, store) = open_temp();
        let record = store.mint(Grid::default(), Seed::default()).unwrap();
        store.burn(record.token_id).unwrap();
        assert!(matches!(store.load(record.token_id), Err(BonsaiError::TreeNotFound(1))));
        assert!(matches!(store.burn(record.token_id), Err(BonsaiError::TreeNotFound(1))));
        // ids are not reused while a higher one exists, but an empty store restarts
        assert_eq!(store.mint(Grid::default(), Seed::default()).unwrap().token_id, 1);
    }

    #[test]
    fn oversized_grid_in_record_is_rejected() {
        let (_dir, store) = open_temp();
        let record = store.mint(Grid::default(), Seed::default()).unwrap();
        let path = store.root().join("1.json");
        let text = fs::read_to_string(&path).unwrap();
        let edited = text.replacen("\"width\": 32", "\"width\": 2000000", 1);
        assert_ne!(text, edited);
        fs::write(&path, edited).unwrap();

        assert!(matches!(store.load(record.token_id), Err(BonsaiError::Json(_))));
    }

    #[test]
    fn ignores_foreign_files() {
        let (_dir, store) = open_temp();
        fs::write(store.root().join("notes.txt"), "hello").unwrap();
        fs::write(store.root().join("draft.json"), "{}").unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
