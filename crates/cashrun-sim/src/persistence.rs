//! Save document storage.
//!
//! The save document is the flat `SaveState` record, written as pretty
//! JSON. File writes go through a temporary sibling and a rename so a
//! crash mid-write never leaves a truncated save behind.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cashrun_core::error::GameResult;
use cashrun_core::state::SaveState;

/// Durable storage for the save document.
pub trait SaveStore {
    fn save_state(&mut self, path: &Path, state: &SaveState) -> GameResult<()>;
    fn load_state(&self, path: &Path) -> GameResult<SaveState>;
}

/// Saves to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileStore;

impl SaveStore for JsonFileStore {
    fn save_state(&mut self, path: &Path, state: &SaveState) -> GameResult<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn load_state(&self, path: &Path) -> GameResult<SaveState> {
        let json = fs::read_to_string(path)?;
        let state: SaveState = serde_json::from_str(&json)?;
        Ok(state)
    }
}

/// Keeps serialized documents in memory. Used by tests and by hosts that
/// persist elsewhere.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: HashMap<PathBuf, String>,
}

impl MemoryStore {
    pub fn document(&self, path: &Path) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }
}

impl SaveStore for MemoryStore {
    fn save_state(&mut self, path: &Path, state: &SaveState) -> GameResult<()> {
        let json = serde_json::to_string_pretty(state)?;
        self.documents.insert(path.to_path_buf(), json);
        Ok(())
    }

    fn load_state(&self, path: &Path) -> GameResult<SaveState> {
        let json = self.documents.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no save document at {}", path.display()),
            )
        })?;
        let state: SaveState = serde_json::from_str(json)?;
        Ok(state)
    }
}

/// Remove a save file. Missing files are not an error.
pub fn delete_save(path: &Path) -> GameResult<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
