//! Profile persistence
//!
//! Features:
//! - One JSON record per profile, under a fixed key
//! - Missing or corrupt records load as defaults
//! - Synchronous save after every profile mutation
//!
//! Backends: in-memory (tests, headless), JSON file (native),
//! LocalStorage (web).

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;
mod memory;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

use crate::profile::Profile;

/// Persistence failures. Never fatal to play: callers log and continue.
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value slot holding the profile record
pub trait ProfileStore {
    /// Raw record, `None` if nothing has been stored yet
    fn read(&self) -> Result<Option<String>, PersistError>;

    /// Replace the stored record
    fn write(&mut self, record: &str) -> Result<(), PersistError>;

    /// Load the profile, recovering to defaults on any failure
    fn load_profile(&self) -> Profile {
        match self.read() {
            Ok(Some(json)) => Profile::from_json_or_default(&json),
            Ok(None) => {
                log::info!("No profile found, starting fresh");
                Profile::default()
            }
            Err(e) => {
                log::warn!("Profile load failed: {}", e);
                Profile::default()
            }
        }
    }

    /// Serialize and write the profile
    fn save_profile(&mut self, profile: &Profile) -> Result<(), PersistError> {
        let json = profile.to_json()?;
        self.write(&json)
    }
}
