//! Browser LocalStorage profile slot (web only)

use super::{PersistError, ProfileStore};
use crate::consts::PROFILE_KEY;

/// Reads and writes the record under `PROFILE_KEY` in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("localStorage".to_string()))
    }
}

impl ProfileStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        let storage = Self::storage()?;
        storage
            .get_item(PROFILE_KEY)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))
    }

    fn write(&mut self, record: &str) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        storage
            .set_item(PROFILE_KEY, record)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))?;
        log::info!("Profile saved");
        Ok(())
    }
}
