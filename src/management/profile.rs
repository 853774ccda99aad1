use std::{io::Error, path::PathBuf};

use chrono::Utc;

use crate::types::Profile;

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

/// The 24-hour profile cache.
///
/// Holds the last computed profile under a fixed path. Expiry is a
/// read-time filter: `load` returns nothing for a stale profile but does
/// not delete it; `clear` removes it unconditionally on explicit user
/// reset. The cache is only written after the mandatory stages of a run
/// have all succeeded.
pub struct ProfileCache {
    path: PathBuf,
}

impl ProfileCache {
    pub fn new() -> Self {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("audioalign/cache/profile.json");
        Self { path }
    }

    /// Cache rooted at an explicit file path, for tests and alternate
    /// storage locations.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn store(&self, profile: &Profile) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(CacheError::IoError)?;
        }

        let json = serde_json::to_string_pretty(profile).map_err(CacheError::SerdeError)?;
        async_fs::write(&self.path, json)
            .await
            .map_err(CacheError::IoError)
    }

    /// Returns the stored profile only while it is younger than 24 hours.
    /// A missing file and a stale profile both read as "no cached profile".
    pub async fn load(&self) -> Result<Option<Profile>, CacheError> {
        let json = match async_fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(_) => return Ok(None),
        };

        let profile: Profile = serde_json::from_str(&json).map_err(CacheError::SerdeError)?;

        let now = Utc::now().timestamp() as u64;
        if profile.is_fresh(now) {
            Ok(Some(profile))
        } else {
            Ok(None)
        }
    }

    pub async fn clear(&self) -> Result<(), CacheError> {
        async_fs::remove_file(&self.path)
            .await
            .map_err(CacheError::IoError)
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new()
    }
}
