//! Local persistence for the user identity and the onboarding-seen flag.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::user::UserAccount;

/// Synchronous key-value/file persistence for the user identity.
///
/// Callers invoke these from a single-threaded context; concurrent writers
/// are not expected. A missing record is a normal cold-start signal, so
/// `load` returns `Ok(None)` rather than an error.
pub trait UserStore: Send + Sync {
    /// Load the persisted identity, if any.
    fn load(&self) -> Result<Option<UserAccount>, StorageError>;

    /// Persist the identity record, replacing any previous one.
    fn save(&self, account: &UserAccount) -> Result<(), StorageError>;

    /// Remove the persisted identity. Deleting an absent record is fine.
    fn delete(&self) -> Result<(), StorageError>;

    /// Whether the user has completed onboarding before.
    fn has_seen_onboarding(&self) -> bool;

    fn set_has_seen_onboarding(&self, seen: bool) -> Result<(), StorageError>;
}

const USER_FILE: &str = "user.json";
const PREFS_FILE: &str = "prefs.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Prefs {
    #[serde(default)]
    has_seen_onboarding: bool,
}

/// File-backed store — JSON records under a data directory.
pub struct FileUserStore {
    dir: PathBuf,
}

impl FileUserStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn prefs_path(&self) -> PathBuf {
        self.dir.join(PREFS_FILE)
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
            tracing::info!(dir = %self.dir.display(), "created data directory");
        }
        Ok(())
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;
        let data = serde_json::to_vec(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    fn read_prefs(&self) -> Result<Option<Prefs>, StorageError> {
        match fs::read_to_string(self.prefs_path()) {
            Ok(data) => {
                let prefs = serde_json::from_str(&data)
                    .map_err(|e| StorageError::Corrupt(e.to_string()))?;
                Ok(Some(prefs))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl UserStore for FileUserStore {
    fn load(&self) -> Result<Option<UserAccount>, StorageError> {
        match fs::read_to_string(self.user_path()) {
            Ok(data) => {
                let account: UserAccount = serde_json::from_str(&data)
                    .map_err(|e| StorageError::Corrupt(e.to_string()))?;
                Ok(Some(account))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no persisted user record (clean state)");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("failed to read user record: {e}");
                Err(e.into())
            }
        }
    }

    fn save(&self, account: &UserAccount) -> Result<(), StorageError> {
        self.write_json(&self.user_path(), account)?;
        tracing::info!(id = %account.id, "saved user record");
        Ok(())
    }

    fn delete(&self) -> Result<(), StorageError> {
        match fs::remove_file(self.user_path()) {
            Ok(()) => {
                tracing::info!("deleted user record");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::warn!("failed to delete user record: {e}");
                Err(e.into())
            }
        }
    }

    fn has_seen_onboarding(&self) -> bool {
        match self.read_prefs() {
            Ok(Some(prefs)) => prefs.has_seen_onboarding,
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("failed to read prefs: {e}");
                false
            }
        }
    }

    fn set_has_seen_onboarding(&self, seen: bool) -> Result<(), StorageError> {
        self.write_json(
            &self.prefs_path(),
            &Prefs {
                has_seen_onboarding: seen,
            },
        )
    }
}
