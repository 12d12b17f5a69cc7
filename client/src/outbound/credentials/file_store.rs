//! File-backed credential store.
//!
//! The file holds one JSON document with a single `apiKey` entry. All access
//! goes through `cap_std` directory handles opened on the file's parent.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};

use crate::domain::ApiKey;
use crate::domain::ports::{CredentialStore, CredentialStoreError};

/// Fixed entry name holding the key.
pub const API_KEY_ENTRY: &str = "apiKey";

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(rename = "apiKey")]
    api_key: String,
}

/// Durable store keeping the key in a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    parent: PathBuf,
    file_name: PathBuf,
}

impl FileCredentialStore {
    /// Store at `path`. Nothing is touched until the first load or store.
    ///
    /// # Errors
    ///
    /// Fails when `path` has no file name component.
    pub fn new(path: &Path) -> Result<Self, CredentialStoreError> {
        let file_name = path.file_name().ok_or_else(|| {
            CredentialStoreError::io(format!(
                "credentials path '{}' must name a file",
                path.display()
            ))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            parent,
            file_name: PathBuf::from(file_name),
        })
    }

    /// Full path of the credentials file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.parent.join(&self.file_name)
    }

    fn io_error(&self, action: &str, error: &io::Error) -> CredentialStoreError {
        CredentialStoreError::io(format!(
            "{action} '{}': {error}",
            self.path().display()
        ))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<ApiKey>, CredentialStoreError> {
        let directory = match Dir::open_ambient_dir(&self.parent, ambient_authority()) {
            Ok(directory) => directory,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error("open credentials directory for", &error)),
        };
        let contents = match directory.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error("read credentials file", &error)),
        };
        let stored: StoredCredentials = serde_json::from_str(&contents).map_err(|error| {
            CredentialStoreError::corrupt(format!("expected {{\"{API_KEY_ENTRY}\": ...}}: {error}"))
        })?;
        ApiKey::new(&stored.api_key)
            .map(Some)
            .map_err(|error| CredentialStoreError::corrupt(error.to_string()))
    }

    fn store(&self, key: &ApiKey) -> Result<(), CredentialStoreError> {
        Dir::create_ambient_dir_all(&self.parent, ambient_authority())
            .map_err(|error| self.io_error("create credentials directory for", &error))?;
        let directory = Dir::open_ambient_dir(&self.parent, ambient_authority())
            .map_err(|error| self.io_error("open credentials directory for", &error))?;
        let document = serde_json::to_vec_pretty(&StoredCredentials {
            api_key: key.expose().to_owned(),
        })
        .map_err(|error| CredentialStoreError::corrupt(error.to_string()))?;
        directory
            .write(&self.file_name, document)
            .map_err(|error| self.io_error("write credentials file", &error))
    }
}
