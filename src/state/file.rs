//! File-based baseline persistence implementation.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::network::AddressSet;

use super::{BaselineStore, LoadResult, StateError};

/// File-based implementation of [`BaselineStore`].
///
/// The file holds the canonical encoding (`ipv4=...&ipv6=...`) as plain
/// text, readable by earlier releases of the client.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename pattern to prevent corruption:
/// 1. Write to `{path}.tmp` (mode `0600` on Unix)
/// 2. Rename `{path}.tmp` to `{path}`
///
/// This ensures the file is either fully written or not written at all.
#[derive(Debug, Clone)]
pub struct FileBaselineStore {
    path: PathBuf,
}

impl FileBaselineStore {
    /// Creates a new file-based baseline store at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the baseline file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Performs the blocking save operation.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn save_blocking(path: &Path, content: &str) -> Result<(), StateError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StateError::Write)?;
            }
        }

        // Append .tmp instead of replacing extension to avoid conflicts
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&temp_path).map_err(StateError::Write)?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(StateError::Write)?;
        drop(file);

        // Atomic rename (on most filesystems)
        std::fs::rename(&temp_path, path).map_err(StateError::Write)?;

        Ok(())
    }
}

impl BaselineStore for FileBaselineStore {
    fn load(&self) -> LoadResult {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadResult::NotFound,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Failed to read file: {e}"),
                };
            }
        };

        let encoded = content.trim();
        if encoded.is_empty() {
            return LoadResult::NotFound;
        }

        match AddressSet::decode(encoded) {
            Ok(addresses) => LoadResult::Loaded(addresses),
            Err(e) => LoadResult::Corrupted {
                reason: format!("Invalid baseline '{encoded}': {e}"),
            },
        }
    }

    async fn save(&self, addresses: &AddressSet) -> Result<(), StateError> {
        let path = self.path.clone();
        let content = addresses.encode();

        // Use spawn_blocking to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || Self::save_blocking(&path, &content))
            .await
            .map_err(|e| StateError::Write(std::io::Error::other(e)))?
    }
}
