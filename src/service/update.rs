//! Binary self-update.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::config::defaults;
use crate::transport::{HttpClient, HttpRequest};

use super::ServiceError;

/// Downloads a release binary and swaps it in for the installed one.
///
/// # Replacement sequence
///
/// 1. Download into `{install_path}.new` (same directory, so the final
///    rename stays on one filesystem)
/// 2. Reject empty downloads, mark the file executable (`0755`)
/// 3. Copy the current binary to `{install_path}.bak`
/// 4. Rename the new file over `{install_path}`; on failure restore the
///    backup
/// 5. When running as root, hand the installed binary to `root:root`
#[derive(Debug)]
pub struct SelfUpdater<H> {
    client: H,
    url: Url,
    install_path: PathBuf,
    timeout: Duration,
}

impl<H> SelfUpdater<H> {
    /// Creates an updater with the default download timeout.
    #[must_use]
    pub fn new(client: H, url: Url, install_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            url,
            install_path: install_path.into(),
            timeout: defaults::self_update_timeout(),
        }
    }

    /// Parses `url` and creates an updater.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidUrl`] for unparseable URLs.
    pub fn from_str_url(
        client: H,
        url: &str,
        install_path: impl Into<PathBuf>,
    ) -> Result<Self, ServiceError> {
        let parsed = Url::parse(url).map_err(|e| ServiceError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(client, parsed, install_path))
    }

    /// Sets the download timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the binary being replaced.
    #[must_use]
    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    /// Returns the backup location of the previous binary.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        with_suffix(&self.install_path, ".bak")
    }

    fn staging_path(&self) -> PathBuf {
        with_suffix(&self.install_path, ".new")
    }
}

impl<H: HttpClient> SelfUpdater<H> {
    /// Downloads and installs the release binary.
    ///
    /// Returns the number of bytes installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or is empty, or if any
    /// filesystem step fails. The installed binary is left in place (or
    /// restored from the backup) on every error.
    pub async fn run(&self) -> Result<usize, ServiceError> {
        tracing::info!("Downloading {}", self.url);
        let request = HttpRequest::get(self.url.clone()).with_timeout(self.timeout);
        let response = self.client.request(request).await?;

        if !response.is_success() {
            return Err(ServiceError::DownloadStatus {
                status: response.status,
            });
        }
        if response.body.is_empty() {
            return Err(ServiceError::EmptyDownload);
        }

        let size = response.body.len();
        let install_path = self.install_path.clone();
        let staging = self.staging_path();
        let backup = self.backup_path();

        tokio::task::spawn_blocking(move || {
            replace_binary(&response.body, &staging, &backup, &install_path)
        })
        .await
        .map_err(|e| ServiceError::Task(e.to_string()))??;

        Ok(size)
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn replace_binary(
    content: &[u8],
    staging: &Path,
    backup: &Path,
    install_path: &Path,
) -> Result<(), ServiceError> {
    let mut file =
        std::fs::File::create(staging).map_err(|e| ServiceError::io("create", staging, e))?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| ServiceError::io("write", staging, e))?;
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(staging, std::fs::Permissions::from_mode(0o755))
            .map_err(|e| ServiceError::io("set executable bit on", staging, e))?;
    }

    let had_previous = install_path.exists();
    if had_previous {
        std::fs::copy(install_path, backup)
            .map_err(|e| ServiceError::io("back up", install_path, e))?;
    }

    if let Err(e) = std::fs::rename(staging, install_path) {
        if had_previous {
            if let Err(restore) = std::fs::rename(backup, install_path) {
                tracing::error!("Failed to restore backup: {restore}");
            }
        }
        let _ = std::fs::remove_file(staging);
        return Err(ServiceError::io("replace", install_path, e));
    }

    // The staging file is owned by whoever ran the download
    #[cfg(unix)]
    {
        if super::is_root() {
            std::os::unix::fs::chown(install_path, Some(0), Some(0))
                .map_err(|e| ServiceError::io("change owner of", install_path, e))?;
        }
    }

    Ok(())
}
