//! Download-if-absent ROM storage for Playdesu
//!
//! A ROM is stored under a single downloads directory keyed by filename.
//! If the file already exists the store reports completion without any
//! network access; otherwise the remote body is streamed to a `.partial`
//! file and renamed into place only after the write finishes.

use futures_util::StreamExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Download request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download server returned {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a requested file ended up present locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was already on disk; no transfer happened.
    AlreadyPresent,
    /// The file was fetched from the remote URL.
    Downloaded,
}

/// File store rooted at a downloads directory.
pub struct RomStore {
    root: PathBuf,
    client: reqwest::Client,
}

impl RomStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first download.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .user_agent(format!("Playdesu/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            root: root.into(),
            client,
        }
    }

    /// Directory the store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path a filename resolves to.
    pub fn local_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Check whether a file is already present locally.
    pub fn contains(&self, file_name: &str) -> bool {
        self.local_path(file_name).exists()
    }

    /// Ensure `file_name` is present locally, downloading it from `url`
    /// if necessary. Returns the final path and whether a transfer ran.
    pub async fn ensure(
        &self,
        file_name: &str,
        url: &str,
    ) -> Result<(PathBuf, DownloadOutcome), DownloadError> {
        let path = self.local_path(file_name);

        if path.exists() {
            tracing::debug!("{} already present, skipping download", file_name);
            return Ok((path, DownloadOutcome::AlreadyPresent));
        }

        fs::create_dir_all(&self.root)?;

        let partial_path = self.root.join(format!("{}.partial", file_name));

        tracing::info!("Downloading {} from {}", file_name, url);

        match self.download_to(url, &partial_path).await {
            Ok(()) => {
                fs::rename(&partial_path, &path)?;
                Ok((path, DownloadOutcome::Downloaded))
            }
            Err(e) => {
                // Never leave a truncated file behind under the final name
                let _ = fs::remove_file(&partial_path);
                Err(e)
            }
        }
    }

    /// Stream a remote body to a local file.
    async fn download_to(&self, url: &str, path: &Path) -> Result<(), DownloadError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DownloadError::BadStatus(response.status()));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path)?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)?;
        }

        file.sync_all()?;
        Ok(())
    }

    /// Remove leftover partial files from interrupted transfers.
    pub fn cleanup(&self) -> Result<(), DownloadError> {
        if self.root.exists() {
            for entry in fs::read_dir(&self.root)? {
                let entry = entry?;
                let path = entry.path();

                if path.extension().is_some_and(|e| e == "partial") {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_path_and_contains() {
        let dir = TempDir::new().unwrap();
        let store = RomStore::new(dir.path());

        assert!(!store.contains("g1.nes"));
        fs::write(dir.path().join("g1.nes"), b"ROM").unwrap();
        assert!(store.contains("g1.nes"));
        assert_eq!(store.local_path("g1.nes"), dir.path().join("g1.nes"));
    }

    #[tokio::test]
    async fn test_ensure_short_circuits_on_existing_file() {
        let dir = TempDir::new().unwrap();
        let store = RomStore::new(dir.path());
        fs::write(dir.path().join("g1.nes"), b"ROM").unwrap();

        // The URL is unreachable on purpose: an existing file must be
        // reported complete without any network access.
        let (path, outcome) = store
            .ensure("g1.nes", "http://invalid.invalid/g1.nes")
            .await
            .unwrap();

        assert_eq!(outcome, DownloadOutcome::AlreadyPresent);
        assert_eq!(fs::read(path).unwrap(), b"ROM");
    }

    #[tokio::test]
    async fn test_ensure_downloads_absent_file() {
        let dir = TempDir::new().unwrap();
        let store = RomStore::new(dir.path());

        let url = serve_once(b"FAKE_ROM_DATA").await;
        let (path, outcome) = store.ensure("g1.nes", &url).await.unwrap();

        assert_eq!(outcome, DownloadOutcome::Downloaded);
        assert_eq!(fs::read(&path).unwrap(), b"FAKE_ROM_DATA");
        assert!(!dir.path().join("g1.nes.partial").exists());
    }

    #[tokio::test]
    async fn test_second_ensure_skips_transfer() {
        let dir = TempDir::new().unwrap();
        let store = RomStore::new(dir.path());

        let url = serve_once(b"FAKE_ROM_DATA").await;
        let (_, first) = store.ensure("g1.nes", &url).await.unwrap();
        assert_eq!(first, DownloadOutcome::Downloaded);

        // The one-shot server is gone; a second transfer would fail.
        let (_, second) = store.ensure("g1.nes", &url).await.unwrap();
        assert_eq!(second, DownloadOutcome::AlreadyPresent);
    }

    #[tokio::test]
    async fn test_failed_download_surfaces_error_and_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let store = RomStore::new(dir.path());

        let result = store
            .ensure("g1.nes", "http://invalid.invalid/g1.nes")
            .await;

        assert!(result.is_err());
        assert!(!store.contains("g1.nes"));
        assert!(!dir.path().join("g1.nes.partial").exists());
    }

    #[tokio::test]
    async fn test_cleanup_removes_partials() {
        let dir = TempDir::new().unwrap();
        let store = RomStore::new(dir.path());

        fs::write(dir.path().join("g1.nes.partial"), b"junk").unwrap();
        fs::write(dir.path().join("g2.gba"), b"ROM").unwrap();

        store.cleanup().unwrap();

        assert!(!dir.path().join("g1.nes.partial").exists());
        assert!(dir.path().join("g2.gba").exists());
    }

    /// Serve a single HTTP response with the given body on a loopback port.
    async fn serve_once(body: &'static [u8]) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;

                let header = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(header.as_bytes()).await;
                let _ = socket.write_all(body).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/g1.nes", addr)
    }
}
