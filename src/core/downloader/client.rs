use std::path::Path;
use std::sync::Arc;

use sha1::Sha1;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{ProvisionError, ProvisionResult};
use crate::core::http::Fetch;

/// Upstream-declared digest for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checksum {
    /// Mojang and Modrinth publish SHA-1.
    Sha1(String),
    /// Paper publishes SHA-256.
    Sha256(String),
}

impl Checksum {
    fn algorithm(&self) -> &'static str {
        match self {
            Checksum::Sha1(_) => "SHA-1",
            Checksum::Sha256(_) => "SHA-256",
        }
    }

    fn expected(&self) -> &str {
        match self {
            Checksum::Sha1(hex) | Checksum::Sha256(hex) => hex,
        }
    }

    fn compute(&self, bytes: &[u8]) -> String {
        match self {
            Checksum::Sha1(_) => hex::encode(Sha1::digest(bytes)),
            Checksum::Sha256(_) => hex::encode(Sha256::digest(bytes)),
        }
    }
}

/// Sequential, checksum-validated downloader.
#[derive(Clone)]
pub struct Downloader {
    fetch: Arc<dyn Fetch>,
}

impl Downloader {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self { fetch }
    }

    /// Download a single file to `dest`, optionally validating a checksum.
    ///
    /// Creates parent directories as needed. Nothing is written when the
    /// checksum does not match.
    pub async fn download_file(
        &self,
        url: &str,
        dest: &Path,
        checksum: Option<&Checksum>,
    ) -> ProvisionResult<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProvisionError::io(parent, e))?;
        }

        let bytes = self.fetch.get_bytes(url).await?;

        if let Some(checksum) = checksum {
            let actual = checksum.compute(&bytes);
            if !actual.eq_ignore_ascii_case(checksum.expected()) {
                return Err(ProvisionError::ChecksumMismatch {
                    algorithm: checksum.algorithm(),
                    path: dest.to_path_buf(),
                    expected: checksum.expected().to_string(),
                    actual,
                });
            }
        }

        // Drop the handle before returning; Windows keeps the file locked otherwise.
        {
            let mut file = tokio::fs::File::create(dest)
                .await
                .map_err(|e| ProvisionError::io(dest, e))?;
            file.write_all(&bytes)
                .await
                .map_err(|e| ProvisionError::io(dest, e))?;
            file.flush().await.map_err(|e| ProvisionError::io(dest, e))?;
        }

        debug!("Downloaded: {} -> {:?}", url, dest);
        Ok(())
    }
}
