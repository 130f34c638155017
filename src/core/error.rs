use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the provisioning pipeline.
/// Every module returns `Result<T, ProvisionError>`.
///
/// Version/loader incompatibility is not represented here: it is a
/// soft outcome (`ProvisionOutcome::Unsupported`, `ModStatus::Unavailable`).
#[derive(Debug, Error)]
pub enum ProvisionError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    // ── Integrity ───────────────────────────────────────
    #[error("{algorithm} mismatch for {path:?}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        algorithm: &'static str,
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── Parsing ─────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Invalid configuration in {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    // ── Catalog ─────────────────────────────────────────
    #[error("Minecraft version {0} not found in manifest")]
    UnknownVersion(String),

    #[error("Loader API returned unexpected data: {0}")]
    LoaderApi(String),

    // ── Installer process ───────────────────────────────
    #[error("Failed to start installer with {java}: {source}")]
    InstallerSpawn {
        java: String,
        source: std::io::Error,
    },

    #[error("Installer exited with code {code:?}\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}")]
    InstallerFailed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Installer did not produce expected file {path:?}\nSTDOUT:\n{stdout}")]
    MissingInstallerOutput { path: PathBuf, stdout: String },

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type ProvisionResult<T> = Result<T, ProvisionError>;

impl ProvisionError {
    /// Wrap an IO error with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProvisionError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for ProvisionError {
    fn from(source: std::io::Error) -> Self {
        ProvisionError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
