// ─── Version Manifest ───
// Mojang version manifest v2 and the per-version metadata it points to.

use serde::Deserialize;
use tracing::info;

use super::CatalogClient;
use crate::core::error::{ProvisionError, ProvisionResult};
use crate::core::http::get_json;
use crate::core::java::required_java_for_minecraft_version;

pub const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Top-level Mojang version manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    #[serde(default)]
    pub snapshot: Option<String>,
}

/// A single entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    /// Location of the detailed [`VersionMetadata`].
    pub url: String,
}

impl VersionManifest {
    /// Find a specific version entry by ID (e.g. "1.20.4").
    pub fn find_version(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }
}

/// Subset of a Mojang version JSON needed to provision a server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    #[serde(default)]
    pub downloads: VersionDownloads,
    #[serde(default)]
    pub java_version: Option<JavaVersionInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionDownloads {
    /// Absent for versions that predate server distribution.
    #[serde(default)]
    pub server: Option<DownloadArtifact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadArtifact {
    #[serde(default)]
    pub sha1: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaVersionInfo {
    pub major_version: u32,
}

impl VersionMetadata {
    /// Required Java major: declared by Mojang, else derived from the version id.
    pub fn required_java_major(&self, version_id: &str) -> u32 {
        self.java_version
            .as_ref()
            .map(|j| j.major_version)
            .unwrap_or_else(|| required_java_for_minecraft_version(version_id))
    }
}

impl CatalogClient {
    /// Fetch the version manifest from Mojang.
    pub async fn version_manifest(&self) -> ProvisionResult<VersionManifest> {
        info!("Fetching Minecraft version manifest...");
        let manifest: VersionManifest = get_json(self.fetch(), VERSION_MANIFEST_URL).await?;
        info!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    /// Look `version_id` up in `manifest` and fetch its detailed metadata.
    pub async fn version_metadata(
        &self,
        manifest: &VersionManifest,
        version_id: &str,
    ) -> ProvisionResult<VersionMetadata> {
        let entry = manifest
            .find_version(version_id)
            .ok_or_else(|| ProvisionError::UnknownVersion(version_id.to_string()))?;
        info!("Fetching {} information", version_id);
        get_json(self.fetch(), &entry.url).await
    }
}
