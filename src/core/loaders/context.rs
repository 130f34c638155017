use std::path::Path;

use crate::core::catalog::{CatalogClient, VersionMetadata};
use crate::core::downloader::Downloader;
use crate::core::server::ScriptPlatform;

/// Everything a provisioner needs for one run.
pub struct ProvisionContext<'a> {
    pub minecraft_version: &'a str,
    /// Already-fetched Mojang metadata for `minecraft_version`.
    pub metadata: &'a VersionMetadata,
    pub target_dir: &'a Path,
    /// Java used to run installers and written into launch scripts.
    pub java: &'a Path,
    pub platform: ScriptPlatform,
    pub catalog: &'a CatalogClient,
    pub downloader: &'a Downloader,
}

impl ProvisionContext<'_> {
    pub fn server_jar_path(&self) -> std::path::PathBuf {
        self.target_dir.join(super::SERVER_JAR)
    }
}
