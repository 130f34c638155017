// ─── Catalog ───
// Upstream metadata, one file per upstream shape:
//   manifest  — Mojang version manifest + per-version metadata
//   fabric    — Fabric meta (game/loader/installer lists)
//   paper     — PaperMC fill API (version map + builds)
//   maven     — Forge / NeoForge maven-metadata.xml release lists
//   modrinth  — Modrinth project + version listings

pub mod fabric;
pub mod manifest;
pub mod maven;
pub mod modrinth;
pub mod paper;

use std::sync::Arc;

use crate::core::http::Fetch;

pub use fabric::FabricMetaVersion;
pub use manifest::{VersionEntry, VersionManifest, VersionMetadata};
pub use modrinth::{ModrinthFile, ModrinthProject, ModrinthVersion, ReleaseChannel};
pub use paper::{BuildChannel, PaperBuild, PaperProject};

/// Fetches and parses every upstream catalog the pipeline consults.
#[derive(Clone)]
pub struct CatalogClient {
    fetch: Arc<dyn Fetch>,
}

impl CatalogClient {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self { fetch }
    }

    pub(crate) fn fetch(&self) -> &dyn Fetch {
        self.fetch.as_ref()
    }
}
