use std::path::Path;

use tracing::{info, warn};

use crate::core::catalog::modrinth::sort_versions;
use crate::core::catalog::CatalogClient;
use crate::core::downloader::{Checksum, Downloader};
use crate::core::error::ProvisionResult;
use crate::core::events::StatusSink;
use crate::core::loaders::LoaderKind;

/// The file chosen for one mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMod {
    pub id: String,
    pub display_name: String,
    pub file_url: String,
    pub file_name: String,
    pub sha1: Option<String>,
}

/// Outcome of choosing a file for one mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedMod),
    /// Carries the project's display name.
    Unavailable(String),
}

/// Per-mod result. Only `Downloaded` wrote anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModStatus {
    Downloaded(ResolvedMod),
    /// No build of the mod targets this game version and loader.
    Unavailable { id: String, name: String },
    /// Upstream or filesystem error for this mod only.
    Failed { id: String, reason: String },
}

impl ModStatus {
    pub fn id(&self) -> &str {
        match self {
            ModStatus::Downloaded(m) => &m.id,
            ModStatus::Unavailable { id, .. } | ModStatus::Failed { id, .. } => id,
        }
    }
}

/// Picks and downloads the best Modrinth file per mod.
pub struct ModResolver<'a> {
    catalog: &'a CatalogClient,
    downloader: &'a Downloader,
}

impl<'a> ModResolver<'a> {
    pub fn new(catalog: &'a CatalogClient, downloader: &'a Downloader) -> Self {
        Self {
            catalog,
            downloader,
        }
    }

    /// Choose a file for `mod_id`.
    ///
    /// Highest channel wins (`release` > `beta` > `alpha`), upstream order
    /// breaks ties, and the version's first listed file is used.
    pub async fn resolve(
        &self,
        mod_id: &str,
        minecraft_version: &str,
        loader: LoaderKind,
    ) -> ProvisionResult<Resolution> {
        let project = self.catalog.modrinth_project(mod_id).await?;
        if !project.supports_game_version(minecraft_version) {
            return Ok(Resolution::Unavailable(project.title));
        }

        let mut versions = self
            .catalog
            .modrinth_versions(mod_id, loader.as_str(), minecraft_version)
            .await?;
        sort_versions(&mut versions);

        let Some(file) = versions.first().and_then(|v| v.files.first()) else {
            return Ok(Resolution::Unavailable(project.title));
        };

        Ok(Resolution::Found(ResolvedMod {
            id: mod_id.to_string(),
            display_name: project.title,
            file_url: file.url.clone(),
            file_name: file.filename.clone(),
            sha1: file.hashes.sha1.clone(),
        }))
    }

    /// Resolve and download every mod, one at a time, in order.
    ///
    /// A failure for one mod is reported and the rest continue.
    pub async fn resolve_and_download(
        &self,
        mod_ids: &[String],
        minecraft_version: &str,
        loader: LoaderKind,
        mods_dir: &Path,
        sink: &dyn StatusSink,
    ) -> Vec<ModStatus> {
        let mut statuses = Vec::with_capacity(mod_ids.len());

        for mod_id in mod_ids {
            let step = format!("Mod {}", mod_id);
            sink.started(&step);

            let status = match self
                .download_one(mod_id, minecraft_version, loader, mods_dir)
                .await
            {
                Ok(status) => status,
                Err(e) => ModStatus::Failed {
                    id: mod_id.clone(),
                    reason: e.to_string(),
                },
            };

            match &status {
                ModStatus::Downloaded(m) => {
                    info!("Downloaded mod {} ({})", m.display_name, m.file_name);
                    sink.succeeded(&step);
                }
                ModStatus::Unavailable { name, .. } => {
                    warn!("Mod {} is not available for {}", name, minecraft_version);
                    sink.failed(&step, format!("{} is not available for this version", name));
                }
                ModStatus::Failed { reason, .. } => {
                    warn!("Mod {} failed: {}", mod_id, reason);
                    sink.failed(&step, reason.clone());
                }
            }
            statuses.push(status);
        }

        statuses
    }

    async fn download_one(
        &self,
        mod_id: &str,
        minecraft_version: &str,
        loader: LoaderKind,
        mods_dir: &Path,
    ) -> ProvisionResult<ModStatus> {
        let resolved = match self.resolve(mod_id, minecraft_version, loader).await? {
            Resolution::Found(resolved) => resolved,
            Resolution::Unavailable(name) => {
                return Ok(ModStatus::Unavailable {
                    id: mod_id.to_string(),
                    name,
                })
            }
        };

        // Upstream names are used as-is, minus any directory part.
        let Some(file_name) = Path::new(&resolved.file_name).file_name() else {
            return Ok(ModStatus::Failed {
                id: mod_id.to_string(),
                reason: format!("unusable file name {:?}", resolved.file_name),
            });
        };
        let dest = mods_dir.join(file_name);
        let checksum = resolved.sha1.clone().map(Checksum::Sha1);
        self.downloader
            .download_file(&resolved.file_url, &dest, checksum.as_ref())
            .await?;

        Ok(ModStatus::Downloaded(resolved))
    }
}
