// ─── Pipeline ───
// config → manifest → version metadata → loader → mods → launch files.
// Strictly sequential. A fatal error stops the run but nothing already
// written is rolled back.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::core::catalog::{CatalogClient, VersionManifest};
use crate::core::config::Configuration;
use crate::core::downloader::Downloader;
use crate::core::error::{ProvisionError, ProvisionResult};
use crate::core::events::StatusSink;
use crate::core::http::Fetch;
use crate::core::java::resolve_runtime_path;
use crate::core::loaders::{self, LoaderKind, ProvisionContext, ProvisionOutcome};
use crate::core::mods::{ModResolver, ModStatus};
use crate::core::server::{LaunchFiles, ScriptPlatform, ServerOption, WrittenFiles};

pub const MODS_DIR: &str = "mods";

/// Choices supplied by the interactive (or command-line) layer.
#[derive(Debug, Clone)]
pub struct Selections {
    pub directory: PathBuf,
    pub minecraft_version: String,
    pub loader: LoaderKind,
    /// Preset names for `loader`.
    pub presets: Vec<String>,
    pub options: BTreeSet<ServerOption>,
    pub port: u16,
    pub eula_accepted: bool,
    /// Install the vanilla server when the chosen loader does not support
    /// the version, instead of stopping.
    pub fallback_to_vanilla: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Created {
        directory: PathBuf,
        /// Loader actually installed; differs from the selection after a
        /// vanilla fallback.
        loader: LoaderKind,
        mods: Vec<ModStatus>,
        files: WrittenFiles,
    },
    /// The server software could not be provisioned for this version.
    /// No launch files were written.
    Unsupported { reason: String },
}

pub struct Pipeline {
    config: Configuration,
    catalog: CatalogClient,
    downloader: Downloader,
    platform: ScriptPlatform,
}

fn report(sink: &dyn StatusSink, step: &str, error: ProvisionError) -> ProvisionError {
    sink.failed(step, error.to_string());
    error
}

impl Pipeline {
    pub fn new(config: Configuration, fetch: Arc<dyn Fetch>) -> Self {
        Self {
            config,
            catalog: CatalogClient::new(fetch.clone()),
            downloader: Downloader::new(fetch),
            platform: ScriptPlatform::current(),
        }
    }

    pub fn with_platform(mut self, platform: ScriptPlatform) -> Self {
        self.platform = platform;
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Version list for selection; fetched once per run.
    pub async fn manifest(&self, sink: &dyn StatusSink) -> ProvisionResult<VersionManifest> {
        let step = "Fetching version list";
        sink.started(step);
        let manifest = self
            .catalog
            .version_manifest()
            .await
            .map_err(|e| report(sink, step, e))?;
        sink.succeeded(step);
        Ok(manifest)
    }

    pub async fn run(
        &self,
        manifest: &VersionManifest,
        selections: &Selections,
        sink: &dyn StatusSink,
    ) -> ProvisionResult<RunOutcome> {
        let version = selections.minecraft_version.as_str();
        // Installers run with the target as their working directory.
        let target = std::path::absolute(&selections.directory).map_err(|e| {
            report(sink, "Creating server directory", ProvisionError::io(&selections.directory, e))
        })?;
        let directory = target.as_path();

        let step = format!("Fetching {} information", version);
        sink.started(&step);
        let metadata = self
            .catalog
            .version_metadata(manifest, version)
            .await
            .map_err(|e| report(sink, &step, e))?;
        let java_major = metadata.required_java_major(version);
        let java = resolve_runtime_path(&self.config.java_paths, java_major);
        info!("Minecraft {} needs Java {}; using {:?}", version, java_major, java);
        sink.succeeded(&step);

        tokio::fs::create_dir_all(directory)
            .await
            .map_err(|e| report(sink, "Creating server directory", ProvisionError::io(directory, e)))?;

        let ctx = ProvisionContext {
            minecraft_version: version,
            metadata: &metadata,
            target_dir: directory,
            java: &java,
            platform: self.platform,
            catalog: &self.catalog,
            downloader: &self.downloader,
        };

        let mut loader = selections.loader;
        let step = format!("Installing {} server", loader.display_name());
        sink.started(&step);
        let outcome = loaders::resolve(loader, &ctx)
            .await
            .map_err(|e| report(sink, &step, e))?;

        if let ProvisionOutcome::Unsupported(reason) = outcome {
            sink.failed(&step, reason.clone());
            if !selections.fallback_to_vanilla || loader == LoaderKind::Vanilla {
                return Ok(RunOutcome::Unsupported { reason });
            }

            warn!("{}; falling back to vanilla", reason);
            loader = LoaderKind::Vanilla;
            let step = "Installing Vanilla server";
            sink.started(step);
            match loaders::resolve(loader, &ctx)
                .await
                .map_err(|e| report(sink, step, e))?
            {
                ProvisionOutcome::Installed(_) => sink.succeeded(step),
                ProvisionOutcome::Unsupported(reason) => {
                    sink.failed(step, reason.clone());
                    return Ok(RunOutcome::Unsupported { reason });
                }
            }
        } else {
            sink.succeeded(&step);
        }

        let mods = if loader.supports_mods() {
            let mods_dir = directory.join(MODS_DIR);
            tokio::fs::create_dir_all(&mods_dir)
                .await
                .map_err(|e| report(sink, "Creating mods directory", ProvisionError::io(&mods_dir, e)))?;

            let mod_ids = self.config.mod_ids_for(loader, &selections.presets);
            info!("Provisioning {} mods for {}", mod_ids.len(), loader);
            ModResolver::new(&self.catalog, &self.downloader)
                .resolve_and_download(&mod_ids, version, loader, &mods_dir, sink)
                .await
        } else {
            Vec::new()
        };

        let step = "Writing extra files";
        sink.started(step);
        let files = LaunchFiles {
            port: selections.port,
            options: &selections.options,
            java: &java,
            eula_accepted: selections.eula_accepted,
            loader,
            platform: self.platform,
        }
        .write(directory)
        .await
        .map_err(|e| report(sink, step, e))?;
        sink.succeeded(step);

        info!("Server created at {:?}", directory);
        Ok(RunOutcome::Created {
            directory: directory.to_path_buf(),
            loader,
            mods,
            files,
        })
    }
}
