use async_trait::async_trait;
use tracing::info;

use super::context::ProvisionContext;
use super::installer::{LoaderProvisioner, ProvisionOutcome};
use crate::core::catalog::fabric::server_jar_url;
use crate::core::catalog::FabricMetaVersion;
use crate::core::error::{ProvisionError, ProvisionResult};

/// Fabric server launcher jar, composed by Fabric meta. No installer process.
pub struct FabricProvisioner;

/// Upstream lists are newest first; the head is taken as latest without
/// comparing versions.
fn latest<'a>(list: &'a [FabricMetaVersion], what: &str) -> ProvisionResult<&'a str> {
    list.first()
        .map(|v| v.version.as_str())
        .ok_or_else(|| ProvisionError::LoaderApi(format!("Fabric meta returned no {} versions", what)))
}

#[async_trait]
impl LoaderProvisioner for FabricProvisioner {
    async fn provision(&self, ctx: &ProvisionContext<'_>) -> ProvisionResult<ProvisionOutcome> {
        info!("Fetching Fabric information");

        let game_versions = ctx.catalog.fabric_game_versions().await?;
        if !game_versions.iter().any(|v| v.version == ctx.minecraft_version) {
            return Ok(ProvisionOutcome::Unsupported(
                "Fabric is not supported on this version".into(),
            ));
        }

        let loaders = ctx.catalog.fabric_loader_versions().await?;
        let loader_version = latest(&loaders, "loader")?;
        let installers = ctx.catalog.fabric_installer_versions().await?;
        let installer_version = latest(&installers, "installer")?;

        info!(
            "Downloading Fabric server (loader {}, installer {})",
            loader_version, installer_version
        );
        let url = server_jar_url(ctx.minecraft_version, loader_version, installer_version);
        let dest = ctx.server_jar_path();
        ctx.downloader.download_file(&url, &dest, None).await?;

        Ok(ProvisionOutcome::Installed(dest))
    }
}
