use async_trait::async_trait;
use tracing::info;

use super::context::ProvisionContext;
use super::external::{install_with, InstallerKind};
use super::installer::{LoaderProvisioner, ProvisionOutcome};
use crate::core::catalog::maven::{neoforge_installer_url, neoforge_targets, newest_matching};
use crate::core::error::ProvisionResult;

/// NeoForge installer. Same protocol as Forge with its own maven and numbering.
pub struct NeoForgeProvisioner;

#[async_trait]
impl LoaderProvisioner for NeoForgeProvisioner {
    async fn provision(&self, ctx: &ProvisionContext<'_>) -> ProvisionResult<ProvisionOutcome> {
        info!("Fetching NeoForge information");

        let releases = ctx.catalog.neoforge_releases().await?;
        let Some(release) = newest_matching(&releases, |r| neoforge_targets(r, ctx.minecraft_version))
        else {
            return Ok(ProvisionOutcome::Unsupported(
                "NeoForge is not supported on this version".into(),
            ));
        };

        info!("Selected NeoForge {}", release);
        let installer_name = format!("neoforge-{}-installer.jar", release);
        install_with(
            InstallerKind::NeoForge,
            ctx,
            &neoforge_installer_url(release),
            &installer_name,
        )
        .await
    }
}
