use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::error::ProvisionResult;

use super::{
    context::ProvisionContext, fabric::FabricProvisioner, forge::ForgeProvisioner,
    kind::LoaderKind, neoforge::NeoForgeProvisioner, paper::PaperProvisioner,
    vanilla::VanillaProvisioner,
};

/// Result of acquiring the server software.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The server is on disk: `server.jar` for direct downloads, the
    /// target directory for installer-generated trees.
    Installed(PathBuf),
    /// Known incompatibility between the variant and the game version.
    /// Nothing was downloaded.
    Unsupported(String),
}

#[async_trait]
pub trait LoaderProvisioner: Send + Sync {
    async fn provision(&self, ctx: &ProvisionContext<'_>) -> ProvisionResult<ProvisionOutcome>;
}

/// Closed dispatch over the five variants.
pub enum Provisioner {
    Vanilla(VanillaProvisioner),
    Fabric(FabricProvisioner),
    Paper(PaperProvisioner),
    Forge(ForgeProvisioner),
    NeoForge(NeoForgeProvisioner),
}

impl Provisioner {
    pub fn new(kind: LoaderKind) -> Self {
        match kind {
            LoaderKind::Vanilla => Self::Vanilla(VanillaProvisioner),
            LoaderKind::Fabric => Self::Fabric(FabricProvisioner),
            LoaderKind::Paper => Self::Paper(PaperProvisioner),
            LoaderKind::Forge => Self::Forge(ForgeProvisioner),
            LoaderKind::NeoForge => Self::NeoForge(NeoForgeProvisioner),
        }
    }

    pub async fn provision(&self, ctx: &ProvisionContext<'_>) -> ProvisionResult<ProvisionOutcome> {
        match self {
            Provisioner::Vanilla(p) => p.provision(ctx).await,
            Provisioner::Fabric(p) => p.provision(ctx).await,
            Provisioner::Paper(p) => p.provision(ctx).await,
            Provisioner::Forge(p) => p.provision(ctx).await,
            Provisioner::NeoForge(p) => p.provision(ctx).await,
        }
    }
}

/// Resolve and acquire the server software for `kind`.
pub async fn resolve(kind: LoaderKind, ctx: &ProvisionContext<'_>) -> ProvisionResult<ProvisionOutcome> {
    Provisioner::new(kind).provision(ctx).await
}
