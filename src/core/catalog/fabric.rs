use serde::Deserialize;

use super::CatalogClient;
use crate::core::error::ProvisionResult;
use crate::core::http::get_json;

pub const FABRIC_META_BASE: &str = "https://meta.fabricmc.net/v2";

/// One entry of any Fabric meta version list (game, loader or installer).
#[derive(Debug, Clone, Deserialize)]
pub struct FabricMetaVersion {
    pub version: String,
}

/// Server launcher jar for a game/loader/installer triple.
pub fn server_jar_url(minecraft_version: &str, loader_version: &str, installer_version: &str) -> String {
    format!(
        "{}/versions/loader/{}/{}/{}/server/jar",
        FABRIC_META_BASE, minecraft_version, loader_version, installer_version
    )
}

impl CatalogClient {
    /// Game versions Fabric supports.
    pub async fn fabric_game_versions(&self) -> ProvisionResult<Vec<FabricMetaVersion>> {
        get_json(self.fetch(), &format!("{}/versions/game", FABRIC_META_BASE)).await
    }

    /// Loader versions, newest first as served upstream.
    pub async fn fabric_loader_versions(&self) -> ProvisionResult<Vec<FabricMetaVersion>> {
        get_json(self.fetch(), &format!("{}/versions/loader", FABRIC_META_BASE)).await
    }

    /// Installer versions, newest first as served upstream.
    pub async fn fabric_installer_versions(&self) -> ProvisionResult<Vec<FabricMetaVersion>> {
        get_json(self.fetch(), &format!("{}/versions/installer", FABRIC_META_BASE)).await
    }
}
