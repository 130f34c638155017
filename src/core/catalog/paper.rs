use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::CatalogClient;
use crate::core::error::ProvisionResult;
use crate::core::http::get_json;

pub const PAPER_PROJECT_URL: &str = "https://fill.papermc.io/v3/projects/paper";

/// Key of the server artifact inside a build's `downloads` map.
pub const SERVER_DOWNLOAD_KEY: &str = "server:default";

/// `GET /v3/projects/paper`: version group → versions in that group.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperProject {
    pub versions: BTreeMap<String, Vec<String>>,
}

impl PaperProject {
    /// Whether Paper publishes builds for `minecraft_version`, either as a
    /// group key or as a version listed in any group.
    pub fn supports(&self, minecraft_version: &str) -> bool {
        self.versions.contains_key(minecraft_version)
            || self
                .versions
                .values()
                .flatten()
                .any(|v| v == minecraft_version)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaperBuild {
    pub id: u64,
    pub channel: BuildChannel,
    #[serde(default)]
    pub downloads: HashMap<String, PaperDownload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaperDownload {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub checksums: PaperChecksums,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperChecksums {
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuildChannel {
    Recommended,
    Stable,
    Beta,
    Alpha,
    #[serde(other)]
    Unknown,
}

impl BuildChannel {
    /// Lower is preferred. STABLE (and RECOMMENDED) always ahead of ALPHA.
    pub fn preference(self) -> u8 {
        match self {
            BuildChannel::Recommended | BuildChannel::Stable => 0,
            BuildChannel::Beta | BuildChannel::Unknown => 1,
            BuildChannel::Alpha => 2,
        }
    }
}

impl PaperBuild {
    pub fn server_download(&self) -> Option<&PaperDownload> {
        self.downloads.get(SERVER_DOWNLOAD_KEY)
    }
}

/// Sort builds by channel preference. Stable: equal channels keep upstream order.
pub fn sort_builds(builds: &mut [PaperBuild]) {
    builds.sort_by_key(|b| b.channel.preference());
}

impl CatalogClient {
    pub async fn paper_project(&self) -> ProvisionResult<PaperProject> {
        get_json(self.fetch(), PAPER_PROJECT_URL).await
    }

    /// Builds for one version, in upstream order.
    pub async fn paper_builds(&self, minecraft_version: &str) -> ProvisionResult<Vec<PaperBuild>> {
        let url = format!("{}/versions/{}/builds", PAPER_PROJECT_URL, minecraft_version);
        get_json(self.fetch(), &url).await
    }
}
