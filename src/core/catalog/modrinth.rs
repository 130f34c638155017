use reqwest::Url;
use serde::Deserialize;

use super::CatalogClient;
use crate::core::error::{ProvisionError, ProvisionResult};
use crate::core::http::get_json;

pub const MODRINTH_API: &str = "https://api.modrinth.com/v2";

#[derive(Debug, Clone, Deserialize)]
pub struct ModrinthProject {
    pub title: String,
    #[serde(default)]
    pub game_versions: Vec<String>,
}

impl ModrinthProject {
    pub fn supports_game_version(&self, minecraft_version: &str) -> bool {
        self.game_versions.iter().any(|v| v == minecraft_version)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModrinthVersion {
    pub id: String,
    pub version_type: ReleaseChannel,
    #[serde(default)]
    pub files: Vec<ModrinthFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModrinthFile {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub hashes: ModrinthHashes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModrinthHashes {
    #[serde(default)]
    pub sha1: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    Release,
    Beta,
    Alpha,
}

/// Sort by channel, `release` > `beta` > `alpha`. Equal channels keep input order.
pub fn sort_versions(versions: &mut [ModrinthVersion]) {
    versions.sort_by_key(|v| v.version_type);
}

fn project_url(project_id: &str) -> ProvisionResult<Url> {
    let mut url = Url::parse(MODRINTH_API).map_err(|e| ProvisionError::InvalidUrl {
        url: MODRINTH_API.to_string(),
        reason: e.to_string(),
    })?;
    url.path_segments_mut()
        .map_err(|_| ProvisionError::InvalidUrl {
            url: MODRINTH_API.to_string(),
            reason: "cannot be a base".into(),
        })?
        .push("project")
        .push(project_id);
    Ok(url)
}

/// Project version listing filtered server-side by loader and game version.
pub fn project_versions_url(
    project_id: &str,
    loader: &str,
    minecraft_version: &str,
) -> ProvisionResult<String> {
    let mut url = project_url(project_id)?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push("version");
    }
    url.query_pairs_mut()
        .append_pair("loaders", &format!("[\"{}\"]", loader))
        .append_pair("game_versions", &format!("[\"{}\"]", minecraft_version));
    Ok(url.into())
}

pub fn project_metadata_url(project_id: &str) -> ProvisionResult<String> {
    Ok(project_url(project_id)?.into())
}

impl CatalogClient {
    pub async fn modrinth_project(&self, project_id: &str) -> ProvisionResult<ModrinthProject> {
        get_json(self.fetch(), &project_metadata_url(project_id)?).await
    }

    pub async fn modrinth_versions(
        &self,
        project_id: &str,
        loader: &str,
        minecraft_version: &str,
    ) -> ProvisionResult<Vec<ModrinthVersion>> {
        let url = project_versions_url(project_id, loader, minecraft_version)?;
        get_json(self.fetch(), &url).await
    }
}
