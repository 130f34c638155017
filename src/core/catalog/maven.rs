// ─── Maven release lists ───
// Forge and NeoForge publish flat release lists through maven-metadata.xml.
//   Forge:    "<mcVersion>-<forgeVersion>"   e.g. 1.20.1-47.2.0
//   NeoForge: "<major>.<minor>.<patch>"      e.g. 21.1.5 → MC 1.21.1

use serde::Deserialize;

use super::CatalogClient;
use crate::core::error::ProvisionResult;
use crate::core::http::get_xml;

pub const FORGE_MAVEN: &str = "https://maven.minecraftforge.net";
pub const NEOFORGE_MAVEN: &str = "https://maven.neoforged.net/releases";

#[derive(Debug, Deserialize)]
struct MavenMetadata {
    versioning: MavenVersioning,
}

#[derive(Debug, Deserialize)]
struct MavenVersioning {
    versions: MavenVersions,
}

#[derive(Debug, Deserialize)]
struct MavenVersions {
    #[serde(rename = "version", default)]
    version: Vec<String>,
}

pub fn forge_installer_url(release: &str) -> String {
    format!(
        "{}/net/minecraftforge/forge/{release}/forge-{release}-installer.jar",
        FORGE_MAVEN
    )
}

pub fn neoforge_installer_url(release: &str) -> String {
    format!(
        "{}/net/neoforged/neoforge/{release}/neoforge-{release}-installer.jar",
        NEOFORGE_MAVEN
    )
}

/// `"1.20.1-47.2.0"` → `"1.20.1"`.
pub fn forge_minecraft_version(release: &str) -> Option<&str> {
    release
        .split_once('-')
        .map(|(mc, _)| mc)
        .filter(|mc| !mc.is_empty())
}

/// `"21.1.5"` → `"1.21.1"`.
pub fn neoforge_minecraft_version(release: &str) -> Option<String> {
    let mut parts = release.split('.');
    let major = parts.next().filter(|p| !p.is_empty())?;
    let minor = parts.next().filter(|p| !p.is_empty())?;
    Some(format!("1.{}.{}", major, minor))
}

/// Whether a NeoForge release targets `minecraft_version`.
///
/// `x.0.y` releases target the `.0` game release, which Mojang names
/// without the trailing component (`21.0.167` → `1.21`).
pub fn neoforge_targets(release: &str, minecraft_version: &str) -> bool {
    match neoforge_minecraft_version(release) {
        Some(derived) if derived == minecraft_version => true,
        Some(derived) => derived
            .strip_suffix(".0")
            .is_some_and(|short| short == minecraft_version),
        None => false,
    }
}

/// Numeric ordering key: `"1.20.1-47.2.0"` → `[1, 20, 1, 47, 2, 0]`.
pub fn version_sort_key(version: &str) -> Vec<u64> {
    version
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .collect()
}

/// Highest release by [`version_sort_key`] among those accepted by `targets`.
pub fn newest_matching<'a, F>(releases: &'a [String], targets: F) -> Option<&'a str>
where
    F: Fn(&str) -> bool,
{
    releases
        .iter()
        .filter(|r| targets(r))
        .max_by_key(|r| version_sort_key(r))
        .map(String::as_str)
}

impl CatalogClient {
    /// All Forge releases, as listed in maven metadata.
    pub async fn forge_releases(&self) -> ProvisionResult<Vec<String>> {
        let url = format!("{}/net/minecraftforge/forge/maven-metadata.xml", FORGE_MAVEN);
        let metadata: MavenMetadata = get_xml(self.fetch(), &url).await?;
        Ok(metadata.versioning.versions.version)
    }

    /// All NeoForge releases, as listed in maven metadata.
    pub async fn neoforge_releases(&self) -> ProvisionResult<Vec<String>> {
        let url = format!("{}/net/neoforged/neoforge/maven-metadata.xml", NEOFORGE_MAVEN);
        let metadata: MavenMetadata = get_xml(self.fetch(), &url).await?;
        Ok(metadata.versioning.versions.version)
    }
}
