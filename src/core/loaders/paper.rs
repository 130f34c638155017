use async_trait::async_trait;
use tracing::info;

use super::context::ProvisionContext;
use super::installer::{LoaderProvisioner, ProvisionOutcome};
use crate::core::catalog::paper::sort_builds;
use crate::core::downloader::Checksum;
use crate::core::error::{ProvisionError, ProvisionResult};

/// Paper server jar from the PaperMC fill API, preferring stable builds.
pub struct PaperProvisioner;

#[async_trait]
impl LoaderProvisioner for PaperProvisioner {
    async fn provision(&self, ctx: &ProvisionContext<'_>) -> ProvisionResult<ProvisionOutcome> {
        info!("Fetching Paper information");

        let project = ctx.catalog.paper_project().await?;
        if !project.supports(ctx.minecraft_version) {
            return Ok(ProvisionOutcome::Unsupported(
                "Paper is not supported on this version".into(),
            ));
        }

        let mut builds = ctx.catalog.paper_builds(ctx.minecraft_version).await?;
        sort_builds(&mut builds);
        let build = builds.first().ok_or_else(|| {
            ProvisionError::LoaderApi(format!("Paper has no builds for {}", ctx.minecraft_version))
        })?;
        let download = build.server_download().ok_or_else(|| {
            ProvisionError::LoaderApi(format!("Paper build {} has no server download", build.id))
        })?;

        info!("Downloading Paper server build {} ({:?})", build.id, build.channel);
        let dest = ctx.server_jar_path();
        let checksum = download.checksums.sha256.clone().map(Checksum::Sha256);
        ctx.downloader
            .download_file(&download.url, &dest, checksum.as_ref())
            .await?;

        Ok(ProvisionOutcome::Installed(dest))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::catalog::paper::PAPER_PROJECT_URL;
    use crate::core::http::testing::StaticFetch;
    use crate::core::loaders::testing::Harness;

    fn build(id: u64, channel: &str) -> serde_json::Value {
        json!({
            "id": id,
            "channel": channel,
            "downloads": { "server:default": {
                "name": format!("paper-{id}.jar"),
                "url": format!("https://fill-data.test/paper-{id}.jar")
            } }
        })
    }

    fn upstream() -> StaticFetch {
        StaticFetch::new()
            .route_json(
                PAPER_PROJECT_URL,
                json!({ "project": { "id": "paper" }, "versions": { "1.21": ["1.21.1", "1.21"] } }),
            )
            .route_json(
                format!("{PAPER_PROJECT_URL}/versions/1.21.1/builds"),
                json!([build(133, "ALPHA"), build(130, "STABLE"), build(128, "STABLE")]),
            )
            .route("https://fill-data.test/paper-130.jar", "paper-130")
    }

    #[tokio::test]
    async fn picks_newest_stable_build() {
        let harness = Harness::new(upstream(), "{}");

        let outcome = PaperProvisioner
            .provision(&harness.ctx("1.21.1"))
            .await
            .unwrap();

        assert_eq!(outcome, ProvisionOutcome::Installed(harness.target().join("server.jar")));
        assert_eq!(
            std::fs::read(harness.target().join("server.jar")).unwrap(),
            b"paper-130"
        );
    }

    #[tokio::test]
    async fn version_not_listed_is_unsupported() {
        let harness = Harness::new(upstream(), "{}");

        let outcome = PaperProvisioner
            .provision(&harness.ctx("1.8.8"))
            .await
            .unwrap();

        assert!(matches!(outcome, ProvisionOutcome::Unsupported(_)));
        assert!(harness.is_target_empty());
    }
}
