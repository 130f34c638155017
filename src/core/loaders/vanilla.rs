use async_trait::async_trait;
use tracing::{info, warn};

use super::context::ProvisionContext;
use super::installer::{LoaderProvisioner, ProvisionOutcome};
use crate::core::downloader::Checksum;
use crate::core::error::ProvisionResult;

/// Official Mojang server jar, straight from the version metadata.
pub struct VanillaProvisioner;

#[async_trait]
impl LoaderProvisioner for VanillaProvisioner {
    async fn provision(&self, ctx: &ProvisionContext<'_>) -> ProvisionResult<ProvisionOutcome> {
        let Some(server) = &ctx.metadata.downloads.server else {
            warn!("Minecraft {} has no server download", ctx.minecraft_version);
            return Ok(ProvisionOutcome::Unsupported(
                "There is no server jar for this version".into(),
            ));
        };

        info!("Downloading vanilla server {}", ctx.minecraft_version);
        let dest = ctx.server_jar_path();
        let checksum = server.sha1.clone().map(Checksum::Sha1);
        ctx.downloader
            .download_file(&server.url, &dest, checksum.as_ref())
            .await?;

        Ok(ProvisionOutcome::Installed(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loaders::testing::Harness;

    #[tokio::test]
    async fn missing_server_download_is_unsupported() {
        let harness = Harness::new(Default::default(), r#"{ "downloads": {} }"#);

        let outcome = VanillaProvisioner
            .provision(&harness.ctx("a1.0.4"))
            .await
            .unwrap();

        assert!(matches!(outcome, ProvisionOutcome::Unsupported(_)));
        assert!(harness.is_target_empty());
    }

    #[tokio::test]
    async fn downloads_server_jar_with_sha1() {
        let fetch = crate::core::http::testing::StaticFetch::new()
            .route("https://piston-data.test/server.jar", "abc");
        let harness = Harness::new(
            fetch,
            r#"{ "downloads": { "server": {
                "sha1": "a9993e364706816aba3e25717850c26c9cd0d89d",
                "url": "https://piston-data.test/server.jar" } } }"#,
        );

        let outcome = VanillaProvisioner
            .provision(&harness.ctx("1.21.1"))
            .await
            .unwrap();

        let jar = harness.target().join("server.jar");
        assert_eq!(outcome, ProvisionOutcome::Installed(jar.clone()));
        assert_eq!(std::fs::read(jar).unwrap(), b"abc");
    }
}
