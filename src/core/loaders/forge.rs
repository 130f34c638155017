use async_trait::async_trait;
use tracing::info;

use super::context::ProvisionContext;
use super::external::{install_with, InstallerKind};
use super::installer::{LoaderProvisioner, ProvisionOutcome};
use crate::core::catalog::maven::{forge_installer_url, forge_minecraft_version, newest_matching};
use crate::core::error::ProvisionResult;

/// Installs Forge by downloading and executing the official installer jar.
pub struct ForgeProvisioner;

#[async_trait]
impl LoaderProvisioner for ForgeProvisioner {
    async fn provision(&self, ctx: &ProvisionContext<'_>) -> ProvisionResult<ProvisionOutcome> {
        info!("Fetching Forge information");

        let releases = ctx.catalog.forge_releases().await?;
        let Some(release) = newest_matching(&releases, |r| {
            forge_minecraft_version(r) == Some(ctx.minecraft_version)
        }) else {
            return Ok(ProvisionOutcome::Unsupported(
                "Forge is not supported on this version".into(),
            ));
        };

        info!("Selected Forge {}", release);
        let installer_name = format!("forge-{}-installer.jar", release);
        install_with(
            InstallerKind::Forge,
            ctx,
            &forge_installer_url(release),
            &installer_name,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::maven::FORGE_MAVEN;
    use crate::core::http::testing::StaticFetch;
    use crate::core::loaders::testing::{maven_metadata, Harness};
    use crate::core::server::script::quote_runtime;

    #[tokio::test]
    async fn no_release_for_version_is_unsupported() {
        let fetch = StaticFetch::new().route(
            format!("{FORGE_MAVEN}/net/minecraftforge/forge/maven-metadata.xml"),
            maven_metadata(&["1.20.1-47.2.0", "1.21.1-52.0.16"]),
        );
        let harness = Harness::new(fetch, "{}");

        let outcome = ForgeProvisioner
            .provision(&harness.ctx("1.19.2"))
            .await
            .unwrap();

        assert!(matches!(outcome, ProvisionOutcome::Unsupported(_)));
        assert!(harness.is_target_empty());
    }

    #[tokio::test]
    async fn installer_failure_aborts_and_leaves_installer() {
        let fetch = StaticFetch::new()
            .route(
                format!("{FORGE_MAVEN}/net/minecraftforge/forge/maven-metadata.xml"),
                maven_metadata(&["1.20.1-47.1.0", "1.20.1-47.2.0"]),
            )
            .route(forge_installer_url("1.20.1-47.2.0"), "installer-bytes");
        let harness = Harness::new(fetch, "{}").with_java("/definitely/not/java");

        let err = ForgeProvisioner
            .provision(&harness.ctx("1.20.1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            crate::core::error::ProvisionError::InstallerSpawn { .. }
        ));
        assert!(harness
            .target()
            .join("forge-1.20.1-47.2.0-installer.jar")
            .exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn installs_newest_release_for_version() {
        let fetch = StaticFetch::new()
            .route(
                format!("{FORGE_MAVEN}/net/minecraftforge/forge/maven-metadata.xml"),
                maven_metadata(&["1.20.1-47.1.0", "1.20.1-47.2.0", "1.21.1-52.0.16"]),
            )
            .route(forge_installer_url("1.20.1-47.2.0"), "installer-bytes");
        let harness = Harness::new(fetch, "{}").with_fake_installer_java();

        let outcome = ForgeProvisioner
            .provision(&harness.ctx("1.20.1"))
            .await
            .unwrap();

        let target = harness.target();
        assert_eq!(outcome, ProvisionOutcome::Installed(target.to_path_buf()));
        let script = std::fs::read_to_string(target.join("start.sh")).unwrap();
        assert!(script.contains(&format!("\n{} @user_jvm_args.txt", quote_runtime(harness.java()))));
        assert!(!target.join("forge-1.20.1-47.2.0-installer.jar").exists());
        assert!(!target.join("run.sh").exists());
        assert!(!target.join("run.bat").exists());
    }
}
