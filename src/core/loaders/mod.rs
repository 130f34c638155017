pub mod context;
pub mod external;
pub mod fabric;
pub mod forge;
pub mod installer;
pub mod kind;
pub mod neoforge;
pub mod paper;
pub mod vanilla;

pub use context::ProvisionContext;
pub use installer::{resolve, LoaderProvisioner, ProvisionOutcome, Provisioner};
pub use kind::LoaderKind;

/// File name every direct-download variant writes the server to.
pub const SERVER_JAR: &str = "server.jar";

#[cfg(test)]
pub(crate) mod testing {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::ProvisionContext;
    use crate::core::catalog::{CatalogClient, VersionMetadata};
    use crate::core::downloader::Downloader;
    use crate::core::http::testing::StaticFetch;
    use crate::core::http::Fetch;
    use crate::core::server::ScriptPlatform;

    /// Stands in for `java -jar <installer> <flag>`: like the real launcher
    /// it resolves the jar against its working directory, then writes the
    /// launch scripts a modern Forge/NeoForge installer leaves behind.
    #[cfg(unix)]
    const FAKE_INSTALLER_JAVA: &str = r#"#!/bin/sh
if [ "$1" != "-jar" ] || [ ! -f "$2" ]; then
  echo "Error: Unable to access jarfile $2" >&2
  exit 1
fi
printf '#!/usr/bin/env sh\njava @user_jvm_args.txt "$@"\n' > run.sh
printf '@echo off\r\njava @user_jvm_args.txt %%*\r\npause\r\n' > run.bat
echo "Installed server with $3"
"#;

    /// Temp target directory plus canned upstream for provisioner tests.
    pub struct Harness {
        dir: TempDir,
        pub fetch: Arc<StaticFetch>,
        catalog: CatalogClient,
        downloader: Downloader,
        metadata: VersionMetadata,
        java: PathBuf,
        _java_dir: Option<TempDir>,
    }

    impl Harness {
        pub fn new(fetch: StaticFetch, metadata_json: &str) -> Self {
            Self::in_dir(tempfile::tempdir().unwrap(), fetch, metadata_json)
        }

        /// Target under the current directory, addressed by a relative path.
        pub fn relative(fetch: StaticFetch, metadata_json: &str) -> Self {
            let dir = tempfile::tempdir_in(".").unwrap();
            assert!(dir.path().is_relative());
            Self::in_dir(dir, fetch, metadata_json)
        }

        fn in_dir(dir: TempDir, fetch: StaticFetch, metadata_json: &str) -> Self {
            let fetch = Arc::new(fetch);
            let shared: Arc<dyn Fetch> = fetch.clone();
            Self {
                dir,
                fetch,
                catalog: CatalogClient::new(shared.clone()),
                downloader: Downloader::new(shared),
                metadata: serde_json::from_str(metadata_json).unwrap(),
                java: PathBuf::from("java"),
                _java_dir: None,
            }
        }

        pub fn with_java(mut self, java: &str) -> Self {
            self.java = PathBuf::from(java);
            self
        }

        /// Use a shell script that behaves like a successful installer run.
        #[cfg(unix)]
        pub fn with_fake_installer_java(mut self) -> Self {
            use std::os::unix::fs::PermissionsExt;

            let java_dir = tempfile::tempdir().unwrap();
            let java = java_dir.path().join("java");
            std::fs::write(&java, FAKE_INSTALLER_JAVA).unwrap();
            std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o755)).unwrap();
            self.java = java;
            self._java_dir = Some(java_dir);
            self
        }

        pub fn java(&self) -> &Path {
            &self.java
        }

        pub fn ctx<'a>(&'a self, minecraft_version: &'a str) -> ProvisionContext<'a> {
            ProvisionContext {
                minecraft_version,
                metadata: &self.metadata,
                target_dir: self.dir.path(),
                java: &self.java,
                platform: ScriptPlatform::Unix,
                catalog: &self.catalog,
                downloader: &self.downloader,
            }
        }

        pub fn target(&self) -> &Path {
            self.dir.path()
        }

        pub fn is_target_empty(&self) -> bool {
            std::fs::read_dir(self.dir.path()).unwrap().next().is_none()
        }
    }

    pub fn maven_metadata(versions: &[&str]) -> String {
        let versions: String = versions
            .iter()
            .map(|v| format!("<version>{}</version>", v))
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><metadata><versioning><versions>{}</versions></versioning></metadata>",
            versions
        )
    }
}
