use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::properties::{render_properties, ServerOption};
use super::script::{jar_start_script, write_script, ScriptPlatform};
use crate::core::error::{ProvisionError, ProvisionResult};
use crate::core::loaders::LoaderKind;

pub const PROPERTIES_FILE: &str = "server.properties";
pub const EULA_FILE: &str = "eula.txt";

/// Launch files for a provisioned server.
#[derive(Debug, Clone)]
pub struct LaunchFiles<'a> {
    pub port: u16,
    pub options: &'a BTreeSet<ServerOption>,
    pub java: &'a Path,
    pub eula_accepted: bool,
    pub loader: LoaderKind,
    pub platform: ScriptPlatform,
}

/// Paths actually written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenFiles {
    pub properties: PathBuf,
    pub start_script: Option<PathBuf>,
    pub eula: Option<PathBuf>,
}

impl LaunchFiles<'_> {
    /// Write the launch files into `directory`.
    ///
    /// Installer-based loaders already produced their start script, so none
    /// is written for them. Without EULA acceptance no marker is written and
    /// the server refuses to start until `eula.txt` is edited by hand.
    pub async fn write(&self, directory: &Path) -> ProvisionResult<WrittenFiles> {
        if self.options.contains(&ServerOption::OfflineMode) {
            warn!("Offline mode is insecure and should only be used for testing");
        }

        let properties = directory.join(PROPERTIES_FILE);
        tokio::fs::write(&properties, render_properties(self.port, self.options))
            .await
            .map_err(|e| ProvisionError::io(&properties, e))?;

        let start_script = if self.loader.uses_installer() {
            None
        } else {
            let path = directory.join(self.platform.start_script_name());
            write_script(&path, &jar_start_script(self.java, self.platform), self.platform).await?;
            Some(path)
        };

        let eula = if self.eula_accepted {
            let path = directory.join(EULA_FILE);
            tokio::fs::write(&path, "eula=true\n")
                .await
                .map_err(|e| ProvisionError::io(&path, e))?;
            Some(path)
        } else {
            info!("EULA not accepted; edit {} before starting the server", EULA_FILE);
            None
        };

        Ok(WrittenFiles {
            properties,
            start_script,
            eula,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(loader: LoaderKind, eula_accepted: bool, options: &BTreeSet<ServerOption>) -> LaunchFiles<'_> {
        LaunchFiles {
            port: 25565,
            options,
            java: Path::new("/jdk/bin/java"),
            eula_accepted,
            loader,
            platform: ScriptPlatform::Unix,
        }
    }

    #[tokio::test]
    async fn writes_all_files_for_jar_loaders() {
        let dir = tempfile::tempdir().unwrap();
        let options = BTreeSet::from([ServerOption::Whitelist]);

        let written = files(LoaderKind::Fabric, true, &options)
            .write(dir.path())
            .await
            .unwrap();

        assert_eq!(written.start_script, Some(dir.path().join("start.sh")));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("eula.txt")).unwrap(),
            "eula=true\n"
        );
        let script = std::fs::read_to_string(dir.path().join("start.sh")).unwrap();
        assert!(script.contains("/jdk/bin/java -Xmx2G -jar server.jar nogui"));
        let props = std::fs::read_to_string(dir.path().join("server.properties")).unwrap();
        assert!(props.contains("white-list=true\n"));
    }

    #[tokio::test]
    async fn installer_loaders_keep_their_own_script() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("start.sh"), "generated by installer").unwrap();

        for loader in [LoaderKind::Forge, LoaderKind::NeoForge] {
            let written = files(loader, true, &BTreeSet::new())
                .write(dir.path())
                .await
                .unwrap();
            assert_eq!(written.start_script, None);
        }

        assert_eq!(
            std::fs::read_to_string(dir.path().join("start.sh")).unwrap(),
            "generated by installer"
        );
    }

    #[tokio::test]
    async fn no_eula_marker_without_acceptance() {
        let dir = tempfile::tempdir().unwrap();

        let written = files(LoaderKind::Vanilla, false, &BTreeSet::new())
            .write(dir.path())
            .await
            .unwrap();

        assert_eq!(written.eula, None);
        assert!(!dir.path().join("eula.txt").exists());
        assert!(dir.path().join("server.properties").exists());
    }
}
