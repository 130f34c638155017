// ─── External installer protocol ───
// Forge and NeoForge ship an installer jar that builds the server tree
// itself. We run it, then turn its generated launch script into ours.
// Cleanup happens only after a successful exit so a failed install
// leaves the installer and its output on disk for inspection.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use super::context::ProvisionContext;
use super::installer::ProvisionOutcome;
use crate::core::error::{ProvisionError, ProvisionResult};
use crate::core::server::script::{rewrite_runtime_invocation, write_script, ScriptPlatform};

/// Installer jars that run server installation from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerKind {
    Forge,
    NeoForge,
}

impl InstallerKind {
    pub fn install_flag(self) -> &'static str {
        match self {
            InstallerKind::Forge => "--installServer",
            InstallerKind::NeoForge => "--install-server",
        }
    }

    fn name(self) -> &'static str {
        match self {
            InstallerKind::Forge => "Forge",
            InstallerKind::NeoForge => "NeoForge",
        }
    }
}

/// Download `installer_url`, run it in the target directory and adopt its
/// launch script.
pub async fn install_with(
    kind: InstallerKind,
    ctx: &ProvisionContext<'_>,
    installer_url: &str,
    installer_name: &str,
) -> ProvisionResult<ProvisionOutcome> {
    let installer_path = ctx.target_dir.join(installer_name);
    info!("Downloading {} installer {}", kind.name(), installer_name);
    ctx.downloader
        .download_file(installer_url, &installer_path, None)
        .await?;

    let stdout = run_installer(kind, ctx.java, Path::new(installer_name), ctx.target_dir).await?;
    finalize_install(ctx.target_dir, ctx.java, &installer_path, ctx.platform, &stdout).await?;

    info!("{} server installed in {:?}", kind.name(), ctx.target_dir);
    Ok(ProvisionOutcome::Installed(ctx.target_dir.to_path_buf()))
}

/// Run the installer to completion. Blocks the run; no timeout.
///
/// A relative `installer_path` is resolved by the child against
/// `working_dir`. Returns captured stdout on success.
pub async fn run_installer(
    kind: InstallerKind,
    java: &Path,
    installer_path: &Path,
    working_dir: &Path,
) -> ProvisionResult<String> {
    info!("Running {} installer with {:?}", kind.name(), java);

    let output = Command::new(java)
        .arg("-jar")
        .arg(installer_path)
        .arg(kind.install_flag())
        .current_dir(working_dir)
        .output()
        .await
        .map_err(|source| ProvisionError::InstallerSpawn {
            java: java.display().to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        return Err(ProvisionError::InstallerFailed {
            code: output.status.code(),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    debug!("{} installer output:\n{}", kind.name(), stdout);
    Ok(stdout)
}

/// Post-install cleanup, only called after the installer exited cleanly:
/// drop the installer jar, rewrite the platform's generated launch script
/// to use `java` under the canonical start script name, and remove the
/// generated scripts for both platforms.
pub async fn finalize_install(
    target_dir: &Path,
    java: &Path,
    installer_path: &Path,
    platform: ScriptPlatform,
    installer_stdout: &str,
) -> ProvisionResult<PathBuf> {
    let generated = target_dir.join(platform.installer_script_name());
    if !generated.is_file() {
        return Err(ProvisionError::MissingInstallerOutput {
            path: generated,
            stdout: installer_stdout.to_string(),
        });
    }

    let script = tokio::fs::read_to_string(&generated)
        .await
        .map_err(|e| ProvisionError::io(&generated, e))?;
    let start_script = target_dir.join(platform.start_script_name());
    write_script(&start_script, &rewrite_runtime_invocation(&script, java), platform).await?;

    remove_if_exists(installer_path).await?;
    remove_if_exists(&generated).await?;
    remove_if_exists(&target_dir.join(platform.other().installer_script_name())).await?;

    Ok(start_script)
}

async fn remove_if_exists(path: &Path) -> ProvisionResult<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ProvisionError::io(path, e)),
    }
}
