use std::path::Path;

use crate::core::error::{ProvisionError, ProvisionResult};

/// Heap flag baked into generated start scripts.
pub const HEAP_FLAG: &str = "-Xmx2G";

/// Which flavor of launch script to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPlatform {
    Unix,
    Windows,
}

impl ScriptPlatform {
    pub fn current() -> Self {
        if cfg!(windows) {
            ScriptPlatform::Windows
        } else {
            ScriptPlatform::Unix
        }
    }

    /// Canonical start script name.
    pub fn start_script_name(self) -> &'static str {
        match self {
            ScriptPlatform::Unix => "start.sh",
            ScriptPlatform::Windows => "start.cmd",
        }
    }

    /// Launch script the Forge/NeoForge installers generate.
    pub fn installer_script_name(self) -> &'static str {
        match self {
            ScriptPlatform::Unix => "run.sh",
            ScriptPlatform::Windows => "run.bat",
        }
    }

    pub fn other(self) -> Self {
        match self {
            ScriptPlatform::Unix => ScriptPlatform::Windows,
            ScriptPlatform::Windows => ScriptPlatform::Unix,
        }
    }
}

/// Runtime path as it should appear on a script command line.
pub fn quote_runtime(java: &Path) -> String {
    let raw = java.to_string_lossy();
    if raw.chars().any(char::is_whitespace) {
        format!("\"{}\"", raw)
    } else {
        raw.into_owned()
    }
}

/// Start script for a plain `server.jar` (vanilla, Fabric, Paper).
pub fn jar_start_script(java: &Path, platform: ScriptPlatform) -> String {
    let command = format!("{} {} -jar server.jar nogui", quote_runtime(java), HEAP_FLAG);
    match platform {
        ScriptPlatform::Unix => format!("#!/usr/bin/env sh\n{}\n", command),
        ScriptPlatform::Windows => format!("{}\r\nPAUSE\r\n", command),
    }
}

/// Replace the leading `java` of every command line in an installer-generated
/// script with the resolved runtime. Comments and other lines are untouched.
pub fn rewrite_runtime_invocation(script: &str, java: &Path) -> String {
    let runtime = quote_runtime(java);
    script
        .split_inclusive('\n')
        .map(|line| {
            let indent_len = line.len() - line.trim_start().len();
            let (indent, rest) = line.split_at(indent_len);
            match rest.strip_prefix("java") {
                Some(tail) if tail.starts_with(char::is_whitespace) || tail.is_empty() => {
                    format!("{}{}{}", indent, runtime, tail)
                }
                _ => line.to_string(),
            }
        })
        .collect()
}

/// Write a script, marking it executable on unix hosts.
pub async fn write_script(path: &Path, contents: &str, platform: ScriptPlatform) -> ProvisionResult<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| ProvisionError::io(path, e))?;

    if platform == ScriptPlatform::Unix {
        set_executable(path).await?;
    }
    Ok(())
}

#[cfg(unix)]
async fn set_executable(path: &Path) -> ProvisionResult<()> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| ProvisionError::io(path, e))
}

#[cfg(not(unix))]
async fn set_executable(_path: &Path) -> ProvisionResult<()> {
    Ok(())
}
