use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

/// Key of the catch-all entry in the configured runtime table.
pub const DEFAULT_RUNTIME_KEY: &str = "default";

/// Executable used when nothing is configured: whatever `java` is on PATH.
pub const AMBIENT_JAVA: &str = "java";

/// Pick the Java executable for `required_major`.
///
/// Order: the entry keyed by the major version, then the `default` entry,
/// then the ambient `java` on the host.
pub fn resolve_runtime_path(java_paths: &BTreeMap<String, String>, required_major: u32) -> PathBuf {
    let resolved = java_paths
        .get(&required_major.to_string())
        .or_else(|| java_paths.get(DEFAULT_RUNTIME_KEY))
        .map(String::as_str)
        .unwrap_or(AMBIENT_JAVA);

    debug!("Java {} resolved to {}", required_major, resolved);
    PathBuf::from(resolved)
}

/// Best guess at the Java major a game version needs, for metadata that
/// does not declare one.
pub fn required_java_for_minecraft_version(minecraft_version: &str) -> u32 {
    let lower = minecraft_version.to_ascii_lowercase();
    if let Some(week_pos) = lower.find('w') {
        let year_hint = &lower[..week_pos];
        let year_suffix = year_hint
            .len()
            .checked_sub(2)
            .and_then(|start| year_hint.get(start..));
        if let Some(Ok(snapshot_year)) = year_suffix.map(str::parse::<u32>) {
            if snapshot_year >= 24 {
                return 21;
            }
            if snapshot_year >= 21 {
                return 17;
            }
            return 8;
        }
    }

    let mut parts = minecraft_version.split('.');
    let major = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(1);
    let minor = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(0);
    let patch = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(0);

    if major > 1 || minor >= 21 || (minor == 20 && patch >= 5) {
        21
    } else if minor >= 17 {
        17
    } else {
        8
    }
}
