use std::fmt;
use std::str::FromStr;

/// Supported server software.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoaderKind {
    Vanilla,
    Fabric,
    Paper,
    Forge,
    NeoForge,
}

impl LoaderKind {
    pub const ALL: [LoaderKind; 5] = [
        LoaderKind::Fabric,
        LoaderKind::Paper,
        LoaderKind::NeoForge,
        LoaderKind::Forge,
        LoaderKind::Vanilla,
    ];

    /// Identifier used in configuration keys and Modrinth loader filters.
    pub fn as_str(self) -> &'static str {
        match self {
            LoaderKind::Vanilla => "vanilla",
            LoaderKind::Fabric => "fabric",
            LoaderKind::Paper => "paper",
            LoaderKind::Forge => "forge",
            LoaderKind::NeoForge => "neoforge",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LoaderKind::Vanilla => "Vanilla",
            LoaderKind::Fabric => "Fabric",
            LoaderKind::Paper => "Paper",
            LoaderKind::Forge => "Forge",
            LoaderKind::NeoForge => "NeoForge",
        }
    }

    /// Whether mods/plugins are provisioned for this variant.
    pub fn supports_mods(self) -> bool {
        !matches!(self, LoaderKind::Vanilla)
    }

    /// Variants whose upstream ships an installer that writes its own start script.
    pub fn uses_installer(self) -> bool {
        matches!(self, LoaderKind::Forge | LoaderKind::NeoForge)
    }
}

impl fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoaderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoaderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown server software '{}' (expected one of: fabric, paper, neoforge, forge, vanilla)",
                    s
                )
            })
    }
}
