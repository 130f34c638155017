use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::core::loaders::LoaderKind;

/// A named bundle of mod ids.
///
/// In YAML either a bare id (`Simple Voice Chat: 9eGKb6K1`) or a record
/// (`spark: { default: true, mods: l6YH9Als }`). `mods` may itself be one
/// id or a list; both normalize to a list at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ModPreset {
    BareId(String),
    Detailed {
        /// Pre-selected in the preset picker. No effect on resolution.
        #[serde(default)]
        default: bool,
        #[serde(deserialize_with = "one_or_many")]
        mods: Vec<String>,
    },
}

impl ModPreset {
    pub fn mod_ids(&self) -> Vec<String> {
        match self {
            ModPreset::BareId(id) => vec![id.clone()],
            ModPreset::Detailed { mods, .. } => mods.clone(),
        }
    }

    pub fn selected_by_default(&self) -> bool {
        matches!(self, ModPreset::Detailed { default: true, .. })
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(id) => vec![id],
        OneOrMany::Many(ids) => ids,
    })
}

/// Presets for one loader, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetTable(Vec<(String, ModPreset)>);

impl PresetTable {
    pub fn new(entries: Vec<(String, ModPreset)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModPreset)> {
        self.0.iter().map(|(name, preset)| (name.as_str(), preset))
    }

    pub fn get(&self, name: &str) -> Option<&ModPreset> {
        self.iter().find(|(n, _)| *n == name).map(|(_, p)| p)
    }
}

impl<'de> Deserialize<'de> for PresetTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PresetTableVisitor;

        impl<'de> Visitor<'de> for PresetTableVisitor {
            type Value = PresetTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of preset name to mod id or preset record")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((name, preset)) = map.next_entry::<String, ModPreset>()? {
                    entries.push((name, preset));
                }
                Ok(PresetTable(entries))
            }
        }

        deserializer.deserialize_map(PresetTableVisitor)
    }
}

/// `javaPaths` key: `default` or a major version, quoted or not.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RuntimeKey(String);

impl<'de> Deserialize<'de> for RuntimeKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuntimeKeyVisitor;

        impl Visitor<'_> for RuntimeKeyVisitor {
            type Value = RuntimeKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"default\" or a Java major version")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(RuntimeKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(RuntimeKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(RuntimeKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(RuntimeKeyVisitor)
    }
}

fn runtime_table<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<RuntimeKey, String>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k.0, v)).collect())
}

/// Static configuration for one run. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// loader → mod ids always installed for that loader.
    #[serde(default)]
    pub default_mods: BTreeMap<String, Vec<String>>,
    /// loader → named presets.
    #[serde(default)]
    pub mod_presets: BTreeMap<String, PresetTable>,
    /// `default` | Java major → executable.
    #[serde(default, deserialize_with = "runtime_table")]
    pub java_paths: BTreeMap<String, String>,
}

impl Configuration {
    pub fn presets(&self, loader: LoaderKind) -> Option<&PresetTable> {
        self.mod_presets.get(loader.as_str())
    }

    /// Presets marked `default: true` for `loader`.
    pub fn default_presets(&self, loader: LoaderKind) -> Vec<String> {
        self.presets(loader)
            .map(|t| {
                t.iter()
                    .filter(|(_, p)| p.selected_by_default())
                    .map(|(n, _)| n.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Mod ids for a run: the loader's default mods, then every selected
    /// preset in declaration order, deduplicated keeping first occurrence.
    pub fn mod_ids_for(&self, loader: LoaderKind, selected_presets: &[String]) -> Vec<String> {
        let defaults = self
            .default_mods
            .get(loader.as_str())
            .cloned()
            .unwrap_or_default();

        let table = self.presets(loader);
        for name in selected_presets {
            if table.and_then(|t| t.get(name)).is_none() {
                warn!("Preset '{}' is not defined for {}; ignoring", name, loader);
            }
        }

        let from_presets = table.into_iter().flat_map(|t| {
            t.iter()
                .filter(|(name, _)| selected_presets.iter().any(|s| s == name))
                .flat_map(|(_, preset)| preset.mod_ids())
        });

        let mut seen = HashSet::new();
        defaults
            .into_iter()
            .chain(from_presets)
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
defaultMods:
  fabric: [P7dR8mSH]
modPresets:
  fabric:
    Optimization:
      default: true
      mods: [gvQqBUqZ, P7dR8mSH]
    spark: { default: true, mods: l6YH9Als }
    No Chat Reports: qQyHxfxd
  paper:
    LuckPerms: Vebnzrzj
javaPaths:
  8: /usr/lib/jvm/java-8/bin/java
  "21": /opt/jdk21/bin/java
  default: java
"#;

    fn sample() -> Configuration {
        serde_yaml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn bare_string_preset_normalizes_to_single_id() {
        let preset: ModPreset = serde_yaml::from_str("qQyHxfxd").unwrap();
        assert_eq!(preset, ModPreset::BareId("qQyHxfxd".into()));
        assert_eq!(preset.mod_ids(), ["qQyHxfxd"]);
    }

    #[test]
    fn record_preset_with_list() {
        let preset: ModPreset = serde_yaml::from_str("mods: [a, b]").unwrap();
        assert_eq!(preset.mod_ids(), ["a", "b"]);
        assert!(!preset.selected_by_default());
    }

    #[test]
    fn record_preset_with_single_id() {
        let preset: ModPreset = serde_yaml::from_str("{ default: true, mods: l6YH9Als }").unwrap();
        assert_eq!(preset.mod_ids(), ["l6YH9Als"]);
        assert!(preset.selected_by_default());
    }

    #[test]
    fn presets_keep_declaration_order() {
        let config = sample();
        let names: Vec<_> = config
            .presets(LoaderKind::Fabric)
            .unwrap()
            .iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["Optimization", "spark", "No Chat Reports"]);
        assert_eq!(
            config.default_presets(LoaderKind::Fabric),
            ["Optimization", "spark"]
        );
        assert!(config.presets(LoaderKind::Forge).is_none());
    }

    #[test]
    fn java_paths_accept_numeric_keys() {
        let config = sample();
        assert_eq!(config.java_paths["8"], "/usr/lib/jvm/java-8/bin/java");
        assert_eq!(config.java_paths["21"], "/opt/jdk21/bin/java");
        assert_eq!(config.java_paths["default"], "java");
    }

    #[test]
    fn mod_ids_union_defaults_and_presets_deduplicated() {
        let config = sample();
        let selected = vec!["No Chat Reports".to_string(), "Optimization".to_string()];
        // Presets contribute in declaration order, not selection order.
        assert_eq!(
            config.mod_ids_for(LoaderKind::Fabric, &selected),
            ["P7dR8mSH", "gvQqBUqZ", "qQyHxfxd"]
        );
    }

    #[test]
    fn unknown_presets_and_loaders_contribute_nothing() {
        let config = sample();
        assert_eq!(
            config.mod_ids_for(LoaderKind::Fabric, &["Missing".to_string()]),
            ["P7dR8mSH"]
        );
        assert!(config.mod_ids_for(LoaderKind::Forge, &[]).is_empty());
    }

    #[test]
    fn all_keys_are_optional() {
        let config: Configuration = serde_yaml::from_str("javaPaths: { default: java }").unwrap();
        assert!(config.default_mods.is_empty());
        assert!(config.mod_presets.is_empty());
    }
}
