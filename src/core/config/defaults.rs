use std::collections::BTreeMap;

use super::model::{Configuration, ModPreset, PresetTable};

fn bare(id: &str) -> ModPreset {
    ModPreset::BareId(id.to_string())
}

fn selected(mods: &[&str]) -> ModPreset {
    ModPreset::Detailed {
        default: true,
        mods: mods.iter().map(|m| m.to_string()).collect(),
    }
}

fn table(entries: Vec<(&str, ModPreset)>) -> PresetTable {
    PresetTable::new(
        entries
            .into_iter()
            .map(|(name, preset)| (name.to_string(), preset))
            .collect(),
    )
}

/// Configuration used when no config file exists.
///
/// Ids are Modrinth project ids.
pub fn builtin_configuration() -> Configuration {
    let spark = || selected(&["l6YH9Als"]);
    let no_chat_reports = || bare("qQyHxfxd");
    let voice_chat = || bare("9eGKb6K1");

    let mut mod_presets = BTreeMap::new();
    mod_presets.insert(
        "fabric".to_string(),
        table(vec![
            (
                "Optimization",
                selected(&[
                    "gvQqBUqZ", // Lithium
                    "uXXizFIs", // FerriteCore
                    "NRjRiSSD", // Memory Leak Fix
                    "fQEb0iXm", // Krypton
                    "VSNURh3q", // C2ME
                    "KuNKN7d2", // Noisium
                ]),
            ),
            ("spark", spark()),
            ("No Chat Reports", no_chat_reports()),
            ("Simple Voice Chat", voice_chat()),
        ]),
    );
    mod_presets.insert(
        "paper".to_string(),
        table(vec![
            ("FreedomChat", bare("MubyTbnA")),
            ("Simple Voice Chat", voice_chat()),
            ("WorldEdit", bare("1u6JkXh5")),
            ("ViaVersion", bare("P1OZGk5p")),
            ("LuckPerms", bare("Vebnzrzj")),
        ]),
    );
    for loader in ["neoforge", "forge"] {
        mod_presets.insert(
            loader.to_string(),
            table(vec![
                ("spark", spark()),
                ("No Chat Reports", no_chat_reports()),
                ("Simple Voice Chat", voice_chat()),
            ]),
        );
    }

    let mut default_mods = BTreeMap::new();
    // Fabric API
    default_mods.insert("fabric".to_string(), vec!["P7dR8mSH".to_string()]);

    Configuration {
        default_mods,
        mod_presets,
        java_paths: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loaders::LoaderKind;

    #[test]
    fn fabric_defaults_select_optimization_and_spark() {
        let config = builtin_configuration();
        assert_eq!(
            config.default_presets(LoaderKind::Fabric),
            ["Optimization", "spark"]
        );
        let ids = config.mod_ids_for(LoaderKind::Fabric, &config.default_presets(LoaderKind::Fabric));
        assert_eq!(ids.first().map(String::as_str), Some("P7dR8mSH"));
        assert_eq!(ids.last().map(String::as_str), Some("l6YH9Als"));
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn vanilla_has_nothing() {
        let config = builtin_configuration();
        assert!(config.presets(LoaderKind::Vanilla).is_none());
        assert!(config.mod_ids_for(LoaderKind::Vanilla, &[]).is_empty());
    }
}
