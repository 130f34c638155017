use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 25565;

/// Recognized `server.properties` toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServerOption {
    Whitelist,
    NoSpawnProtection,
    NoSecureProfiles,
    /// Insecure; intended for testing only.
    OfflineMode,
    HideOnlinePlayers,
}

impl ServerOption {
    pub const ALL: [ServerOption; 5] = [
        ServerOption::Whitelist,
        ServerOption::NoSpawnProtection,
        ServerOption::NoSecureProfiles,
        ServerOption::OfflineMode,
        ServerOption::HideOnlinePlayers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServerOption::Whitelist => "whitelist",
            ServerOption::NoSpawnProtection => "no-spawn-protection",
            ServerOption::NoSecureProfiles => "no-secure-profiles",
            ServerOption::OfflineMode => "offline-mode",
            ServerOption::HideOnlinePlayers => "hide-online-players",
        }
    }
}

impl fmt::Display for ServerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerOption::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| format!("unknown server option '{}'", s))
    }
}

/// Render `server.properties`. Every recognized key is written so the
/// file does not depend on the server's built-in defaults.
pub fn render_properties(port: u16, options: &BTreeSet<ServerOption>) -> String {
    let on = |o: ServerOption| options.contains(&o);

    let entries = [
        ("server-port", port.to_string()),
        ("white-list", on(ServerOption::Whitelist).to_string()),
        ("enforce-whitelist", on(ServerOption::Whitelist).to_string()),
        (
            "spawn-protection",
            if on(ServerOption::NoSpawnProtection) { "0" } else { "16" }.to_string(),
        ),
        (
            "enforce-secure-profile",
            (!on(ServerOption::NoSecureProfiles)).to_string(),
        ),
        ("online-mode", (!on(ServerOption::OfflineMode)).to_string()),
        (
            "hide-online-players",
            on(ServerOption::HideOnlinePlayers).to_string(),
        ),
    ];

    let mut out = String::from("#Minecraft server properties\n");
    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        out.push_str(&value);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(props: &'a str, key: &str) -> Option<&'a str> {
        props
            .lines()
            .filter_map(|l| l.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    #[test]
    fn defaults_without_options() {
        let props = render_properties(DEFAULT_PORT, &BTreeSet::new());
        assert_eq!(lookup(&props, "server-port"), Some("25565"));
        assert_eq!(lookup(&props, "white-list"), Some("false"));
        assert_eq!(lookup(&props, "spawn-protection"), Some("16"));
        assert_eq!(lookup(&props, "enforce-secure-profile"), Some("true"));
        assert_eq!(lookup(&props, "online-mode"), Some("true"));
        assert_eq!(lookup(&props, "hide-online-players"), Some("false"));
    }

    #[test]
    fn every_option_flips_its_key() {
        let all: BTreeSet<_> = ServerOption::ALL.into_iter().collect();
        let props = render_properties(25566, &all);
        assert_eq!(lookup(&props, "server-port"), Some("25566"));
        assert_eq!(lookup(&props, "white-list"), Some("true"));
        assert_eq!(lookup(&props, "enforce-whitelist"), Some("true"));
        assert_eq!(lookup(&props, "spawn-protection"), Some("0"));
        assert_eq!(lookup(&props, "enforce-secure-profile"), Some("false"));
        assert_eq!(lookup(&props, "online-mode"), Some("false"));
        assert_eq!(lookup(&props, "hide-online-players"), Some("true"));
    }

    #[test]
    fn option_names_round_trip_through_from_str() {
        for option in ServerOption::ALL {
            assert_eq!(option.as_str().parse::<ServerOption>(), Ok(option));
        }
        assert!("pvp".parse::<ServerOption>().is_err());
    }
}
