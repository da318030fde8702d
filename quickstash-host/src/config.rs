use crate::error::{ConfigErrorKind, HostError, HostResult};
use quickstash_core::StashConfig;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkey: String, // e.g. "G"
    pub stash: StashConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey: "G".to_string(),
            stash: StashConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> HostResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| HostError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Read(e),
        })?;

        Self::parse(&data).map_err(|e| HostError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Parse(e),
        })
    }

    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    /// Overrides fields from `QUICKSTASH_*` variables (also read from `.env`)
    pub fn apply_env(&mut self) -> HostResult<()> {
        let _ = dotenvy::from_filename(".env");

        if let Ok(key) = std::env::var("QUICKSTASH_HOTKEY") {
            self.hotkey = key;
        }
        env_override("QUICKSTASH_ENABLED", &mut self.stash.enabled)?;
        env_override("QUICKSTASH_RANGE", &mut self.stash.max_distance)?;
        env_override("QUICKSTASH_EXCLUDED_SLOTS", &mut self.stash.excluded_slots)?;
        env_override("QUICKSTASH_PRIORITIZE_IN_USE", &mut self.stash.prioritize_in_use)?;
        env_override("QUICKSTASH_DIAGNOSTICS", &mut self.stash.diagnostics)?;
        env_override("QUICKSTASH_HIGHLIGHT", &mut self.stash.highlight.enabled)?;
        env_override("QUICKSTASH_HIGHLIGHT_MS", &mut self.stash.highlight.duration_ms)?;

        Ok(())
    }
}

fn env_override<T: FromStr>(name: &str, slot: &mut T) -> HostResult<()> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(());
    };

    *slot = raw
        .trim()
        .parse()
        .map_err(|_| HostError::Env(ConfigErrorKind::InvalidEnv(name.to_string(), raw.clone())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml() {
        let cfg = Config::parse(
            r#"
            hotkey = "H"

            [stash]
            max_distance = 25.5
            excluded_slots = 4

            [stash.highlight]
            duration_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(cfg.hotkey, "H");
        assert_eq!(cfg.stash.max_distance, 25.5);
        assert_eq!(cfg.stash.excluded_slots, 4);
        assert!(cfg.stash.prioritize_in_use);
        assert!(cfg.stash.highlight.enabled);
        assert_eq!(cfg.stash.highlight.duration_ms, 500);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.hotkey, "G");
        assert_eq!(cfg.stash, StashConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Config::parse("[stash]\nexcluded_slots = \"many\"").is_err());
    }
}
