// ⚙️ Configuration - team-shuffler.toml
//
// Every key is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, ShuffleError};
use crate::roster::RosterId;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "team-shuffler.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub teams: TeamSettings,

    #[serde(default)]
    pub shuffle: ShuffleSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

/// Display titles for the two rosters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSettings {
    #[serde(default = "default_a_title")]
    pub a_title: String,

    #[serde(default = "default_b_title")]
    pub b_title: String,
}

fn default_a_title() -> String {
    RosterId::A.default_title().to_string()
}

fn default_b_title() -> String {
    RosterId::B.default_title().to_string()
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            a_title: default_a_title(),
            b_title: default_b_title(),
        }
    }
}

impl TeamSettings {
    pub fn title(&self, roster: RosterId) -> &str {
        match roster {
            RosterId::A => &self.a_title,
            RosterId::B => &self.b_title,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShuffleSettings {
    /// Fixed RNG seed for reproducible shuffles; OS-seeded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Listen address for team-shuffler-server
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

impl Config {
    /// Parse config from TOML text
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| ShuffleError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from a file that must exist
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ShuffleError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load `explicit` if given, else the default file if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(&default_path)
        } else {
            debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Write the default config; refuses to overwrite unless `force`
    pub fn write_default<P: AsRef<Path>>(path: P, force: bool) -> Result<()> {
        let path = path.as_ref();
        if path.exists() && !force {
            return Err(ShuffleError::ConfigExists(path.to_path_buf()));
        }

        fs::write(path, default_config_toml())?;
        Ok(())
    }
}

/// Commented default file written by `team-shuffler init`
pub fn default_config_toml() -> String {
    format!(
        r#"# team-shuffler configuration

[teams]
a_title = "{}"
b_title = "{}"

[shuffle]
# seed = 42

[server]
addr = "{}"
"#,
        default_a_title(),
        default_b_title(),
        default_server_addr()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("team-shuffler-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.teams.title(RosterId::A), "Team A");
        assert_eq!(config.server.addr, "127.0.0.1:3000");
        assert_eq!(config.shuffle.seed, None);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            "[teams]\na_title = \"Aチーム\"\n\n[shuffle]\nseed = 7\n",
            Path::new("partial.toml"),
        )
        .unwrap();

        assert_eq!(config.teams.title(RosterId::A), "Aチーム");
        assert_eq!(config.teams.title(RosterId::B), "Team B");
        assert_eq!(config.shuffle.seed, Some(7));
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let err = Config::from_toml("[teams\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ShuffleError::ConfigParse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_default_file_parses_back() {
        let config = Config::from_toml(&default_config_toml(), Path::new("default.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_write_default_refuses_overwrite() {
        let path = temp_path("init.toml");
        let _ = fs::remove_file(&path);

        Config::write_default(&path, false).unwrap();
        let err = Config::write_default(&path, false).unwrap_err();
        assert!(matches!(err, ShuffleError::ConfigExists(_)));
        Config::write_default(&path, true).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/team-shuffler.toml"))).unwrap_err();
        assert!(matches!(err, ShuffleError::ConfigRead { .. }));
    }
}
