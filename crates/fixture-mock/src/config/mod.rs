//! Construction-time configuration for fixture resolution.

mod aliases;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

pub use aliases::HostAliases;

/// Method that gets no suffix in fixture file names.
pub const DEFAULT_METHOD: &str = "GET";

/// Extension shared by every fixture file.
pub const FIXTURE_EXTENSION: &str = "mock";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixtureConfig {
    /// Directory under which all `.mock` files live
    pub fixtures_root: PathBuf,

    /// Request host -> host whose fixture tree serves it
    #[serde(default, skip_serializing_if = "HostAliases::is_empty")]
    pub host_aliases: HostAliases,

    /// Requests with this method resolve without a method suffix
    #[serde(default = "default_method")]
    pub default_method: String,

    /// Suffix every method, including `default_method`. Serves fixture trees
    /// that carry `.get` files for plain GET requests.
    #[serde(default)]
    pub suffix_default_method: bool,

    /// Status code used by `FixtureHandler` responses
    #[serde(default = "default_status")]
    pub status: u16,

    /// Headers used by `FixtureHandler` responses
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_status() -> u16 {
    200
}

/// A method name usable as a file-name suffix: non-empty ASCII letters.
pub(crate) fn is_valid_method(method: &str) -> bool {
    !method.is_empty() && method.bytes().all(|b| b.is_ascii_alphabetic())
}

impl FixtureConfig {
    pub fn new(fixtures_root: impl Into<PathBuf>) -> Self {
        Self {
            fixtures_root: fixtures_root.into(),
            host_aliases: HostAliases::default(),
            default_method: default_method(),
            suffix_default_method: false,
            status: default_status(),
            headers: HashMap::new(),
        }
    }

    pub fn with_host_aliases(mut self, host_aliases: HostAliases) -> Self {
        self.host_aliases = host_aliases;
        self
    }

    /// Load configuration from a YAML or JSON file (chosen by extension).
    ///
    /// A relative `fixtures_root` is taken relative to the config file's
    /// directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: FixtureConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            _ => serde_yaml::from_str(&contents)?,
        };

        if config.fixtures_root.is_relative() {
            if let Some(dir) = path.parent() {
                config.fixtures_root = dir.join(&config.fixtures_root);
            }
        }

        config.validate()?;
        info!(
            "Loaded fixture config from {:?} (root {:?}, {} host aliases)",
            path,
            config.fixtures_root,
            config.host_aliases.len()
        );
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.fixtures_root.as_os_str().is_empty() {
            anyhow::bail!("'fixtures_root' must not be empty");
        }

        if !self.fixtures_root.is_dir() {
            anyhow::bail!(
                "'fixtures_root' {:?} does not exist or is not a directory",
                self.fixtures_root
            );
        }

        let method = self.default_method.as_str();
        if !is_valid_method(method) {
            anyhow::bail!("Invalid 'default_method': '{method}'");
        }

        if !(100..=999).contains(&self.status) {
            anyhow::bail!("Invalid 'status': {} (expected 100-999)", self.status);
        }

        for (alias, canonical) in self.host_aliases.iter() {
            if alias.is_empty() || canonical.is_empty() {
                anyhow::bail!("Host aliases must map non-empty hosts ('{alias}' -> '{canonical}')");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
fixtures_root: /srv/fixtures
host_aliases:
  foo.bar: example.com
  api.example.org: example.com
headers:
  X-Made-With: fixture-mock
"#;

        let config: FixtureConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.fixtures_root, PathBuf::from("/srv/fixtures"));
        assert_eq!(config.host_aliases.canonical("foo.bar"), "example.com");
        assert_eq!(config.host_aliases.len(), 2);
        assert_eq!(config.default_method, "GET");
        assert_eq!(config.status, 200);
        assert_eq!(config.headers["X-Made-With"], "fixture-mock");
    }

    #[test]
    fn test_from_file_resolves_relative_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("fixtures")).unwrap();
        let config_path = dir.path().join("fixtures.yaml");
        fs::write(&config_path, "fixtures_root: fixtures\nstatus: 201\n").unwrap();

        let config = FixtureConfig::from_file(&config_path).unwrap();
        assert_eq!(config.fixtures_root, dir.path().join("fixtures"));
        assert_eq!(config.status, 201);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("fixtures.json");
        let json = serde_json::json!({
            "fixtures_root": dir.path(),
            "host_aliases": {"foo.bar": "example.com"},
            "default_method": "POST"
        });
        fs::write(&config_path, json.to_string()).unwrap();

        let config = FixtureConfig::from_file(&config_path).unwrap();
        assert_eq!(config.default_method, "POST");
        assert_eq!(config.host_aliases.canonical("foo.bar"), "example.com");
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = FixtureConfig::new(dir.path().join("missing"));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_rejects_bad_method_and_status() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = FixtureConfig::new(dir.path());
        config.default_method = "G E T".to_string();
        assert!(config.validate().is_err());

        let mut config = FixtureConfig::new(dir.path());
        config.status = 42;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_method_names() {
        assert!(is_valid_method("GET"));
        assert!(is_valid_method("patch"));
        assert!(!is_valid_method(""));
        assert!(!is_valid_method("G E T"));
        assert!(!is_valid_method("GET/.."));
    }

    #[test]
    fn test_parse_suffix_default_method() {
        let config: FixtureConfig =
            serde_yaml::from_str("fixtures_root: /srv/fixtures\nsuffix_default_method: true\n")
                .unwrap();
        assert!(config.suffix_default_method);

        let config: FixtureConfig = serde_yaml::from_str("fixtures_root: /srv/fixtures\n").unwrap();
        assert!(!config.suffix_default_method);
    }

    #[test]
    fn test_validate_rejects_empty_alias() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            FixtureConfig::new(dir.path()).with_host_aliases(HostAliases::new().with("", "x"));

        assert!(config.validate().is_err());
    }
}
