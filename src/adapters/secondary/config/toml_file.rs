/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! TOML file configuration provider

use crate::domain::{ApplianceConfig, ConfigError, Credentials, DEFAULT_TIMEOUT_SECS};
use crate::ports::ConfigurationProvider;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the configuration file is looked for when none is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/xclarity/xclarity_inventory.toml";

#[derive(Debug, Deserialize)]
struct ConfigFile {
    api: ApiSection,
}

#[derive(Debug, Deserialize)]
struct ApiSection {
    base_url: String,
    #[serde(default)]
    certfile: Option<PathBuf>,
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    interval: Option<u64>,
}

/// Loads the appliance configuration from a TOML file
///
/// ```toml
/// [api]
/// base_url = "https://xclarity.example.com"
/// certfile = "/etc/xclarity/xclarity.pem"
/// username = "reporter"
/// password = "secret"
/// ```
#[derive(Debug, Clone)]
pub struct TomlConfigurationProvider {
    path: PathBuf,
    password_override: Option<String>,
}

impl TomlConfigurationProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            password_override: None,
        }
    }

    /// Use this password instead of the one in the file
    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password_override = password;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse configuration text as if it were read from `path`
    pub fn parse(&self, contents: &str) -> Result<ApplianceConfig, ConfigError> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        let api = file.api;

        let base_url = api.base_url.trim().to_string();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
        }
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got '{base_url}'"
            )));
        }

        let timeout_secs = api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if let Some(interval) = api.interval {
            debug!("Ignoring api.interval = {interval}: one fetch per invocation");
        }

        let password = self.password_override.clone().unwrap_or(api.password);

        Ok(ApplianceConfig {
            base_url,
            cert_file: api.certfile.filter(|p| !p.as_os_str().is_empty()),
            credentials: Credentials::new(api.username, password),
            timeout_secs,
            interval: api.interval,
        })
    }
}

impl ConfigurationProvider for TomlConfigurationProvider {
    fn appliance_config(&self) -> Result<ApplianceConfig, ConfigError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        self.parse(&contents)
    }
}

impl Default for TomlConfigurationProvider {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    const FULL_CONFIG: &str = r#"
[api]
base_url = "https://xclarity.example.com"
certfile = "/etc/xclarity/xclarity.pem"
username = "reporter"
password = "secret"
timeout_secs = 10
interval = 3600
"#;

    #[test]
    fn test_load_config_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("xclarity_inventory.toml");
        file.write_str(FULL_CONFIG).unwrap();

        let config = TomlConfigurationProvider::new(file.path())
            .appliance_config()
            .unwrap();

        assert_eq!(config.base_url, "https://xclarity.example.com");
        assert_eq!(
            config.cert_file,
            Some(PathBuf::from("/etc/xclarity/xclarity.pem"))
        );
        assert_eq!(config.credentials, Credentials::new("reporter", "secret"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.interval, Some(3600));
    }

    #[test]
    fn test_minimal_config_defaults() {
        let provider = TomlConfigurationProvider::new("inline.toml");
        let config = provider
            .parse("[api]\nbase_url = \"https://lxca\"\nusername = \"u\"\n")
            .unwrap();

        assert_eq!(config.cert_file, None);
        assert_eq!(config.credentials.password, "");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.interval, None);
    }

    #[test]
    fn test_empty_certfile_is_none() {
        let provider = TomlConfigurationProvider::new("inline.toml");
        let config = provider
            .parse("[api]\nbase_url = \"https://lxca\"\ncertfile = \"\"\nusername = \"u\"\n")
            .unwrap();
        assert_eq!(config.cert_file, None);
    }

    #[test]
    fn test_credentials_are_not_validated() {
        let provider = TomlConfigurationProvider::new("inline.toml");
        let config = provider
            .parse("[api]\nbase_url = \"https://lxca\"\nusername = \"\"\npassword = \"\"\n")
            .unwrap();
        assert_eq!(config.credentials, Credentials::new("", ""));
    }

    #[test]
    fn test_password_override() {
        let provider = TomlConfigurationProvider::new("inline.toml")
            .with_password(Some("from-env".to_string()));
        let config = provider.parse(FULL_CONFIG).unwrap();
        assert_eq!(config.credentials.password, "from-env");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let provider = TomlConfigurationProvider::new(temp.child("absent.toml").path());
        assert!(matches!(
            provider.appliance_config(),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let provider = TomlConfigurationProvider::new("inline.toml");
        assert!(matches!(
            provider.parse("[api\nbase_url = "),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            provider.parse("[api]\nusername = \"u\"\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let provider = TomlConfigurationProvider::new("inline.toml");
        assert!(matches!(
            provider.parse("[api]\nbase_url = \"\"\nusername = \"u\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            provider.parse("[api]\nbase_url = \"ftp://lxca\"\nusername = \"u\"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            provider.parse(
                "[api]\nbase_url = \"https://lxca\"\nusername = \"u\"\ntimeout_secs = 0\n"
            ),
            Err(ConfigError::Invalid(_))
        ));
    }
}
