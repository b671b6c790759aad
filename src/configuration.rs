use crate::format::{Formattable, FormattingError, OutputFormat};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "egtree";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const CONFIG_DIR_ENV_VAR: &str = "EGTREE_CONFIG_DIR";

pub const DEFAULT_API_BASE_URL: &str = "https://developer.api.autodesk.com";
pub const DEFAULT_AUTH_URL: &str = "https://developer.api.autodesk.com/authentication/v2/token";
pub const DEFAULT_SCOPE: &str = "data:read data:write data:create data:search";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause:?}")]
    FailedToLoadData { cause: Box<dyn std::error::Error> },
    #[error("failed to write configuration data to file, because of: {cause:?}")]
    FailedToWriteData { cause: Box<dyn std::error::Error> },
    #[error("{cause:?}")]
    FormattingError {
        #[from]
        cause: FormattingError,
    },
}

fn default_api_base_url() -> Url {
    Url::parse(DEFAULT_API_BASE_URL).expect("default API URL is valid")
}

fn default_auth_url() -> Url {
    Url::parse(DEFAULT_AUTH_URL).expect("default auth URL is valid")
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default = "default_api_base_url")]
    api_base_url: Url,
    #[serde(default = "default_auth_url")]
    auth_url: Url,
    #[serde(default = "default_scope")]
    scope: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_hub_id: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_url: default_auth_url(),
            scope: default_scope(),
            timeout: default_timeout(),
            active_hub_id: None,
        }
    }
}

impl Configuration {
    /// API base URL without a trailing slash, ready for path concatenation
    pub fn api_base_url(&self) -> String {
        self.api_base_url.as_str().trim_end_matches('/').to_string()
    }

    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn active_hub_id(&self) -> Option<&str> {
        self.active_hub_id.as_deref()
    }

    pub fn set_active_hub(&mut self, hub_id: &str) {
        self.active_hub_id = Some(hub_id.to_string());
    }

    pub fn clear_active_hub(&mut self) {
        self.active_hub_id = None;
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV_VAR) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(configuration_directory) => {
                let mut default_config_file_path = configuration_directory;
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);

                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Load default configuration, creating a default one if none exists
    pub fn load_or_create_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!(
            "Loading or creating configuration from {}...",
            default_file_path.display()
        );
        Configuration::load_or_create(&default_file_path)
    }

    pub fn load_or_create(path: &Path) -> Result<Configuration, ConfigurationError> {
        if path.exists() {
            return Configuration::load_from_file(path);
        }

        debug!("Configuration file not found, creating default configuration");
        let default_config = Configuration::default();
        default_config.save(path).map_err(|save_error| {
            ConfigurationError::FailedToLoadData {
                cause: Box::new(std::io::Error::other(format!(
                    "Configuration file not found and failed to create default configuration. Tried to create at: {:?}. Error: {}",
                    path, save_error
                ))),
            }
        })?;
        Ok(default_config)
    }

    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        let configuration = fs::read_to_string(path)
            .map_err(|cause| ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            })?;
        serde_yaml::from_str(&configuration).map_err(|cause| {
            ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }
        })
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), ConfigurationError> {
        serde_yaml::to_writer(writer, self)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        // create the parent directory first, this is a no-op when it already exists
        match path.parent() {
            Some(directory) => fs::create_dir_all(directory)
                .map_err(|_| ConfigurationError::FailedToFindConfigurationDirectory)?,
            None => return Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }

        let file = File::create(path)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })?;
        self.write(file)
    }

    pub fn save_to_default(&self) -> Result<(), ConfigurationError> {
        self.save(&Self::get_default_configuration_file_path()?)
    }
}

impl Formattable for Configuration {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                if options.with_headers {
                    wtr.write_record(["API_BASE_URL", "AUTH_URL", "SCOPE", "TIMEOUT", "ACTIVE_HUB_ID"])?;
                }
                wtr.write_record([
                    self.api_base_url.as_str(),
                    self.auth_url.as_str(),
                    self.scope.as_str(),
                    self.timeout.to_string().as_str(),
                    self.active_hub_id.as_deref().unwrap_or(""),
                ])?;
                Ok(String::from_utf8(wtr.into_inner()?)?)
            }
            OutputFormat::Text(_) => serde_yaml::to_string(self)
                .map_err(|e| FormattingError::FormatFailure { cause: Box::new(e) }),
            OutputFormat::Tree(_) => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormatOptions;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_aps() {
        let configuration = Configuration::default();
        assert_eq!(configuration.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(configuration.auth_url().as_str(), DEFAULT_AUTH_URL);
        assert_eq!(configuration.scope(), DEFAULT_SCOPE);
        assert_eq!(configuration.timeout(), 10);
        assert_eq!(configuration.active_hub_id(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_CONFIGURATION_FILE_NAME);

        let mut configuration = Configuration::default();
        configuration.set_active_hub("b.1234");
        configuration.save(&path).unwrap();

        let loaded = Configuration::load_from_file(&path).unwrap();
        assert_eq!(loaded, configuration);
        assert_eq!(loaded.active_hub_id(), Some("b.1234"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIGURATION_FILE_NAME);
        fs::write(&path, "timeout: 30\nactive_hub_id: b.42\n").unwrap();

        let loaded = Configuration::load_from_file(&path).unwrap();
        assert_eq!(loaded.timeout(), 30);
        assert_eq!(loaded.active_hub_id(), Some("b.42"));
        assert_eq!(loaded.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIGURATION_FILE_NAME);
        assert!(!path.exists());

        let configuration = Configuration::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(configuration, Configuration::default());
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIGURATION_FILE_NAME);
        fs::write(&path, "timeout: [not a number").unwrap();

        assert!(matches!(
            Configuration::load_from_file(&path),
            Err(ConfigurationError::FailedToLoadData { .. })
        ));
    }

    #[test]
    fn test_clear_active_hub() {
        let mut configuration = Configuration::default();
        configuration.set_active_hub("b.1");
        configuration.clear_active_hub();
        let csv = configuration
            .format(&OutputFormat::Csv(OutputFormatOptions::default()))
            .unwrap();
        assert!(csv.trim_end().ends_with(",10,"));
    }
}
