//! Configuration management for the RAX S3 gateway
//!
//! Everything here is loaded once at startup and handed to the components
//! that need it; nothing is read from ambient state afterwards.

use config::{Config, Environment, File, FileFormat, FileSourceFile};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

/// Complete gateway configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub server: ServerSettings,
    pub store: StoreSettings,

    /// Control protocol logins, username -> password
    #[serde(default)]
    pub users: HashMap<String, String>,
}

/// Control connection settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// IP address to bind the control listener
    /// Environment: RAX_GW__SERVER__BIND_ADDRESS
    pub bind_address: String,

    /// Port for the control listener
    /// Environment: RAX_GW__SERVER__CONTROL_PORT
    pub control_port: u16,

    /// Maximum concurrent client sessions
    pub max_clients: usize,

    /// Maximum command line length in bytes, CRLF included
    pub max_command_length: usize,

    #[serde(default = "default_greeting")]
    pub greeting: String,
}

/// Object store identity, fixed for the whole process
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub bucket: String,
    pub region: String,

    /// Custom S3-compatible endpoint; when unset the AWS endpoint for `region` is used
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Shared credentials profile; when unset the default provider chain is used
    #[serde(default)]
    pub profile: Option<String>,

    #[serde(default)]
    pub path_style: bool,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_greeting() -> String {
    "RAX S3 gateway ready".to_string()
}

fn default_delimiter() -> String {
    "/".to_string()
}

impl GatewayConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        // Docker layout first, then the working directory
        let config_paths = ["rax-s3-gateway/config", "config"];

        let mut last_error = None;

        for config_path in config_paths {
            match Self::build(File::with_name(config_path)) {
                Ok(config) => return Ok(config),
                Err(ConfigError::Load(e)) => {
                    last_error = Some(e);
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(ConfigError::Invalid(format!(
            "no usable config file, tried {:?}: {}",
            config_paths,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    /// Load configuration from an explicit file, still honoring environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path))
    }

    fn build(file: File<FileSourceFile, FileFormat>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("RAX_GW").separator("__"))
            .build()?;

        let config: GatewayConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.control_port == 0 {
            return Err(ConfigError::Invalid("control_port cannot be 0".into()));
        }

        if self.server.max_clients == 0 {
            return Err(ConfigError::Invalid(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.server.max_command_length == 0 {
            return Err(ConfigError::Invalid(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if self.store.bucket.is_empty() {
            return Err(ConfigError::Invalid("store.bucket cannot be empty".into()));
        }

        if self.store.delimiter.is_empty() {
            return Err(ConfigError::Invalid(
                "store.delimiter cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

impl ServerSettings {
    /// Get bind address and control port as socket address
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.control_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    const VALID: &str = r#"
[server]
bind_address = "127.0.0.1"
control_port = 2121
max_clients = 4
max_command_length = 512

[store]
bucket = "nv-storage"
region = "eu-central-1"
profile = "nv"

[users]
alice = "alice123"
"#;

    #[test]
    fn test_load_valid_file() {
        let file = write_config(VALID);
        let config = GatewayConfig::load_from(file.path()).unwrap();

        assert_eq!(config.server.control_socket(), "127.0.0.1:2121");
        assert_eq!(config.server.greeting, "RAX S3 gateway ready");
        assert_eq!(config.store.bucket, "nv-storage");
        assert_eq!(config.store.delimiter, "/");
        assert_eq!(config.store.profile.as_deref(), Some("nv"));
        assert_eq!(config.store.endpoint, None);
        assert!(!config.store.path_style);
        assert_eq!(config.users.get("alice").map(String::as_str), Some("alice123"));
    }

    #[test]
    fn test_rejects_zero_port() {
        let file = write_config(&VALID.replace("control_port = 2121", "control_port = 0"));
        assert!(matches!(
            GatewayConfig::load_from(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_empty_bucket() {
        let file = write_config(&VALID.replace("\"nv-storage\"", "\"\""));
        assert!(matches!(
            GatewayConfig::load_from(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_section_is_load_error() {
        let file = write_config("[server]\nbind_address = \"0.0.0.0\"\n");
        assert!(matches!(
            GatewayConfig::load_from(file.path()),
            Err(ConfigError::Load(_))
        ));
    }
}
