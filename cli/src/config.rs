//! CLI configuration with TOML file support.

use std::path::{Path, PathBuf};

use pitoken_issuer::SubmitOptions;
use pitoken_transactions::Memo;
use pitoken_types::NetworkId;
use pitoken_utils::LogFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("network {0} has no public Horizon server; set horizon_url")]
    NoHorizon(String),
}

/// Settings shared by every subcommand.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; command line
/// flags and environment variables override file values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub network: NetworkId,

    /// Horizon server root. Defaults to the network's public server.
    #[serde(default)]
    pub horizon_url: Option<String>,

    /// Validity window of submitted transactions, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixed per-operation fee in stroops, instead of the ledger's current
    /// base fee.
    #[serde(default)]
    pub base_fee: Option<u32>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn horizon_url(&self) -> Result<String, ConfigError> {
        match &self.horizon_url {
            Some(url) => Ok(url.clone()),
            None => self
                .network
                .default_horizon_url()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::NoHorizon(self.network.passphrase().to_string())),
        }
    }

    pub fn submit_options(&self, memo: Memo) -> SubmitOptions {
        SubmitOptions {
            timeout_secs: self.timeout_secs,
            base_fee_override: self.base_fee,
            memo,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            network: NetworkId::default(),
            horizon_url: None,
            timeout_secs: default_timeout_secs(),
            base_fee: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = CliConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.network, NetworkId::PiTestnet);
        assert_eq!(
            config.horizon_url().unwrap(),
            "https://api.testnet.minepi.com"
        );
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network = "stellar-testnet"
            timeout_secs = 90
            base_fee = 250
            log_format = "json"
        "#;
        let config = CliConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network, NetworkId::StellarTestnet);
        assert_eq!(config.timeout_secs, 90);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info");

        let options = config.submit_options(Memo::None);
        assert_eq!(options.base_fee_override, Some(250));
        assert_eq!(options.timeout_secs, 90);
    }

    #[test]
    fn custom_network_needs_horizon_url() {
        let toml = r#"network = { custom = "Standalone Network ; February 2017" }"#;
        let config = CliConfig::from_toml_str(toml).expect("should parse");
        assert!(matches!(config.horizon_url(), Err(ConfigError::NoHorizon(_))));

        let toml = r#"
            horizon_url = "http://localhost:8000"
            network = { custom = "Standalone Network ; February 2017" }
        "#;
        let config = CliConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.horizon_url().unwrap(), "http://localhost:8000");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 45").unwrap();
        let config = CliConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.timeout_secs, 45);
    }

    #[test]
    fn missing_file_returns_read_error() {
        let result = CliConfig::from_toml_file(Path::new("/nonexistent/pitoken.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn unknown_network_is_a_parse_error() {
        let result = CliConfig::from_toml_str(r#"network = "moon""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
