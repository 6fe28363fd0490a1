//! Engine configuration: the secret material, supplied once
//!
//! Sources, in the order a deployment usually reaches for them:
//! - environment (`AES_KEY`, `DNA_SECRET_KEY`, `LOGISTIC_MAP_R`)
//! - a JSON file with the same three fields in snake_case
//! - explicit values via [`EngineConfig::new`]
//!
//! Everything is validated here so the pipeline never re-checks it.

use crate::chaos::{LogisticMap, DEFAULT_R};
use crate::cipher::AesKey;
use crate::dna::DnaKeyStream;
use crate::error::ValidationError;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_AES_KEY: &str = "AES_KEY";
pub const ENV_DNA_SECRET_KEY: &str = "DNA_SECRET_KEY";
pub const ENV_LOGISTIC_MAP_R: &str = "LOGISTIC_MAP_R";

/// Validated secrets and parameters for one engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub aes_key: AesKey,
    pub key_stream: DnaKeyStream,
    pub chaos: LogisticMap,
}

/// On-disk form of [`EngineConfig`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Standard base64 of 32 bytes
    pub aes_key: String,
    /// 256 characters over A/C/G/T
    pub dna_secret_key: String,
    #[serde(default = "default_r")]
    pub logistic_map_r: f64,
}

fn default_r() -> f64 {
    DEFAULT_R
}

impl EngineConfig {
    pub fn new(aes_key: AesKey, key_stream: DnaKeyStream, r: f64) -> Result<Self, ConfigError> {
        let chaos = LogisticMap::new(r).map_err(|_| ConfigError::InvalidChaosParameter(r))?;
        Ok(Self { aes_key, key_stream, chaos })
    }

    /// Fresh random key and key stream with the default `r`
    pub fn generate() -> Self {
        Self {
            aes_key: AesKey::generate(),
            key_stream: DnaKeyStream::generate(),
            chaos: LogisticMap::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let aes_key = std::env::var(ENV_AES_KEY)
            .map_err(|_| ConfigError::MissingVar(ENV_AES_KEY))?;
        let key_stream = std::env::var(ENV_DNA_SECRET_KEY)
            .map_err(|_| ConfigError::MissingVar(ENV_DNA_SECRET_KEY))?;
        let r = match std::env::var(ENV_LOGISTIC_MAP_R) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::Parse(format!("{} is not a number", ENV_LOGISTIC_MAP_R)))?,
            Err(_) => DEFAULT_R,
        };
        let config = Self::from_parts(&aes_key, &key_stream, r)?;
        info!("Loaded engine configuration from environment (r = {})", config.chaos.r());
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let file: ConfigFile =
            serde_json::from_str(&json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = Self::from_parts(&file.aes_key, &file.dna_secret_key, file.logistic_map_r)?;
        info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Validate the raw string forms used by both env and file sources
    pub fn from_parts(aes_key: &str, key_stream: &str, r: f64) -> Result<Self, ConfigError> {
        let aes_key = AesKey::from_base64(aes_key).ok_or(ConfigError::InvalidAesKey)?;
        let key_stream: DnaKeyStream = key_stream
            .trim()
            .parse()
            .map_err(ConfigError::InvalidKeyStream)?;
        Self::new(aes_key, key_stream, r)
    }

    pub fn to_file(&self) -> ConfigFile {
        ConfigFile {
            aes_key: self.aes_key.to_base64(),
            dna_secret_key: self.key_stream.expose(),
            logistic_map_r: self.chaos.r(),
        }
    }

    /// `KEY=value` lines suitable for an env file. Contains secrets.
    pub fn to_env_lines(&self) -> String {
        format!(
            "{}={}\n{}={}\n{}={}\n",
            ENV_AES_KEY,
            self.aes_key.to_base64(),
            ENV_DNA_SECRET_KEY,
            self.key_stream.expose(),
            ENV_LOGISTIC_MAP_R,
            self.chaos.r()
        )
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("AES key must be standard base64 of exactly 32 bytes")]
    InvalidAesKey,

    #[error("DNA secret key must be 256 characters of A, C, G, T: {0}")]
    InvalidKeyStream(ValidationError),

    #[error("Chaos parameter r must lie within (3.57, 4.0], got {0}")]
    InvalidChaosParameter(f64),

    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_key() -> String {
        AesKey::from_bytes([9u8; 32]).to_base64()
    }

    #[test]
    fn test_from_parts() {
        let config = EngineConfig::from_parts(&raw_key(), &"GATC".repeat(64), 3.9).unwrap();
        assert_eq!(config.chaos.r(), 3.9);
        assert_eq!(config.aes_key.as_bytes(), &[9u8; 32]);
    }

    #[test]
    fn test_invalid_parts() {
        let key_stream = "GATC".repeat(64);
        assert!(matches!(
            EngineConfig::from_parts("c2hvcnQ=", &key_stream, 3.99),
            Err(ConfigError::InvalidAesKey)
        ));
        assert!(matches!(
            EngineConfig::from_parts(&raw_key(), "GATC", 3.99),
            Err(ConfigError::InvalidKeyStream(_))
        ));
        assert!(matches!(
            EngineConfig::from_parts(&raw_key(), &"GATU".repeat(64), 3.99),
            Err(ConfigError::InvalidKeyStream(ValidationError::InvalidNucleotide))
        ));
        assert!(matches!(
            EngineConfig::from_parts(&raw_key(), &key_stream, 3.5),
            Err(ConfigError::InvalidChaosParameter(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let config = EngineConfig::generate();
        let path = std::env::temp_dir().join(format!("dnacrypt-config-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string_pretty(&config.to_file()).unwrap()).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.aes_key, config.aes_key);
        assert_eq!(loaded.key_stream, config.key_stream);
        assert_eq!(loaded.chaos, config.chaos);
    }

    #[test]
    fn test_file_defaults_r() {
        let json = format!(
            r#"{{"aes_key": "{}", "dna_secret_key": "{}"}}"#,
            raw_key(),
            "A".repeat(256)
        );
        let file: ConfigFile = serde_json::from_str(&json).unwrap();
        assert_eq!(file.logistic_map_r, DEFAULT_R);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::load("/nonexistent/dnacrypt.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_env_lines() {
        let config = EngineConfig::generate();
        let lines = config.to_env_lines();
        assert!(lines.starts_with("AES_KEY="));
        assert!(lines.contains("DNA_SECRET_KEY="));
        assert!(lines.contains("LOGISTIC_MAP_R=3.99"));
    }
}
