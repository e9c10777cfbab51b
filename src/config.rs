//! Fixed service settings for the OnlineHashCrack v2 endpoint.
//!
//! Everything this tool talks to is a constant of the service: one URL, one
//! mandatory terms flag, one algorithm mode, one submission cap. The key and
//! URL can be overridden through the environment so tests can point the
//! client at a fake endpoint without touching the defaults.
use std::time::Duration;

use crate::error::Error;

/// Prefix of the shipped placeholder key; a key still carrying it has never
/// been configured.
const PLACEHOLDER_KEY_PREFIX: &str = "sk_XXX";

pub const DEFAULT_API_KEY: &str = "sk_XXXXXX";
pub const DEFAULT_API_URL: &str = "https://api.onlinehashcrack.com/v2";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    /// Must always be "yes"; the service rejects anything else.
    pub agree_terms: String,
    /// Hashcat mode 22000, WPA-PBKDF2-PMKID+EAPOL.
    pub algo_mode: u32,
    pub max_hashes_per_request: usize,
    /// Extension of local input files, without the leading dot.
    pub input_extension: String,
    /// Name of the overflow artifact, written next to the input files.
    pub overflow_file: String,
    pub list_timeout: Duration,
    pub submit_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            agree_terms: "yes".to_string(),
            algo_mode: 22000,
            max_hashes_per_request: 50,
            input_extension: "hc22000".to_string(),
            overflow_file: "ohc_overflow_hashes.txt".to_string(),
            list_timeout: Duration::from_secs(30),
            submit_timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// Default settings with `OHC_API_KEY` / `OHC_API_URL` overrides applied.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(key) = std::env::var("OHC_API_KEY") {
            cfg.api_key = key;
        }
        if let Ok(url) = std::env::var("OHC_API_URL") {
            cfg.api_url = url;
        }
        cfg
    }

    /// Reject an unconfigured key or a tampered terms flag before any I/O.
    pub fn validate(&self) -> Result<(), Error> {
        let key = self.api_key.trim();
        if key.is_empty() || key.starts_with(PLACEHOLDER_KEY_PREFIX) {
            return Err(Error::Config(
                "API key is not set (export OHC_API_KEY with your real key)".to_string(),
            ));
        }
        if self.agree_terms != "yes" {
            return Err(Error::Config(
                r#"agree_terms must always be "yes""#.to_string(),
            ));
        }
        Ok(())
    }
}
