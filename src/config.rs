use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use crate::error::ClimateError;

pub const API_BASE_ENV: &str = "CLIMATE_API_BASE";
pub const TIMEOUT_ENV: &str = "CLIMATE_API_TIMEOUT_SECS";
pub const SEED_ENV: &str = "CLIMATE_SEED";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateConfig {
    /// Base URL of the climate data backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Backend request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seed for synthetic data; entropy from the OS when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            seed: None,
        }
    }
}

impl ClimateConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ClimateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClimateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = base.trim().to_string();
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            config.timeout_secs = parse_var(TIMEOUT_ENV, &timeout)?;
        }
        if let Some(seed) = lookup(SEED_ENV) {
            config.seed = Some(parse_var(SEED_ENV, &seed)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClimateError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ClimateError::config(format!(
                "{API_BASE_ENV} must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ClimateError::config(format!("{TIMEOUT_ENV} must be positive")));
        }
        Ok(())
    }

    /// Random source for synthetic data, seeded when a seed is configured
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T, ClimateError> {
    value
        .trim()
        .parse()
        .map_err(|_| ClimateError::config(format!("{name} has invalid value '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClimateConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClimateConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = ClimateConfig::from_lookup(lookup(&[
            (API_BASE_ENV, "https://climate.example.org"),
            (TIMEOUT_ENV, " 3 "),
            (SEED_ENV, "42"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://climate.example.org");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ClimateConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, ClimateError::Config { .. }));

        let err = ClimateConfig::from_lookup(lookup(&[(API_BASE_ENV, "localhost:5000")]))
            .unwrap_err();
        assert!(err.to_string().contains(API_BASE_ENV));

        assert!(ClimateConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")])).is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = ClimateConfig {
            seed: Some(9),
            ..Default::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
