use serde::Deserialize;

use crate::services::{EngineParams, ScoringExtensions};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// How many top-scored items the slot sampler draws from
    #[serde(default = "default_sample_top_n")]
    pub sample_top_n: usize,

    /// Sharpness of the sampler's preference for high scores
    #[serde(default = "default_sample_alpha")]
    pub sample_alpha: f64,

    /// Fixed seed for every build that does not bring its own
    #[serde(default)]
    pub outfit_seed: Option<u64>,

    /// Shift coldness by the user's cold sensitivity
    #[serde(default)]
    pub cold_sensitivity_shift: bool,

    /// Penalise shorts outside hot weather
    #[serde(default)]
    pub shorts_penalty: bool,

    /// Penalise outerwear that is not water/wind proof when it should be
    #[serde(default)]
    pub weather_outerwear_penalty: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_sample_top_n() -> usize {
    5
}

fn default_sample_alpha() -> f64 {
    3.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            sample_top_n: default_sample_top_n(),
            sample_alpha: default_sample_alpha(),
            outfit_seed: None,
            cold_sensitivity_shift: false,
            shorts_penalty: false,
            weather_outerwear_penalty: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config =
            envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sample_top_n == 0 {
            anyhow::bail!("SAMPLE_TOP_N must be at least 1");
        }
        if !self.sample_alpha.is_finite() {
            anyhow::bail!("SAMPLE_ALPHA must be a finite number");
        }
        Ok(())
    }

    /// Engine tuning derived from this configuration
    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            top_n: self.sample_top_n,
            alpha: self.sample_alpha,
            extensions: ScoringExtensions {
                cold_sensitivity_shift: self.cold_sensitivity_shift,
                shorts_penalty: self.shorts_penalty,
                weather_outerwear_penalty: self.weather_outerwear_penalty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config: Config = envy::from_iter(vars(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.sample_top_n, 5);
        assert_eq!(config.sample_alpha, 3.0);
        assert_eq!(config.outfit_seed, None);

        let params = config.engine_params();
        assert_eq!(params, EngineParams::default());
    }

    #[test]
    fn test_overrides_from_environment() {
        let config: Config = envy::from_iter(vars(&[
            ("PORT", "8080"),
            ("SAMPLE_TOP_N", "3"),
            ("SAMPLE_ALPHA", "1.5"),
            ("OUTFIT_SEED", "42"),
            ("SHORTS_PENALTY", "true"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.outfit_seed, Some(42));

        let params = config.engine_params();
        assert_eq!(params.top_n, 3);
        assert_eq!(params.alpha, 1.5);
        assert!(params.extensions.shorts_penalty);
        assert!(!params.extensions.cold_sensitivity_shift);
    }

    #[test]
    fn test_validate_rejects_zero_top_n() {
        let config = Config {
            sample_top_n: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
