use anyhow::{Context, Result};
use std::env;
use tracing::{info, warn};

use crate::scoring::ScoreWeights;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_file_size_mb: usize,
    pub max_concurrent_analyses: usize,
    /// Bound on each pipeline stage (extraction, analysis), in seconds.
    pub stage_timeout_seconds: u64,
    /// When true a failing analyzer fails the whole run; when false it is
    /// replaced by a neutral sub-score with a logged warning.
    pub strict_analyzers: bool,
    /// Sub-score below which a category yields an ImprovementArea.
    pub improvement_threshold: f64,
    pub max_mistakes: usize,
    pub weights: ScoreWeights,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let weights = ScoreWeights {
            format: Self::parse_env_var("WEIGHT_FORMAT", 0.25)
                .context("Failed to parse WEIGHT_FORMAT")?,
            keywords: Self::parse_env_var("WEIGHT_KEYWORDS", 0.30)
                .context("Failed to parse WEIGHT_KEYWORDS")?,
            structure: Self::parse_env_var("WEIGHT_STRUCTURE", 0.20)
                .context("Failed to parse WEIGHT_STRUCTURE")?,
            content: Self::parse_env_var("WEIGHT_CONTENT", 0.20)
                .context("Failed to parse WEIGHT_CONTENT")?,
            contact: Self::parse_env_var("WEIGHT_CONTACT", 0.05)
                .context("Failed to parse WEIGHT_CONTACT")?,
        };

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", 5)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            max_concurrent_analyses: Self::parse_env_var("MAX_CONCURRENT_ANALYSES", 8)
                .context("Failed to parse MAX_CONCURRENT_ANALYSES")?,
            stage_timeout_seconds: Self::parse_env_var("STAGE_TIMEOUT_SECONDS", 10)
                .context("Failed to parse STAGE_TIMEOUT_SECONDS")?,
            strict_analyzers: Self::parse_env_var("STRICT_ANALYZERS", false)
                .context("Failed to parse STRICT_ANALYZERS")?,
            improvement_threshold: Self::parse_env_var("IMPROVEMENT_THRESHOLD", 75.0)
                .context("Failed to parse IMPROVEMENT_THRESHOLD")?,
            max_mistakes: Self::parse_env_var("MAX_MISTAKES", 10)
                .context("Failed to parse MAX_MISTAKES")?,
            weights,
        };

        config.validate()?;

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {} (using default: {:?})",
                        var_name, e, default
                    );
                    Ok(default)
                }
            },
            Err(_) => Ok(default),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_concurrent_analyses == 0 {
            return Err(anyhow::anyhow!(
                "MAX_CONCURRENT_ANALYSES must be greater than 0"
            ));
        }
        if !(0.0..=100.0).contains(&self.improvement_threshold) {
            return Err(anyhow::anyhow!(
                "IMPROVEMENT_THRESHOLD must be between 0 and 100"
            ));
        }
        if self.max_mistakes == 0 {
            return Err(anyhow::anyhow!("MAX_MISTAKES must be greater than 0"));
        }
        // Fail fast: a bad weight table must never reach a running analysis.
        self.weights
            .validate()
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        Ok(())
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            max_file_size_mb: 5,
            max_concurrent_analyses: 8,
            stage_timeout_seconds: 10,
            strict_analyzers: false,
            improvement_threshold: 75.0,
            max_mistakes: 10,
            weights: ScoreWeights::default(),
        }
    }
}
