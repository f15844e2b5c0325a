//! Configuration management for the GAIA runner
//!
//! Loads provider, agent and benchmark settings from TOML files and provides
//! runtime access. Secrets never live in the file: providers name the
//! environment variable holding their key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::DatasetSplit;

/// Search order used when no explicit config path is given
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config/gaia.toml",
    "../config/gaia.toml",
    "gaia-bench/config/gaia.toml",
];

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
}

/// Provider-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub default_model: String,
    /// OpenAI-compatible endpoint root
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Requests per minute
    #[serde(default = "default_rpm")]
    pub rpm: u32,
    /// Tokens per minute
    #[serde(default = "default_tpm")]
    pub tpm: u32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Agent loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Key into `providers`
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Upper bound on model turns per question
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// Tools exposed to the model, by name
    #[serde(default = "default_tools")]
    pub tools: Vec<String>,
    /// Replaces the built-in system prompt when set
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Benchmark execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default)]
    pub dataset: DatasetSplit,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_parallel_requests")]
    pub parallel_requests: usize,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_answers_dir")]
    pub answers_dir: String,
    #[serde(default = "default_true")]
    pub save_answers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            answers_dir: default_answers_dir(),
            save_answers: true,
        }
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_base_url() -> String { "https://api.openai.com/v1".to_string() }
fn default_api_key_env() -> String { "OPENAI_API_KEY".to_string() }
fn default_rpm() -> u32 { 60 }
fn default_tpm() -> u32 { 100_000 }
fn default_max_tokens() -> u32 { 4096 }
fn default_provider() -> String { "openai".to_string() }
fn default_max_steps() -> u32 { 15 }
fn default_tools() -> Vec<String> { vec!["calculator".to_string(), "read_file".to_string()] }
fn default_data_dir() -> String { "data".to_string() }
fn default_parallel_requests() -> usize { 1 }
fn default_retry_count() -> u32 { 3 }
fn default_retry_delay_ms() -> u64 { 1000 }
fn default_max_retry_delay_ms() -> u64 { 60_000 }
fn default_timeout_ms() -> u64 { 600_000 }
fn default_answers_dir() -> String { "data/answers".to_string() }

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_steps: default_max_steps(),
            tools: default_tools(),
            system_prompt: None,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSplit::default(),
            data_dir: default_data_dir(),
            parallel_requests: default_parallel_requests(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
            max_retry_delay_ms: default_max_retry_delay_ms(),
            timeout_ms: default_timeout_ms(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from an explicit path, or from the default locations
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file falls back to built-in settings.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                tracing::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::load_or_default()),
        }
    }

    /// Load from default config location or return defaults
    pub fn load_or_default() -> Self {
        Self::load_first_of(CONFIG_SEARCH_PATHS)
    }

    /// First candidate that exists and parses; a file that exists but fails
    /// to parse is reported and skipped
    pub fn load_first_of<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for path in candidates {
            let path = path.as_ref();
            if !path.is_file() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("Ignoring configuration {}: {}", path.display(), e),
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get a specific provider config
    pub fn get_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Provider the agent is configured to use
    pub fn agent_provider(&self) -> Option<&ProviderConfig> {
        self.get_provider(&self.agent.provider)
    }

    /// Directory holding `{split}/metadata.jsonl`
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.benchmark.data_dir)
    }

    pub fn answers_dir(&self) -> PathBuf {
        PathBuf::from(&self.benchmark.output.answers_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut providers = HashMap::new();

        providers.insert(
            "openai".to_string(),
            ProviderConfig {
                name: "openai".to_string(),
                enabled: true,
                default_model: "gpt-4o".to_string(),
                base_url: default_base_url(),
                api_key_env: default_api_key_env(),
                rpm: 500,
                tpm: 200_000,
                max_tokens: default_max_tokens(),
                temperature: Some(0.0),
            },
        );

        Self {
            providers,
            agent: AgentConfig::default(),
            benchmark: BenchmarkConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
