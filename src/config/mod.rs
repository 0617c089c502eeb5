pub mod toml_config;

use crate::adapters::gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::utils::error::{Result, TriageError};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_range, validate_url, Validate,
};
use clap::Parser;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Parser)]
#[command(name = "triage-recommender")]
#[command(about = "Recommends a hospital department for a patient's symptoms via an LLM")]
pub struct CliConfig {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Completion model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the Generative Language API
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Overall timeout for each completion request
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Reject completions that are not one of the known departments
    #[arg(long)]
    pub strict_catalog: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("config", &self.config)
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("strict_catalog", &self.strict_catalog)
            .field("verbose", &self.verbose)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}

/// Fully resolved configuration, built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub strict_catalog: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            gemini: GeminiConfig::new(String::new()),
            strict_catalog: false,
        }
    }
}

/// Loads `.env` into the process environment before clap reads it.
///
/// `None` searches the working directory and its parents. Variables that are already
/// set are never overwritten. A missing file is `Ok(None)`.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(TriageError::ConfigError {
            message: format!("failed to load .env file: {e}"),
        }),
    }
}

impl AppConfig {
    /// 合併順序：預設值 < TOML 設定檔 < CLI 參數 / 環境變數
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: &CliConfig, file: TomlConfig) -> Self {
        let server = file.server.unwrap_or_default();
        let llm = file.llm.unwrap_or_default();
        let recommendation = file.recommendation.unwrap_or_default();

        let gemini = GeminiConfig {
            // 未提供金鑰時不在本地檢查，第一次呼叫時由上游回報錯誤
            api_key: cli.api_key.clone().or(llm.api_key).unwrap_or_default(),
            model: cli
                .model
                .clone()
                .or(llm.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: cli
                .api_base_url
                .clone()
                .or(llm.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: llm.temperature,
            timeout: cli
                .timeout_seconds
                .or(llm.timeout_seconds)
                .map(Duration::from_secs),
        };

        Self {
            host: cli
                .host
                .clone()
                .or(server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(server.port).unwrap_or(DEFAULT_PORT),
            gemini,
            strict_catalog: cli.strict_catalog || recommendation.strict_catalog.unwrap_or(false),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_url("llm.base_url", &self.gemini.base_url)?;
        validate_non_empty_string("llm.model", &self.gemini.model)?;

        if let Some(timeout) = self.gemini.timeout {
            validate_range("llm.timeout_seconds", timeout.as_secs(), 1, 600)?;
        }
        if let Some(temperature) = self.gemini.temperature {
            validate_finite("llm.temperature", f64::from(temperature))?;
            validate_range("llm.temperature", temperature, 0.0, 2.0)?;
        }

        Ok(())
    }
}
