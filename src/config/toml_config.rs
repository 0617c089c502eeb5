use crate::utils::error::{Result, TriageError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env placeholder pattern is a valid regex"));

/// 設定檔中的每個區段都是可選的，未設定的值使用預設值或 CLI 參數
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub llm: Option<LlmSection>,
    pub recommendation: Option<RecommendationSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmSection {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub temperature: Option<f32>,
}

impl std::fmt::Debug for LlmSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSection")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationSection {
    pub strict_catalog: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TriageError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TriageError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 9000

[llm]
model = "gemini-2.5-flash"
base_url = "http://localhost:8089/v1beta"
timeout_seconds = 30
temperature = 0.0

[recommendation]
strict_catalog = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let server = config.server.unwrap();
        let llm = config.llm.unwrap();

        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(9000));
        assert_eq!(llm.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(llm.timeout_seconds, Some(30));
        assert_eq!(config.recommendation.unwrap().strict_catalog, Some(true));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.is_none());
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TRIAGE_TEST_API_KEY", "key-from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[llm]
api_key = "${TRIAGE_TEST_API_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.llm.unwrap().api_key.as_deref(), Some("key-from-env"));

        std::env::remove_var("TRIAGE_TEST_API_KEY");
    }

    #[test]
    fn test_unset_env_var_left_as_is() {
        let config = TomlConfig::from_toml_str(
            r#"
[llm]
api_key = "${TRIAGE_TEST_DEFINITELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.llm.unwrap().api_key.as_deref(),
            Some("${TRIAGE_TEST_DEFINITELY_UNSET}")
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = TomlConfig::from_toml_str(
            r#"
[server]
hostname = "oops"
"#,
        );
        assert!(matches!(
            result,
            Err(TriageError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = TomlConfig::from_toml_str(
            r#"
[llm]
api_key = "very-secret"
"#,
        )
        .unwrap();
        assert!(!format!("{:?}", config).contains("very-secret"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 8123\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.unwrap().port, Some(8123));
    }

    #[test]
    fn test_missing_file() {
        let result = TomlConfig::from_file("/definitely/not/here/triage.toml");
        assert!(matches!(result, Err(TriageError::IoError(_))));
    }
}
