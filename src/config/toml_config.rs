use crate::adapters::is_mock_endpoint;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReadingError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LOADING_DURATION_MS: u64 = 3000;
pub const DEFAULT_PROGRESS_TICK_MS: u64 = 50;
pub const DEFAULT_RESULT_HOLD_MS: u64 = 500;
pub const DEFAULT_MOCK_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub loading_duration_ms: u64,
    pub progress_tick_ms: u64,
    pub result_hold_ms: u64,
    pub mock_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            loading_duration_ms: DEFAULT_LOADING_DURATION_MS,
            progress_tick_ms: DEFAULT_PROGRESS_TICK_MS,
            result_hold_ms: DEFAULT_RESULT_HOLD_MS,
            mock_delay_ms: DEFAULT_MOCK_DELAY_MS,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReadingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${BAZI_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReadingError::UnknownError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 未設定端點（或仍是佔位值）時使用模擬結果
    pub fn is_mock_mode(&self) -> bool {
        is_mock_endpoint(self.workflow.endpoint.as_deref())
    }

    pub fn validate_config(&self) -> Result<()> {
        if !self.is_mock_mode() {
            let endpoint = self.workflow.endpoint.as_deref().unwrap_or_default();
            validate_url("workflow.endpoint", endpoint)?;

            let api_key = self
                .workflow
                .api_key
                .as_deref()
                .ok_or_else(|| ReadingError::MissingConfigError {
                    field: "workflow.api_key".to_string(),
                })?;
            validate_non_empty_string("workflow.api_key", api_key)?;
        }

        if let Some(timeout) = self.workflow.request_timeout_seconds {
            validate_positive_number("workflow.request_timeout_seconds", timeout, 1)?;
        }
        validate_positive_number("ui.progress_tick_ms", self.ui.progress_tick_ms, 1)?;

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> Option<&str> {
        self.workflow.endpoint.as_deref()
    }

    fn api_key(&self) -> Option<&str> {
        self.workflow.api_key.as_deref()
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.workflow.request_timeout_seconds.map(Duration::from_secs)
    }

    fn loading_duration(&self) -> Duration {
        Duration::from_millis(self.ui.loading_duration_ms)
    }

    fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.ui.progress_tick_ms)
    }

    fn result_hold(&self) -> Duration {
        Duration::from_millis(self.ui.result_hold_ms)
    }

    fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.ui.mock_delay_ms)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
