// Adapters layer: concrete implementations of the domain ports (http, mock, terminal).

pub mod http;
pub mod mock;
pub mod terminal;

use crate::domain::model::{AnalysisResult, BirthQuery};
use crate::domain::ports::{AnalysisClient, ConfigProvider};
use crate::utils::error::Result;
use async_trait::async_trait;

pub use http::WorkflowClient;
pub use mock::MockWorkflowClient;
pub use terminal::TerminalView;

/// 尚未設定真實端點時的佔位值
pub const PLACEHOLDER_ENDPOINT: &str = "YOUR_COZE_WORKFLOW_API_ENDPOINT";

pub fn is_mock_endpoint(endpoint: Option<&str>) -> bool {
    match endpoint.map(str::trim) {
        None | Some("") => true,
        Some(e) => e == PLACEHOLDER_ENDPOINT,
    }
}

/// 依設定選擇遠端工作流或內建模擬
pub enum WorkflowBackend {
    Remote(WorkflowClient),
    Mock(MockWorkflowClient),
}

impl WorkflowBackend {
    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        if is_mock_endpoint(config.api_endpoint()) {
            tracing::warn!("No workflow endpoint configured, using mock analysis");
            return Ok(WorkflowBackend::Mock(MockWorkflowClient::new(config.mock_delay())));
        }
        let client = WorkflowClient::from_config(config)?;
        tracing::info!("🔗 Using workflow endpoint: {}", client.endpoint());
        Ok(WorkflowBackend::Remote(client))
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, WorkflowBackend::Mock(_))
    }
}

#[async_trait]
impl AnalysisClient for WorkflowBackend {
    async fn analyze(&self, query: &BirthQuery) -> Result<AnalysisResult> {
        match self {
            WorkflowBackend::Remote(client) => client.analyze(query).await,
            WorkflowBackend::Mock(client) => client.analyze(query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_mock_endpoint() {
        assert!(is_mock_endpoint(None));
        assert!(is_mock_endpoint(Some("  ")));
        assert!(is_mock_endpoint(Some(PLACEHOLDER_ENDPOINT)));
        assert!(!is_mock_endpoint(Some("https://api.coze.cn/v1/workflow/run")));
    }

    #[test]
    fn test_backend_keeps_configured_endpoint() {
        let mut config = crate::config::toml_config::AppConfig::default();
        config.workflow.endpoint = Some("https://api.coze.cn/v1/workflow/run".to_string());
        match WorkflowBackend::from_config(&config).unwrap() {
            WorkflowBackend::Remote(client) => {
                assert_eq!(client.endpoint(), "https://api.coze.cn/v1/workflow/run")
            }
            WorkflowBackend::Mock(_) => panic!("expected remote backend"),
        }

        config.workflow.endpoint = Some(PLACEHOLDER_ENDPOINT.to_string());
        assert!(WorkflowBackend::from_config(&config).unwrap().is_mock());
    }
}
