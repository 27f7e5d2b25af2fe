use crate::domain::model::{AnalysisResult, BirthQuery};
use crate::domain::ports::{AnalysisClient, ConfigProvider};
use crate::utils::error::{ReadingError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// 透過 HTTP POST 呼叫遠端工作流
pub struct WorkflowClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl WorkflowClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        let endpoint = config
            .api_endpoint()
            .ok_or_else(|| ReadingError::MissingConfigError {
                field: "workflow.endpoint".to_string(),
            })?
            .to_string();
        let api_key = config.api_key().unwrap_or_default().to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisClient for WorkflowClient {
    async fn analyze(&self, query: &BirthQuery) -> Result<AnalysisResult> {
        tracing::debug!("Making workflow request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Workflow response status: {}", status);

        if !status.is_success() {
            return Err(ReadingError::HttpStatusError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await?;
        let result: AnalysisResult = serde_json::from_str(&body)?;
        Ok(result)
    }
}
