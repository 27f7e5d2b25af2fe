use crate::domain::model::{AnalysisResult, BirthQuery, FormFields, Panel, Violation};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 分析請求的遠端協作者（工作流 API 或內建模擬）
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, query: &BirthQuery) -> Result<AnalysisResult>;
}

/// 渲染目標：三個面板、進度條、結果容器與提交按鈕
pub trait View: Send + Sync {
    fn set_panel_visible(&self, panel: Panel, visible: bool);
    fn scroll_into_view(&self, panel: Panel);
    fn set_progress(&self, percent: f64);
    fn set_result_content(&self, markup: &str);
    fn set_submit_enabled(&self, enabled: bool);
    fn report_violations(&self, violations: &[Violation]);
}

/// 純裝飾用的進度動畫，與實際請求生命週期無關
pub trait ProgressIndicator: Send + Sync {
    fn start(&self);
    fn stop_and_complete(&self);
    fn reset(&self);
}

pub trait FormSource {
    fn read_fields(&self) -> FormFields;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> Option<&str>;
    fn api_key(&self) -> Option<&str>;
    fn request_timeout(&self) -> Option<Duration>;
    fn loading_duration(&self) -> Duration;
    fn progress_tick(&self) -> Duration;
    fn result_hold(&self) -> Duration;
    fn mock_delay(&self) -> Duration;
}
