#![allow(dead_code)]

use async_trait::async_trait;
use bazi_reading::adapters::mock::mock_result;
use bazi_reading::config::toml_config::{UiConfig, WorkflowConfig};
use bazi_reading::domain::model::{AnalysisResult, BirthQuery, FormFields, Panel, Violation};
use bazi_reading::domain::ports::{AnalysisClient, View};
use bazi_reading::{AppConfig, ReadingError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Recorded {
    visibility: HashMap<Panel, bool>,
    scrolls: Vec<Panel>,
    progress: Vec<f64>,
    content: String,
    submit_enabled: bool,
    violations: Vec<Vec<Violation>>,
}

/// 記錄所有對渲染目標的呼叫
#[derive(Debug, Default)]
pub struct RecordingView {
    state: Mutex<Recorded>,
}

impl RecordingView {
    pub fn visible_panels(&self) -> Vec<Panel> {
        let state = self.state.lock().unwrap();
        Panel::ALL
            .into_iter()
            .filter(|p| state.visibility.get(p).copied().unwrap_or(false))
            .collect()
    }

    pub fn scrolls(&self) -> Vec<Panel> {
        self.state.lock().unwrap().scrolls.clone()
    }

    pub fn progress(&self) -> Option<f64> {
        self.state.lock().unwrap().progress.last().copied()
    }

    pub fn progress_history(&self) -> Vec<f64> {
        self.state.lock().unwrap().progress.clone()
    }

    pub fn content(&self) -> String {
        self.state.lock().unwrap().content.clone()
    }

    pub fn submit_enabled(&self) -> bool {
        self.state.lock().unwrap().submit_enabled
    }

    pub fn violations(&self) -> Vec<Vec<Violation>> {
        self.state.lock().unwrap().violations.clone()
    }
}

impl View for RecordingView {
    fn set_panel_visible(&self, panel: Panel, visible: bool) {
        self.state.lock().unwrap().visibility.insert(panel, visible);
    }

    fn scroll_into_view(&self, panel: Panel) {
        self.state.lock().unwrap().scrolls.push(panel);
    }

    fn set_progress(&self, percent: f64) {
        self.state.lock().unwrap().progress.push(percent);
    }

    fn set_result_content(&self, markup: &str) {
        self.state.lock().unwrap().content = markup.to_string();
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.state.lock().unwrap().submit_enabled = enabled;
    }

    fn report_violations(&self, violations: &[Violation]) {
        self.state.lock().unwrap().violations.push(violations.to_vec());
    }
}

/// 收到請求後等待放行的客戶端
pub struct GatedClient {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
    calls: AtomicUsize,
    fail: bool,
}

impl GatedClient {
    pub fn succeeding() -> Self {
        Self::new(false)
    }

    pub fn failing() -> Self {
        Self::new(true)
    }

    fn new(fail: bool) -> Self {
        Self {
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
            calls: AtomicUsize::new(0),
            fail,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisClient for GatedClient {
    async fn analyze(&self, query: &BirthQuery) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        if self.fail {
            return Err(ReadingError::HttpStatusError {
                status: 500,
                reason: "Internal Server Error".to_string(),
            });
        }
        Ok(mock_result(query))
    }
}

/// 所有等待時間歸零的配置
pub fn instant_config() -> AppConfig {
    AppConfig {
        workflow: WorkflowConfig::default(),
        ui: UiConfig {
            loading_duration_ms: 0,
            progress_tick_ms: 1,
            result_hold_ms: 0,
            mock_delay_ms: 0,
        },
    }
}

pub fn zhang_san() -> FormFields {
    FormFields {
        name: "张三".to_string(),
        gender: "male".to_string(),
        birth_place: "北京".to_string(),
        year: "1990".to_string(),
        month: "5".to_string(),
        day: "15".to_string(),
        hour: "10".to_string(),
        minute: "30".to_string(),
        second: "0".to_string(),
    }
}
