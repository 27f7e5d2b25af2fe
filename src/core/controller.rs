use crate::core::form::validate_fields;
use crate::core::render::{render_failure, render_result};
use crate::domain::model::{FormFields, Panel, Violation};
use crate::domain::ports::{AnalysisClient, ConfigProvider, FormSource, ProgressIndicator, View};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// 一次 `submit` 的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 已有請求在進行中，本次提交被忽略
    Ignored,
    /// 驗證失敗，狀態未改變
    Rejected(Vec<Violation>),
    /// 請求已結束並進入結果面板
    Completed { success: bool },
}

#[derive(Debug, Clone, Copy)]
struct Timings {
    loading_duration: Duration,
    result_hold: Duration,
}

/// 管理 Input → Loading → Result 生命週期的控制器
pub struct ViewController<V, C, P>
where
    V: View,
    C: AnalysisClient,
    P: ProgressIndicator,
{
    view: Arc<V>,
    client: C,
    progress: P,
    timings: Timings,
    panel: Mutex<Panel>,
    submitting: AtomicBool,
}

/// 離開作用域時清除提交旗標並重新啟用按鈕；請求未完成就被放棄時回到輸入面板
struct SubmittingGuard<'a, V, C, P>
where
    V: View,
    C: AnalysisClient,
    P: ProgressIndicator,
{
    controller: &'a ViewController<V, C, P>,
    settled: bool,
}

impl<V, C, P> Drop for SubmittingGuard<'_, V, C, P>
where
    V: View,
    C: AnalysisClient,
    P: ProgressIndicator,
{
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Submission abandoned before settling, returning to input");
            self.controller.progress.reset();
            self.controller.show_panel(Panel::Input);
        }
        self.controller.submitting.store(false, Ordering::SeqCst);
        self.controller.view.set_submit_enabled(true);
    }
}

impl<V, C, P> ViewController<V, C, P>
where
    V: View,
    C: AnalysisClient,
    P: ProgressIndicator,
{
    /// 建立控制器並顯示輸入面板
    pub fn new(view: Arc<V>, client: C, progress: P, config: &impl ConfigProvider) -> Self {
        let controller = Self {
            view,
            client,
            progress,
            timings: Timings {
                loading_duration: config.loading_duration(),
                result_hold: config.result_hold(),
            },
            panel: Mutex::new(Panel::Input),
            submitting: AtomicBool::new(false),
        };
        controller.apply_panel(Panel::Input, false);
        controller.view.set_submit_enabled(true);
        tracing::info!("Reading controller initialized");
        controller
    }

    pub fn panel(&self) -> Panel {
        self.panel.lock().map(|p| *p).unwrap_or(Panel::Input)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn submit_from(&self, form: &impl FormSource) -> SubmitOutcome {
        let fields = form.read_fields();
        self.submit(&fields).await
    }

    pub async fn submit(&self, fields: &FormFields) -> SubmitOutcome {
        if self.is_submitting() {
            tracing::debug!("Submission already in flight, ignoring");
            return SubmitOutcome::Ignored;
        }

        let (query, violations) = validate_fields(fields);
        if !violations.is_empty() {
            tracing::warn!("Form validation failed with {} violation(s)", violations.len());
            self.view.report_violations(&violations);
            return SubmitOutcome::Rejected(violations);
        }

        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return SubmitOutcome::Ignored;
        }
        let mut guard = SubmittingGuard {
            controller: self,
            settled: false,
        };
        self.view.set_submit_enabled(false);

        tracing::info!("Requesting analysis for birth time {}", query.birth_datetime);
        let started = Instant::now();
        self.show_panel(Panel::Loading);
        self.progress.start();

        let outcome = self.client.analyze(&query).await;

        if let Some(remaining) = self.timings.loading_duration.checked_sub(started.elapsed()) {
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
        }
        self.progress.stop_and_complete();
        if !self.timings.result_hold.is_zero() {
            tokio::time::sleep(self.timings.result_hold).await;
        }

        let (markup, success) = match outcome {
            Ok(result) => {
                tracing::info!("Analysis settled (success: {})", result.success);
                (render_result(&result), result.success)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                (render_failure(&e.user_friendly_message()), false)
            }
        };

        self.view.set_result_content(&markup);
        self.show_panel(Panel::Result);
        guard.settled = true;
        SubmitOutcome::Completed { success }
    }

    /// 從結果面板回到輸入面板；請求進行中不可觸發
    pub fn new_reading(&self) -> bool {
        if self.is_submitting() {
            tracing::debug!("New reading requested while loading, ignoring");
            return false;
        }

        self.show_panel(Panel::Input);
        self.progress.reset();
        self.submitting.store(false, Ordering::SeqCst);
        self.view.set_submit_enabled(true);
        tracing::info!("Ready for a new reading");
        true
    }

    /// 錯誤面板上的「重新尝试」按鈕
    pub fn retry(&self) -> bool {
        self.new_reading()
    }

    fn show_panel(&self, panel: Panel) {
        self.apply_panel(panel, true);
    }

    fn apply_panel(&self, panel: Panel, scroll: bool) {
        for candidate in Panel::ALL {
            self.view.set_panel_visible(candidate, candidate == panel);
        }
        if let Ok(mut current) = self.panel.lock() {
            *current = panel;
        }
        if scroll {
            self.view.scroll_into_view(panel);
        }
        tracing::debug!("Panel switched to {}", panel.as_str());
    }
}
