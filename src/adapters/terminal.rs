use crate::domain::model::{Panel, Violation};
use crate::domain::ports::View;
use std::io::Write;
use std::sync::Mutex;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Default)]
struct TerminalState {
    visible: Option<Panel>,
    progress: f64,
    content: String,
    submit_enabled: bool,
}

/// 終端機上的渲染目標：進度條輸出到 stderr，結果內容保留給呼叫端寫檔
#[derive(Debug, Default)]
pub struct TerminalView {
    state: Mutex<TerminalState>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result_content(&self) -> String {
        self.state
            .lock()
            .map(|s| s.content.clone())
            .unwrap_or_default()
    }

    pub fn visible_panel(&self) -> Option<Panel> {
        self.state.lock().ok().and_then(|s| s.visible)
    }

    pub fn progress(&self) -> f64 {
        self.state.lock().map(|s| s.progress).unwrap_or(0.0)
    }

    pub fn submit_enabled(&self) -> bool {
        self.state.lock().map(|s| s.submit_enabled).unwrap_or(false)
    }
}

pub fn progress_bar(percent: f64) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent
    )
}

impl View for TerminalView {
    fn set_panel_visible(&self, panel: Panel, visible: bool) {
        if let Ok(mut state) = self.state.lock() {
            if visible {
                state.visible = Some(panel);
            } else if state.visible == Some(panel) {
                state.visible = None;
            }
        }
    }

    fn scroll_into_view(&self, panel: Panel) {
        match panel {
            Panel::Input => tracing::info!("📝 请输入出生信息"),
            Panel::Loading => eprintln!("🔮 正在分析您的八字..."),
            Panel::Result => {
                eprintln!();
                tracing::info!("📜 分析完成");
            }
        }
    }

    fn set_progress(&self, percent: f64) {
        if let Ok(mut state) = self.state.lock() {
            state.progress = percent;
        }
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r{}", progress_bar(percent));
        let _ = stderr.flush();
    }

    fn set_result_content(&self, markup: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.content = markup.to_string();
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.submit_enabled = enabled;
        }
    }

    fn report_violations(&self, violations: &[Violation]) {
        eprintln!("❌ 表单验证失败：");
        for violation in violations {
            eprintln!("  - {}", violation);
        }
    }
}
