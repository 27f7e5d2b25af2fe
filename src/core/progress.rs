use crate::domain::ports::{ProgressIndicator, View};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// 動畫不會自行超過的上限，請求完成後才會補到 100
pub const PROGRESS_CEILING: f64 = 95.0;
pub const MAX_STEP: f64 = 15.0;

pub fn advance(progress: f64, step: f64) -> f64 {
    (progress + step).min(PROGRESS_CEILING)
}

/// 以固定間隔、隨機增量推進進度條的計時器
pub struct TickerProgress<V: View + 'static> {
    view: Arc<V>,
    tick: Duration,
    seed: Option<u64>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl<V: View + 'static> TickerProgress<V> {
    pub fn new(view: Arc<V>, tick: Duration) -> Self {
        Self {
            view,
            tick,
            seed: None,
            handle: Mutex::new(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn cancel(&self) {
        if let Ok(mut handle) = self.handle.lock() {
            if let Some(task) = handle.take() {
                task.abort();
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .map(|h| h.as_ref().is_some_and(|task| !task.is_finished()))
            .unwrap_or(false)
    }
}

impl<V: View + 'static> ProgressIndicator for TickerProgress<V> {
    fn start(&self) {
        self.cancel();
        self.view.set_progress(0.0);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available, progress animation disabled");
            return;
        };

        let view = Arc::clone(&self.view);
        let tick = self.tick.max(Duration::from_millis(1));
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // 第一次 tick 立即返回
            interval.tick().await;
            let mut progress = 0.0;
            loop {
                interval.tick().await;
                progress = advance(progress, rng.gen_range(0.0..MAX_STEP));
                view.set_progress(progress);
                if progress >= PROGRESS_CEILING {
                    break;
                }
            }
        });

        if let Ok(mut handle) = self.handle.lock() {
            *handle = Some(task);
        }
    }

    fn stop_and_complete(&self) {
        self.cancel();
        self.view.set_progress(100.0);
    }

    fn reset(&self) {
        self.cancel();
        self.view.set_progress(0.0);
    }
}

impl<V: View + 'static> Drop for TickerProgress<V> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 不做任何動畫，只記錄最終狀態
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressIndicator for NoopProgress {
    fn start(&self) {}

    fn stop_and_complete(&self) {}

    fn reset(&self) {}
}
