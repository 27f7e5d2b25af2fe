pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, AppConfig};

pub use adapters::{MockWorkflowClient, TerminalView, WorkflowBackend, WorkflowClient};
pub use core::controller::{SubmitOutcome, ViewController};
pub use core::progress::{NoopProgress, TickerProgress};
pub use utils::error::{ReadingError, Result};
