pub mod controller;
pub mod form;
pub mod progress;
pub mod render;

pub use crate::domain::model::{AnalysisResult, BirthQuery, FormFields, Panel, Violation};
pub use crate::domain::ports::{AnalysisClient, ConfigProvider, ProgressIndicator, Storage, View};
pub use crate::utils::error::Result;
