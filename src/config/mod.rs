pub mod cli;
pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use crate::core::form::clamp_day;
#[cfg(feature = "cli")]
use crate::domain::model::FormFields;
#[cfg(feature = "cli")]
use crate::domain::ports::FormSource;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "bazi-reading")]
#[command(about = "Collects birth data, requests a bazi analysis and writes the HTML report")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "")]
    pub name: String,

    /// male / female / other
    #[arg(long, default_value = "")]
    pub gender: String,

    #[arg(long, default_value = "")]
    pub birth_place: String,

    #[arg(long, default_value = "")]
    pub year: String,

    #[arg(long, default_value = "")]
    pub month: String,

    #[arg(long, default_value = "")]
    pub day: String,

    #[arg(long, default_value = "0")]
    pub hour: String,

    #[arg(long, default_value = "0")]
    pub minute: String,

    #[arg(long, default_value = "0")]
    pub second: String,

    /// Clamp the day to the last day of the month instead of rejecting it
    #[arg(long)]
    pub clamp_day: bool,

    /// Where to write the rendered report
    #[arg(short, long, default_value = "./bazi-report.html")]
    pub output: String,

    /// Override workflow.endpoint from the config file
    #[arg(long, env = "BAZI_WORKFLOW_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Override workflow.api_key from the config file
    #[arg(long, env = "BAZI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋配置檔
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.workflow.endpoint = Some(endpoint.clone());
            tracing::info!("🔧 Workflow endpoint overridden to: {}", endpoint);
        }
        if let Some(api_key) = &self.api_key {
            config.workflow.api_key = Some(api_key.clone());
        }
    }

    fn effective_day(&self) -> String {
        if !self.clamp_day {
            return self.day.clone();
        }
        let parsed = (
            self.year.trim().parse::<i32>(),
            self.month.trim().parse::<i32>(),
            self.day.trim().parse::<i32>(),
        );
        match parsed {
            (Ok(year), Ok(month), Ok(day)) => {
                let clamped = clamp_day(year, month, day);
                if clamped != day {
                    tracing::info!("🔧 Day {} clamped to {}", day, clamped);
                }
                clamped.to_string()
            }
            _ => self.day.clone(),
        }
    }
}

#[cfg(feature = "cli")]
impl FormSource for CliConfig {
    fn read_fields(&self) -> FormFields {
        FormFields {
            name: self.name.clone(),
            gender: self.gender.clone(),
            birth_place: self.birth_place.clone(),
            year: self.year.clone(),
            month: self.month.clone(),
            day: self.effective_day(),
            hour: self.hour.clone(),
            minute: self.minute.clone(),
            second: self.second.clone(),
        }
    }
}
