use bazi_reading::core::render::render_page;
use bazi_reading::domain::ports::{ConfigProvider, Storage};
use bazi_reading::utils::{logger, validation::Validate};
use bazi_reading::{
    AppConfig, CliConfig, LocalStorage, SubmitOutcome, TerminalView, TickerProgress,
    ViewController, WorkflowBackend,
};
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting bazi-reading CLI");

    // 載入配置
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match AppConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => AppConfig::default(),
    };
    args.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let view = Arc::new(TerminalView::new());
    let client = WorkflowBackend::from_config(&config)?;
    if client.is_mock() {
        println!("ℹ️  未配置工作流 API，使用演示数据");
    }
    let progress = TickerProgress::new(Arc::clone(&view), config.progress_tick());
    let controller = ViewController::new(Arc::clone(&view), client, progress, &config);

    match controller.submit_from(&args).await {
        SubmitOutcome::Completed { success } => {
            tracing::debug!(
                "Settled at {:.0}% (submit enabled: {})",
                view.progress(),
                view.submit_enabled()
            );
            let page = render_page(&view.result_content());
            let output = Path::new(&args.output);
            let base = output
                .parent()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default();
            let file_name = output
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "bazi-report.html".to_string());

            let storage = LocalStorage::new(base);
            storage
                .write_file(&file_name, page.as_bytes())
                .await
                .with_context(|| format!("failed to write report to {}", args.output))?;
            tracing::info!("📁 Report saved to: {}", args.output);
            println!("📁 Report saved to: {}", args.output);

            if !success {
                eprintln!("❌ 分析未成功，详情请查看报告");
                std::process::exit(2);
            }
            println!("✅ Reading completed successfully!");
        }
        SubmitOutcome::Rejected(violations) => {
            let err = bazi_reading::ReadingError::ValidationError { violations };
            tracing::error!("💡 Suggestion: {}", err.recovery_suggestion());
            tracing::debug!("Validation severity: {:?}", err.severity());
            std::process::exit(1);
        }
        SubmitOutcome::Ignored => {
            tracing::warn!("Submission ignored because another one is still running");
        }
    }

    Ok(())
}
