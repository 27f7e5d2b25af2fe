use crate::domain::model::Violation;
use thiserror::Error;

/// 通用的失敗提示，當錯誤本身沒有可顯示的訊息時使用
pub const GENERIC_FAILURE_MESSAGE: &str = "算命过程中发生了未知错误，请重试。";

#[derive(Error, Debug)]
pub enum ReadingError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API调用失败: {status} {reason}")]
    HttpStatusError { status: u16, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("表单验证失败：\n{}", format_violations(.violations))]
    ValidationError { violations: Vec<Violation> },

    #[error("{message}")]
    UnknownError { message: String },
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Transport,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReadingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReadingError::ValidationError { .. } => ErrorCategory::Validation,
            ReadingError::ApiError(_) | ReadingError::HttpStatusError { .. } => {
                ErrorCategory::Transport
            }
            ReadingError::MissingConfigError { .. }
            | ReadingError::InvalidConfigValueError { .. }
            | ReadingError::TomlError(_) => ErrorCategory::Configuration,
            ReadingError::IoError(_)
            | ReadingError::SerializationError(_)
            | ReadingError::UnknownError { .. } => ErrorCategory::Unknown,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Unknown => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 顯示在錯誤面板上的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ReadingError::HttpStatusError { .. } | ReadingError::ValidationError { .. } => {
                self.to_string()
            }
            ReadingError::ApiError(e) if e.is_connect() => "无法连接到分析服务，请检查网络后重试。".to_string(),
            ReadingError::UnknownError { message } if !message.trim().is_empty() => message.clone(),
            ReadingError::MissingConfigError { field } => format!("缺少配置项: {}", field),
            ReadingError::InvalidConfigValueError { field, reason, .. } => {
                format!("配置项 {} 无效: {}", field, reason)
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "请检查表单中标出的字段后重新提交",
            ErrorCategory::Transport => "请检查网络连接和 API 端点配置后点击重新尝试",
            ErrorCategory::Configuration => "请检查配置文件中的 workflow 与 ui 设置",
            ErrorCategory::Unknown => "请稍后重新尝试，若问题持续请查看日志",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Field, Violation};

    #[test]
    fn test_status_error_message_carries_status_and_reason() {
        let err = ReadingError::HttpStatusError {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "API调用失败: 503 Service Unavailable");
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_unknown_error_falls_back_to_generic_message() {
        let err = ReadingError::UnknownError {
            message: "  ".to_string(),
        };
        assert_eq!(err.user_friendly_message(), GENERIC_FAILURE_MESSAGE);

        let err = ReadingError::UnknownError {
            message: "boom".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "boom");
    }

    #[test]
    fn test_malformed_body_uses_generic_message() {
        let err: ReadingError = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ReadingError::SerializationError(_)));
        assert_eq!(err.category(), ErrorCategory::Unknown);
        assert_eq!(err.user_friendly_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = ReadingError::ValidationError {
            violations: vec![Violation::Required(Field::Name), Violation::OutOfRange(Field::Hour)],
        };
        let message = err.to_string();
        assert!(message.starts_with("表单验证失败："));
        assert!(message.contains("请输入姓名"));
        assert!(message.contains("请输入有效的小时(0-23)"));
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }
}
