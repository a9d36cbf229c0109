use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Movie lookup failed for id {id}: {message}")]
    LookupError { id: String, message: String },

    #[error("Missing field '{field}' in {context}")]
    MissingField { field: String, context: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::RequestError(_) | EtlError::HttpStatus { .. } | EtlError::LookupError { .. } => {
                ErrorCategory::Network
            }
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::MissingField { .. }
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 單筆項目的錯誤只會被略過；只有到達 engine 的錯誤才決定退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the network connection and the base URL / lookup endpoint, then rerun"
            }
            ErrorCategory::Data => "Inspect the input CSV or the page markup for unexpected formatting",
            ErrorCategory::Io => "Make sure the output directory is writable and the input file exists",
            ErrorCategory::Configuration => "Fix the configuration value and run again (see --help)",
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 網路錯誤，可重跑
            ErrorSeverity::High => 1,     // 資料處理錯誤
            ErrorSeverity::Critical => 3, // 系統或配置錯誤
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::HttpStatus { status, url } => {
                format!("Server answered {} for {}", status, url)
            }
            EtlError::IoError(e) => format!("File system problem: {}", e),
            EtlError::CsvError(e) => format!("Could not read or write CSV: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let err = EtlError::HttpStatus {
            status: 404,
            url: "http://example.com/movies-A.htm".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = EtlError::MissingConfigError {
            field: "source.base_url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[tokio::test]
    async fn test_request_failure_is_network_error() {
        let reqwest_err = reqwest::Client::new()
            .get("movies-A.htm")
            .send()
            .await
            .unwrap_err();
        let err = EtlError::from(reqwest_err);

        assert!(matches!(err, EtlError::RequestError(_)));
        assert!(err.to_string().starts_with("HTTP request failed"));
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_user_friendly_message() {
        let err = EtlError::HttpStatus {
            status: 500,
            url: "http://example.com/x.htm".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Server answered 500 for http://example.com/x.htm"
        );
    }
}
