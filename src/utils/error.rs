use crate::domain::ports::SlotConflict;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {id}")]
    ResourceNotFound { id: String },

    #[error("Duplicate resource id: {id}")]
    DuplicateResource { id: String },

    #[error("Seed booking conflict: {0}")]
    SlotConflict(#[from] SlotConflict),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Catalog,
    Ledger,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::ConfigValidationError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. }
            | BookingError::DuplicateResource { .. } => ErrorCategory::Configuration,
            BookingError::ResourceNotFound { .. } => ErrorCategory::Catalog,
            BookingError::SlotConflict(_) => ErrorCategory::Ledger,
            BookingError::IoError(_) | BookingError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BookingError::ResourceNotFound { .. } => ErrorSeverity::Medium,
            BookingError::ConfigValidationError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. }
            | BookingError::DuplicateResource { .. }
            | BookingError::SlotConflict(_) => ErrorSeverity::High,
            BookingError::IoError(_) | BookingError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// CLI 的 exit code；4 保留給被拒絕的預約
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BookingError::ResourceNotFound { .. } => {
                "Run the `resources` command to list valid resource ids"
            }
            BookingError::DuplicateResource { .. } => {
                "Give every [[resources]] entry a unique id"
            }
            BookingError::SlotConflict(_) => {
                "Remove the duplicated [[bookings]] entry from the configuration"
            }
            BookingError::ConfigValidationError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. } => {
                "Check the configuration file against booking-config.toml"
            }
            BookingError::IoError(_) => "Check that the file exists and is readable",
            BookingError::SerializationError(_) => "Retry without --json",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("設定檔有誤: {}", self),
            ErrorCategory::Catalog => format!("找不到資源: {}", self),
            ErrorCategory::Ledger => format!("預約資料衝突: {}", self),
            ErrorCategory::System => format!("系統錯誤: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
