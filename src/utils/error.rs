use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("IO error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed descriptor {path}: {message}")]
    MalformedDescriptor { path: PathBuf, message: String },

    #[error("Cannot visit {path}: {message}")]
    WalkVisit { path: PathBuf, message: String },

    #[error("Cannot walk root directory {path}: {message}")]
    WalkError { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Descriptor,
    Traversal,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl UpdaterError {
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::FileIo { .. } => ErrorCategory::Io,
            Self::MalformedDescriptor { .. } => ErrorCategory::Descriptor,
            Self::WalkVisit { .. } | Self::WalkError { .. } => ErrorCategory::Traversal,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 走訪時的單一項目錯誤只會被略過
            Self::WalkVisit { .. } => ErrorSeverity::Low,
            Self::MalformedDescriptor { .. } => ErrorSeverity::Medium,
            Self::IoError(_) | Self::FileIo { .. } => ErrorSeverity::High,
            Self::WalkError { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("File system operation failed: {}", e),
            Self::FileIo { path, source } => {
                format!("Could not read or write {}: {}", path.display(), source)
            }
            Self::MalformedDescriptor { path, message } => {
                format!("{} is not a well-formed pom.xml: {}", path.display(), message)
            }
            Self::WalkVisit { path, .. } => format!("Skipped inaccessible path {}", path.display()),
            Self::WalkError { path, .. } => {
                format!("The root directory {} could not be walked", path.display())
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check file permissions and that the disk is writable",
            ErrorCategory::Descriptor => "Fix the XML syntax of the descriptor and run again",
            ErrorCategory::Traversal => "Check that --root points to an existing, readable directory",
            ErrorCategory::Configuration => "Review the pin configuration file and command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, UpdaterError>;
