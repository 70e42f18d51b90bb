use thiserror::Error;

#[derive(Error, Debug)]
pub enum PyeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to load engine library '{path}': {reason}")]
    LibraryLoadError { path: String, reason: String },

    #[error("Engine library '{path}' does not export '{symbol}'")]
    MissingSymbolError { path: String, symbol: String },

    #[error("Engine initialisation in '{dir}' failed with status {status}")]
    InitFailedError { dir: String, status: i32 },

    #[error("Invalid value {value} for option '{option}'")]
    InvalidOptionValueError { option: String, value: i32 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Library,
    Engine,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PyeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PyeError::TomlError(_)
            | PyeError::ConfigError { .. }
            | PyeError::InvalidConfigValueError { .. }
            | PyeError::InvalidOptionValueError { .. } => ErrorCategory::Configuration,
            PyeError::LibraryLoadError { .. } | PyeError::MissingSymbolError { .. } => {
                ErrorCategory::Library
            }
            PyeError::InitFailedError { .. } => ErrorCategory::Engine,
            PyeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PyeError::InitFailedError { .. } => ErrorSeverity::Medium,
            PyeError::InvalidOptionValueError { .. }
            | PyeError::TomlError(_)
            | PyeError::ConfigError { .. }
            | PyeError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            PyeError::LibraryLoadError { .. }
            | PyeError::MissingSymbolError { .. }
            | PyeError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PyeError::LibraryLoadError { path, .. } => {
                format!("The engine library at '{}' could not be loaded", path)
            }
            PyeError::MissingSymbolError { path, symbol } => format!(
                "'{}' is not a pye engine library (missing '{}')",
                path, symbol
            ),
            PyeError::InitFailedError { dir, status } => format!(
                "The engine refused the data directory '{}' (status {})",
                dir, status
            ),
            PyeError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            PyeError::IoError(e) => format!("A file could not be read or written: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the configuration file, environment variables and command line flags"
            }
            ErrorCategory::Library => {
                "Point --library or PYE_LIBRARY at a valid engine library, or enable fallback_to_stub"
            }
            ErrorCategory::Engine => "Make sure the data directory exists and holds the engine data",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, PyeError>;
