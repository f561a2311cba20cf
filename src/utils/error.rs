use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Could not open file \"{path}\": {source}")]
    FileOpenError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No courses loaded")]
    NoDataError,

    #[error("Course \"{id}\" not found")]
    CourseNotFoundError { id: String },

    #[error("Course number cannot be empty")]
    EmptyIdentifierError,

    #[error("Invalid selection: {input}")]
    InvalidSelectionError { input: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
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
    Io,
    Data,
    Query,
    Input,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::IoError(_) | PlannerError::FileOpenError { .. } => ErrorCategory::Io,
            PlannerError::CsvError(_) | PlannerError::SerializationError(_) => ErrorCategory::Data,
            PlannerError::NoDataError | PlannerError::CourseNotFoundError { .. } => {
                ErrorCategory::Query
            }
            PlannerError::EmptyIdentifierError | PlannerError::InvalidSelectionError { .. } => {
                ErrorCategory::Input
            }
            PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Query | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::FileOpenError { path, .. } => {
                format!("Could not open file \"{}\".", path)
            }
            PlannerError::NoDataError => "No courses loaded. Load course data first.".to_string(),
            PlannerError::CourseNotFoundError { id } => format!("Course \"{}\" not found.", id),
            PlannerError::EmptyIdentifierError => "Course number cannot be empty.".to_string(),
            PlannerError::InvalidSelectionError { .. } => {
                "Invalid selection. Please enter 1, 2, 3, or 9.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::FileOpenError { .. } => "Check that the file exists and is readable",
            PlannerError::IoError(_) => "Check file permissions and available disk space",
            PlannerError::CsvError(_) => "Check that the course file is comma-separated text",
            PlannerError::SerializationError(_) => "Try again with --format text",
            PlannerError::NoDataError => "Load course data first (option 1 or --data-file)",
            PlannerError::CourseNotFoundError { .. } => {
                "Print the course list to see available course numbers"
            }
            PlannerError::EmptyIdentifierError => "Enter a course number such as CSCI200",
            PlannerError::InvalidSelectionError { .. } => "Enter one of the menu numbers",
            PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
