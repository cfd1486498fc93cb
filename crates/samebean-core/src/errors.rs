use thiserror::Error;

/// Result type alias using SameBeanError
pub type Result<T> = std::result::Result<T, SameBeanError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidInput,
    InvalidConfiguration,

    // Assertion
    /// Expected and actual values are not equivalent
    ComparisonFailure,

    // Integration
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfiguration => "ERR_INVALID_CONFIGURATION",
            ExErrorKind::ComparisonFailure => "ERR_COMPARISON_FAILURE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus free-form context for
/// debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add type name context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the type name context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised around the comparison engine.
///
/// Traversal, encoding and comparison never fail; these cover configuration
/// and the assertion surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SameBeanError {
    /// Type adapters must be registered under a non-empty type name
    #[error("Invalid type name for adapter registration: {type_name:?}")]
    InvalidTypeName { type_name: String },

    /// Configuration value out of range
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Expected and actual values are not equivalent
    #[error("{0}")]
    ComparisonFailure(#[from] ComparisonFailure),

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Assertion failure carrying both sides in rendered form.
///
/// `expected` and `actual` are pretty-printed canonical JSON of the full
/// values; `message` summarises the divergences.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ComparisonFailure {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl ComparisonFailure {
    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }
}

/// Conversion from SameBeanError to ExError
impl From<SameBeanError> for ExError {
    fn from(err: SameBeanError) -> Self {
        match err {
            SameBeanError::InvalidTypeName { type_name } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("register_adapter")
                    .with_type_name(type_name)
                    .with_message("Type name must not be empty")
            }

            SameBeanError::InvalidConfiguration { reason } => {
                ExError::new(ExErrorKind::InvalidConfiguration)
                    .with_op("build_configuration")
                    .with_message(reason)
            }

            SameBeanError::ComparisonFailure(failure) => {
                ExError::new(ExErrorKind::ComparisonFailure)
                    .with_op("assert_that")
                    .with_message(failure.message)
            }

            SameBeanError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("decode_diff_result")
                    .with_message(message)
            }
        }
    }
}

impl From<ComparisonFailure> for ExError {
    fn from(failure: ComparisonFailure) -> Self {
        SameBeanError::from(failure).into()
    }
}

/// Conversion from serde_json::Error to SameBeanError
impl From<serde_json::Error> for SameBeanError {
    fn from(err: serde_json::Error) -> Self {
        SameBeanError::Serialization {
            message: err.to_string(),
        }
    }
}
