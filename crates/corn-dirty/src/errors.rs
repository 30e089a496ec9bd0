use thiserror::Error;

/// Result type alias using DirtyMapError
pub type Result<T> = std::result::Result<T, DirtyMapError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// without depending on the shape of [`DirtyMapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup
    NotFound,

    // Configuration
    InvalidConfig,

    // Sweep
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus free-form context
/// for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add tracked key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
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

    /// Get the key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
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
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for dirty-tracking operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirtyMapError {
    /// Key is not present in the base store
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// Tracking configuration could not be parsed
    #[error("Invalid tracking config: {reason}")]
    InvalidConfig { reason: String },

    /// The sweep writer rejected an entry; the window was left dirty
    #[error("Sweep failed at key {key}: {reason}")]
    SweepFailed { key: String, reason: String },
}

impl DirtyMapError {
    /// Build a `KeyNotFound` from any debuggable key
    pub fn key_not_found<K: std::fmt::Debug + ?Sized>(key: &K) -> Self {
        DirtyMapError::KeyNotFound {
            key: format!("{:?}", key),
        }
    }
}

impl From<DirtyMapError> for ExError {
    fn from(err: DirtyMapError) -> Self {
        match err {
            DirtyMapError::KeyNotFound { key } => ExError::new(ExErrorKind::NotFound)
                .with_op("is_dirty")
                .with_key(key)
                .with_message("Key not present in base store"),

            DirtyMapError::InvalidConfig { reason } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(format!("Invalid tracking config: {}", reason)),

            DirtyMapError::SweepFailed { key, reason } => ExError::new(ExErrorKind::Persistence)
                .with_op("dirty_sweep")
                .with_key(key)
                .with_message(reason),
        }
    }
}
