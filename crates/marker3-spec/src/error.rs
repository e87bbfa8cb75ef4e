//! Error types for configuration validation and layer construction.

use thiserror::Error;

/// Error codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Trigger errors (M001-M003)
    /// M001: Activate and reset trigger values coincide
    TriggerCollision,
    /// M002: Trigger value outside the trigger enumeration
    TriggerOutOfRange,
    /// M003: Trigger enumeration size is zero or larger than supported
    InvalidTriggerCount,

    // Naming errors (M010-M013)
    /// M010: Parameter name is empty or padded with whitespace
    InvalidParameterName,
    /// M011: Layer name is empty or padded with whitespace
    InvalidLayerName,
    /// M012: Two generated layers share a name
    DuplicateLayerName,
    /// M013: Two generated parameters share a name
    DuplicateParameterName,

    // Binding errors (M020-M022)
    /// M020: Animation path is absolute or has empty segments
    InvalidAnimationPath,
    /// M021: Menu control name is empty
    InvalidControlName,
    /// M022: Submenu title in the menu path is empty or padded with whitespace
    InvalidMenuPath,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "M001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::TriggerCollision => "M001",
            ErrorCode::TriggerOutOfRange => "M002",
            ErrorCode::InvalidTriggerCount => "M003",
            ErrorCode::InvalidParameterName => "M010",
            ErrorCode::InvalidLayerName => "M011",
            ErrorCode::DuplicateLayerName => "M012",
            ErrorCode::DuplicateParameterName => "M013",
            ErrorCode::InvalidAnimationPath => "M020",
            ErrorCode::InvalidControlName => "M021",
            ErrorCode::InvalidMenuPath => "M022",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for configuration validation and install planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// MW001: Existing controller parameter has a non-int type
    ParameterTypeMismatch,
    /// MW002: Animation path is empty; clips bind to the avatar root
    EmptyAnimationPath,
    /// MW003: A generated layer already exists and was left untouched
    LayerAlreadyPresent,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "MW001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::ParameterTypeMismatch => "MW001",
            WarningCode::EmptyAnimationPath => "MW002",
            WarningCode::LayerAlreadyPresent => "MW003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional config path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "reset_gesture").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional config path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a field path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Result of configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Result type for builder and install operations.
pub type MarkerResult<T> = Result<T, MarkerError>;

/// Top-level error type for layer construction and installation.
///
/// Every variant is raised before anything is written to the destination,
/// so a failed call leaves controllers, parameters and menus as they were.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// The configuration was rejected before any construction started.
    #[error("configuration error: {} problem(s), first: {}", .errors.len(), first_error(.errors))]
    Configuration { errors: Vec<ValidationError> },

    /// The target menu has no free control slot.
    #[error("menu '{menu}' has no room ({capacity} controls already present)")]
    CapacityExceeded { menu: String, capacity: usize },

    /// No expression parameter slot is free for the requested name.
    #[error("no free expression parameter slot for '{name}' (all {slots} slots in use)")]
    ParametersExhausted { name: String, slots: usize },

    /// A menu id or title path does not resolve.
    #[error("unknown menu: {0}")]
    UnknownMenu(String),

    /// A layer references a parameter the controller does not declare.
    #[error("layer '{layer}' references undeclared parameter '{parameter}'")]
    UnresolvedParameter { layer: String, parameter: String },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn first_error(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

impl MarkerError {
    /// Wraps a list of validation errors.
    pub fn configuration(errors: Vec<ValidationError>) -> Self {
        Self::Configuration { errors }
    }

    /// Stable code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            MarkerError::Configuration { .. } => "MARKER_001",
            MarkerError::CapacityExceeded { .. } => "MARKER_002",
            MarkerError::ParametersExhausted { .. } => "MARKER_003",
            MarkerError::UnknownMenu(_) => "MARKER_004",
            MarkerError::UnresolvedParameter { .. } => "MARKER_005",
            MarkerError::Json(_) => "MARKER_006",
        }
    }

    /// Validation errors carried by a configuration error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            MarkerError::Configuration { errors } => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::TriggerCollision.code(), "M001");
        assert_eq!(ErrorCode::TriggerOutOfRange.code(), "M002");
        assert_eq!(ErrorCode::DuplicateLayerName.code(), "M012");
        assert_eq!(ErrorCode::InvalidAnimationPath.code(), "M020");
        assert_eq!(ErrorCode::InvalidMenuPath.code(), "M022");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::ParameterTypeMismatch.code(), "MW001");
        assert_eq!(WarningCode::LayerAlreadyPresent.code(), "MW003");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::TriggerCollision, "activate equals reset");
        assert_eq!(err.to_string(), "M001: activate equals reset");

        let err_with_path = ValidationError::with_path(
            ErrorCode::TriggerOutOfRange,
            "must be below 8",
            "reset",
        );
        assert_eq!(err_with_path.to_string(), "M002: must be below 8 (at reset)");
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::InvalidLayerName, "empty"));
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 1);
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_configuration_error_display() {
        let err = MarkerError::configuration(vec![ValidationError::new(
            ErrorCode::TriggerCollision,
            "activate equals reset",
        )]);
        assert_eq!(err.code(), "MARKER_001");
        assert_eq!(err.validation_errors().len(), 1);
        assert!(err.to_string().contains("M001"));
    }
}
