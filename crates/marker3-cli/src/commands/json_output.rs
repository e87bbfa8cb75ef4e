//! JSON output types for machine-readable CLI output.
//!
//! Every command accepting `--json` prints exactly one of these documents
//! to stdout instead of colored text.

use marker3_spec::{LayerChange, MarkerError, ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Library errors pass through with their own codes (`M001`, `MARKER_002`, ...).
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_003";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "M001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Config path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// Derived names (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidateResult>,
    /// BLAKE3 hash of the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// Names and values a valid configuration resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResult {
    pub watched_parameter: String,
    pub gesture_layer: String,
    pub toggle_layer: String,
    pub toggle_parameter: String,
    pub activate: i32,
    pub reset: i32,
    pub trigger_count: i32,
    pub menu_path: String,
}

impl ValidateOutput {
    pub fn success(
        result: ValidateResult,
        source_hash: String,
        warnings: Vec<JsonWarning>,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
            source_hash: Some(source_hash),
        }
    }

    pub fn failure(
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
        source_hash: Option<String>,
    ) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
            source_hash,
        }
    }
}

/// JSON output for the `plan` and `install` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InstallResult>,
    /// BLAKE3 hash of the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
    /// BLAKE3 hash of the avatar file as read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_hash: Option<String>,
}

/// What an install changes (plan) or changed (install).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallResult {
    /// False for `plan`
    pub committed: bool,
    pub layers: Vec<LayerChange>,
    pub parameters_added: Vec<String>,
    pub expression_slot: usize,
    pub menu_path: String,
    pub menu_control_added: bool,
    /// Clip names, in role order
    pub clips: Vec<String>,
    /// Canonical hash of the resulting FX controller
    pub controller_hash: String,
    /// Where the updated avatar was written (install only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    /// Clip files written (install with a clip directory only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clip_files: Vec<String>,
}

impl InstallOutput {
    pub fn success(
        result: InstallResult,
        config_hash: String,
        avatar_hash: String,
        warnings: Vec<JsonWarning>,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
            config_hash: Some(config_hash),
            avatar_hash: Some(avatar_hash),
        }
    }

    pub fn failure(
        errors: Vec<JsonError>,
        config_hash: Option<String>,
        avatar_hash: Option<String>,
    ) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            result: None,
            config_hash,
            avatar_hash,
        }
    }
}

/// JSON output for the `menus` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenusOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub menus: Vec<MenuEntry>,
}

/// One reachable menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: usize,
    pub name: String,
    /// Title path from the root, `/` for the root itself
    pub path: String,
    /// Free control slots
    pub room: usize,
}

/// Converts an input error to a JsonError.
pub fn input_error_to_json(err: &crate::input::InputError) -> JsonError {
    use crate::input::InputError;

    let (code, path) = match err {
        InputError::FileRead { path, .. } => (error_codes::FILE_READ, path),
        InputError::JsonParse { path, .. } => (error_codes::JSON_PARSE, path),
        InputError::FileWrite { path, .. } => (error_codes::FILE_WRITE, path),
    };
    JsonError::new(code, err.to_string()).with_file(path.display().to_string())
}

/// Converts a ValidationError to a JsonError.
pub fn validation_error_to_json(err: &ValidationError) -> JsonError {
    let mut error = JsonError::new(err.code.to_string(), &err.message);
    if let Some(ref path) = err.path {
        error = error.with_path(path);
    }
    error
}

/// Converts a ValidationWarning to a JsonWarning.
pub fn validation_warning_to_json(warn: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warn.code.to_string(),
        message: warn.message.clone(),
        path: warn.path.clone(),
    }
}

/// Converts a library error to JsonErrors.
///
/// A configuration error expands to one entry per validation error.
pub fn marker_error_to_json(err: &MarkerError) -> Vec<JsonError> {
    match err {
        MarkerError::Configuration { errors } => {
            errors.iter().map(validation_error_to_json).collect()
        }
        other => vec![JsonError::new(other.code(), other.to_string())],
    }
}
