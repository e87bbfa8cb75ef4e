//! Loading and writing the JSON documents the CLI works on.
//!
//! Every loaded document carries the BLAKE3 hash of its raw source so
//! reports can tie results back to the exact input bytes.

use std::path::{Path, PathBuf};

use marker3_spec::{Avatar, MarkerConfig};

/// A parsed document with the hash of its source text.
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur while reading or writing documents.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    JsonParse { path: PathBuf, message: String },

    /// File could not be written.
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { path, message } => {
                write!(f, "JSON parse error in '{}': {}", path.display(), message)
            }
            InputError::FileWrite { path, source } => {
                write!(f, "failed to write file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } | InputError::FileWrite { source, .. } => {
                Some(source)
            }
            InputError::JsonParse { .. } => None,
        }
    }
}

/// Load a marker configuration from a JSON file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use marker3_cli::input::load_config;
///
/// let loaded = load_config(Path::new("marker.json")).unwrap();
/// println!("watching {}", loaded.value.watched_parameter());
/// ```
pub fn load_config(path: &Path) -> Result<Loaded<MarkerConfig>, InputError> {
    load_json(path, MarkerConfig::from_json)
}

/// Load an avatar document from a JSON file.
pub fn load_avatar(path: &Path) -> Result<Loaded<Avatar>, InputError> {
    load_json(path, Avatar::from_json)
}

fn load_json<T>(
    path: &Path,
    parse: fn(&str) -> Result<T, serde_json::Error>,
) -> Result<Loaded<T>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let value = parse(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(Loaded { value, source_hash })
}

/// Write a document, creating parent directories as needed.
pub fn write_document(path: &Path, contents: &str) -> Result<(), InputError> {
    let write_err = |source| InputError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, contents).map_err(write_err)
}
