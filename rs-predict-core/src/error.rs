use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building, persisting, loading or querying a model.
///
/// Missing n-grams are never errors: scoring handles them with smoothing or
/// backoff, and continuation ends with the "not recognized" marker.
#[derive(Error, Debug)]
pub enum NgramError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] postcard::Error),

	#[error("Config error: {0}")]
	Config(#[from] serde_json::Error),

	#[error("Malformed metrics in {path}: {reason}")]
	MalformedMetrics { path: PathBuf, reason: String },

	#[error("Malformed counts at line {line}: {reason}")]
	MalformedCounts { line: usize, reason: String },

	#[error("Query needs at least {expected} word(s), got {got}")]
	QueryTooShort { expected: usize, got: usize },

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, NgramError>;
