//! Core error types for juggler-core.
//!
//! The flow rating, load and pause functions are total and never fail.
//! Everything wrapped around them (store validation, focus timer, config,
//! planning assistant) reports through the enums below.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{ProjectId, TaskId};

/// Core error type for juggler-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected at the store boundary
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Accept/dismiss called while no pause suggestion is pending
    #[error("No pause suggestion is pending")]
    NoPendingSuggestion,

    #[error("Focus timer error: {0}")]
    Focus(#[from] FocusError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors raised before a mutation touches the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace
    #[error("'{field}' must not be empty")]
    Empty { field: &'static str },

    /// Integer score outside its inclusive range
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    ScoreOutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },

    /// Real-valued input outside its inclusive range (or NaN/infinite)
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Focus timer errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FocusError {
    #[error("Another task is already being timed ({task_id}); stop it first")]
    AlreadyRunning { task_id: TaskId },

    #[error("No focus session is running")]
    NotRunning,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Planning assistant errors.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Assistant returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed assistant response: {0}")]
    MalformedResponse(String),

    #[error("API key not set (expected in ${env})")]
    MissingApiKey { env: String },

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        AssistantError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
