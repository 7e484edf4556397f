//! JSON output envelope for `--json` runs.
//!
//! Every command prints the same outer structure so scripts can check
//! `status`/`code` without knowing the payload shape.

use serde::{Deserialize, Serialize};

use crate::error::SymdocError;

/// Schema version for this envelope format.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Message type for stream discrimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Result,
    Error,
}

/// Operation outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    NotFound,
    Error,
}

/// Machine-readable result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Ok,
    NotFound,
    MalformedInput,
    MissingInput,
    IoError,
    ConfigError,
}

impl ResultCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NotFound => "NOT_FOUND",
            Self::MalformedInput => "MALFORMED_INPUT",
            Self::MissingInput => "MISSING_INPUT",
            Self::IoError => "IO_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl From<&SymdocError> for ResultCode {
    fn from(err: &SymdocError) -> Self {
        match err {
            SymdocError::MalformedInput { .. } => Self::MalformedInput,
            SymdocError::MissingInput(_) | SymdocError::Pattern { .. } => Self::MissingInput,
            SymdocError::Io { .. } => Self::IoError,
            SymdocError::Config(_) => Self::ConfigError,
        }
    }
}

/// Entity type in the data payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    RunStats,
    Members,
}

/// Unified JSON output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    #[serde(rename = "type")]
    pub message_type: MessageType,

    pub status: Status,

    pub code: ResultCode,

    /// Process exit code (0-255)
    pub exit_code: u8,

    pub message: String,

    /// Result payload (null on error)
    pub data: Option<T>,

    /// Error details (absent on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,

    pub meta: Meta,
}

/// Error details with suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Response metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub schema_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,

    /// Number of items in data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Original query string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            entity_type: None,
            count: None,
            query: None,
            duration_ms: None,
        }
    }
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            message_type: MessageType::Result,
            status: Status::Success,
            code: ResultCode::Ok,
            exit_code: 0,
            message: "Operation completed successfully".to_string(),
            data: Some(data),
            error: None,
            meta: Meta::default(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Result,
            status: Status::NotFound,
            code: ResultCode::NotFound,
            exit_code: 1,
            message: message.into(),
            data: None,
            error: None,
            meta: Meta::default(),
        }
    }

    pub fn error(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Error,
            status: Status::Error,
            code,
            exit_code: 1,
            message: message.into(),
            data: None,
            error: None,
            meta: Meta::default(),
        }
    }

    /// Error envelope for a pipeline failure, carrying its suggestion.
    pub fn from_error(err: &SymdocError) -> Self {
        let envelope = Self::error(ResultCode::from(err), err.to_string());
        match err.suggestion() {
            Some(hint) => envelope.with_error_details(ErrorDetails {
                suggestions: vec![hint.to_string()],
            }),
            None => envelope,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.meta.entity_type = Some(entity_type);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.meta.count = Some(count);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.meta.query = Some(query.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.meta.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_error_details(mut self, details: ErrorDetails) -> Self {
        self.error = Some(details);
        self
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}
