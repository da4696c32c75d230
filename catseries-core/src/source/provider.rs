//! Source provider trait and fetch error types.
//!
//! The SourceProvider trait abstracts over where the three raw arrays come from
//! (HTTP endpoints, local JSON files, test doubles). Providers return untyped
//! JSON items; typing happens in the adapters.

use crate::domain::SourceId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Structured error types for source retrieval.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {location}")]
    HttpStatus { status: u16, location: String },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("I/O error reading {location}: {message}")]
    Io { location: String, message: String },
}

/// The three raw arrays, one per source. Only built when all three arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPayloads {
    pub a: Vec<Value>,
    pub b: Vec<Value>,
    pub c: Vec<Value>,
}

impl RawPayloads {
    pub fn get(&self, source: SourceId) -> &[Value] {
        match source {
            SourceId::A => &self.a,
            SourceId::B => &self.b,
            SourceId::C => &self.c,
        }
    }

    /// Total item count across the three sources.
    pub fn len(&self) -> usize {
        self.a.len() + self.b.len() + self.c.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for raw-array providers.
///
/// Implementations handle one retrieval per call and never retry; a failure
/// is terminal for the run.
pub trait SourceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the raw array of one source.
    fn fetch(&self, source: SourceId) -> Result<Vec<Value>, FetchError>;
}

/// Interpret a decoded JSON document as a raw array.
pub(crate) fn expect_array(location: &str, doc: Value) -> Result<Vec<Value>, FetchError> {
    match doc {
        Value::Array(items) => Ok(items),
        other => Err(FetchError::ResponseFormat(format!(
            "{location}: expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
