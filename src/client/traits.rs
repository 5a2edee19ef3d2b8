use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    /// Error reported by the backend itself. Displays as the bare message so
    /// it can be shown to the user verbatim.
    #[error("{message}")]
    Remote { code: Option<i64>, message: String },
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("config error: {0}")]
    ConfigError(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Untyped key/value map exchanged with a cloud function.
pub type Payload = Map<String, Value>;

/// A named remote-procedure invocation.
///
/// `Ok(None)` means the call went through but produced no usable payload.
#[async_trait]
pub trait CloudFunctionTransport: Send + Sync {
    async fn invoke(&self, name: &str, params: &Payload) -> ClientResult<Option<Payload>>;
}
