use std::sync::Arc;

use serde_json::Value;

use crate::client::{ClientError, CloudFunctionTransport, Payload};
use crate::domain::{FetchError, FetchResult, HistoricalEvent};

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const EVENTS_FUNCTION: &str = "hello";

/// Fetches the event list from the backend cloud function.
///
/// One `fetch` issues at most `max_retries + 1` sequential calls. Retries
/// are immediate: there is no backoff between attempts. The source keeps no
/// state between fetches, so concurrent fetches run fully independently.
pub struct RemoteEventSource {
    transport: Arc<dyn CloudFunctionTransport>,
    function: String,
}

impl RemoteEventSource {
    pub fn new(transport: Arc<dyn CloudFunctionTransport>) -> Self {
        Self {
            transport,
            function: EVENTS_FUNCTION.to_string(),
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    pub async fn fetch(&self, max_retries: u32) -> FetchResult {
        let params = Payload::new();
        let mut attempt: u32 = 0;
        let mut last_error: Option<ClientError> = None;

        loop {
            match self.transport.invoke(&self.function, &params).await {
                Ok(Some(payload)) => {
                    let result = events_from_payload(&payload);
                    match &result {
                        Ok(events) => tracing::info!(
                            "Fetched {} events on attempt {}",
                            events.len(),
                            attempt + 1
                        ),
                        Err(e) => tracing::error!("Discarding response: {}", e),
                    }
                    return result;
                }
                Ok(None) => {
                    tracing::debug!("Call to {} returned no payload", self.function);
                }
                Err(e) => {
                    tracing::debug!("Call to {} failed: {}", self.function, e);
                    last_error = Some(e);
                }
            }

            if attempt >= max_retries {
                let attempts = attempt + 1;
                tracing::error!("Giving up on {} after {} attempts", self.function, attempts);
                return Err(match last_error {
                    Some(e) => FetchError::Transport(e),
                    None => FetchError::RetriesExhausted { attempts },
                });
            }

            attempt += 1;
            tracing::warn!(
                "Attempt {} of {} failed, retrying",
                attempt,
                max_retries + 1
            );
        }
    }
}

/// Maps the `data` array of a payload into events. A missing or non-array
/// `data` is an empty list. Any record that is not an object fails the whole
/// batch.
pub fn events_from_payload(payload: &Payload) -> FetchResult {
    let Some(Value::Array(records)) = payload.get("data") else {
        return Ok(vec![]);
    };

    records
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(record) => Ok(HistoricalEvent::from_record(record)),
            other => Err(FetchError::Mapping {
                index,
                reason: format!("expected an object, found {}", json_kind(other)),
            }),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
