use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ClientError, ClientResult, CloudFunctionTransport, Payload};

/// Transport that replays a fixed script of responses and counts calls.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<ClientResult<Option<Payload>>>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<ClientResult<Option<Payload>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CloudFunctionTransport for ScriptedTransport {
    async fn invoke(&self, name: &str, params: &Payload) -> ClientResult<Option<Payload>> {
        assert_eq!(name, "hello");
        assert!(params.is_empty());
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::ConnectionError("script exhausted".to_string())))
    }
}

pub(crate) fn remote_error(message: &str) -> ClientError {
    ClientError::Remote {
        code: Some(141),
        message: message.to_string(),
    }
}

pub(crate) fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}

pub(crate) fn data_payload(dates: &[&str]) -> Payload {
    let records: Vec<Value> = dates
        .iter()
        .map(|date| {
            json!({
                "date": date,
                "description": format!("event on {}", date),
                "category1": "politics",
                "category2": "europe",
            })
        })
        .collect();
    payload(json!({ "data": records }))
}
