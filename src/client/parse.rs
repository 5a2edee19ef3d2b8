use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{ClientError, ClientResult, CloudFunctionTransport, Payload};

const APP_ID_HEADER: &str = "X-Parse-Application-Id";
const CLIENT_KEY_HEADER: &str = "X-Parse-Client-Key";

#[derive(Debug, Deserialize)]
struct FunctionResponse {
    #[serde(default)]
    result: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    error: String,
}

/// Calls cloud functions on a Parse-compatible server over its REST API.
pub struct ParseTransport {
    http: Client,
    server_url: String,
    app_id: String,
    client_key: Option<String>,
}

impl ParseTransport {
    pub fn new(
        server_url: &str,
        app_id: String,
        client_key: Option<String>,
    ) -> ClientResult<Self> {
        let server_url = server_url.trim().trim_end_matches('/').to_string();
        if server_url.is_empty() {
            return Err(ClientError::ConfigError("server url is empty".to_string()));
        }

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::ConfigError(format!("failed to build http client: {}", e)))?;

        tracing::info!("Using Parse server at {}", server_url);

        Ok(Self {
            http,
            server_url,
            app_id,
            client_key,
        })
    }

    fn function_url(&self, name: &str) -> String {
        format!("{}/functions/{}", self.server_url, name)
    }
}

#[async_trait]
impl CloudFunctionTransport for ParseTransport {
    async fn invoke(&self, name: &str, params: &Payload) -> ClientResult<Option<Payload>> {
        let url = self.function_url(name);

        let mut request = self
            .http
            .post(&url)
            .header(APP_ID_HEADER, &self.app_id)
            .json(params);
        if let Some(ref key) = self.client_key {
            request = request.header(CLIENT_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            ClientError::ConnectionError(format!("failed to call {}: {}", name, e))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::ConnectionError(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => ClientError::Remote {
                    code: err.code,
                    message: err.error,
                },
                Err(_) => ClientError::Remote {
                    code: None,
                    message: format!("server returned {}", status),
                },
            });
        }

        let parsed: FunctionResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("invalid function response: {}", e)))?;

        match parsed.result {
            Some(Value::Object(payload)) => Ok(Some(payload)),
            other => {
                tracing::debug!("Function {} returned no object payload: {:?}", name, other);
                Ok(None)
            }
        }
    }
}
