use async_trait::async_trait;

use crate::domain::FetchResult;
use crate::source::{RemoteEventSource, DEFAULT_MAX_RETRIES};

/// Fetch contract the domain layer depends on. A cached implementation
/// would slot in here.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn fetch_all(&self) -> FetchResult;
}

pub struct RemoteEventRepository {
    source: RemoteEventSource,
    max_retries: u32,
}

impl RemoteEventRepository {
    pub fn new(source: RemoteEventSource) -> Self {
        Self {
            source,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[async_trait]
impl EventRepository for RemoteEventRepository {
    async fn fetch_all(&self) -> FetchResult {
        self.source.fetch(self.max_retries).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::testing::{data_payload, remote_error, ScriptedTransport};
    use crate::domain::FetchError;

    #[tokio::test]
    async fn uses_default_retry_bound() {
        let script = (0..10).map(|_| Err(remote_error("unavailable"))).collect();
        let transport = Arc::new(ScriptedTransport::new(script));
        let repository = RemoteEventRepository::new(RemoteEventSource::new(transport.clone()));

        let result = repository.fetch_all().await;

        assert_eq!(transport.calls(), DEFAULT_MAX_RETRIES as usize + 1);
        assert_eq!(result, Err(FetchError::Transport(remote_error("unavailable"))));
    }

    #[tokio::test]
    async fn configured_retry_bound_is_honored() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(remote_error("unavailable")),
            Ok(Some(data_payload(&["1848-02-24"]))),
        ]));
        let repository = RemoteEventRepository::new(RemoteEventSource::new(transport.clone()))
            .with_max_retries(1);

        let events = repository.fetch_all().await.unwrap();

        assert_eq!(transport.calls(), 2);
        assert_eq!(events[0].date, "1848-02-24");
    }
}
