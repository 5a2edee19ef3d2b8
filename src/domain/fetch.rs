use std::sync::Arc;

use super::{FetchResult, HistoricalEvent, UNKNOWN};
use crate::repository::EventRepository;

/// A business rule evaluated against every fetched event. Events rejected by
/// any rule are dropped from the result.
pub trait EventRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn accepts(&self, event: &HistoricalEvent) -> bool;
}

/// Drops events whose date is blank or was never provided.
pub struct RejectUnknownDates;

impl EventRule for RejectUnknownDates {
    fn name(&self) -> &'static str {
        "reject-unknown-dates"
    }

    fn accepts(&self, event: &HistoricalEvent) -> bool {
        let date = event.date.trim();
        !date.is_empty() && date != UNKNOWN
    }
}

pub struct FetchEventsUseCase {
    repository: Arc<dyn EventRepository>,
    rules: Vec<Box<dyn EventRule>>,
}

impl FetchEventsUseCase {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self {
            repository,
            rules: vec![],
        }
    }

    pub fn with_rule(mut self, rule: impl EventRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Errors from the repository are returned untouched.
    pub async fn execute(&self) -> FetchResult {
        let events = self.repository.fetch_all().await?;
        if self.rules.is_empty() {
            return Ok(events);
        }

        let fetched = events.len();
        let kept: Vec<HistoricalEvent> = events
            .into_iter()
            .filter(|event| self.rules.iter().all(|rule| rule.accepts(event)))
            .collect();

        if kept.len() != fetched {
            let rules: Vec<&str> = self.rules.iter().map(|rule| rule.name()).collect();
            tracing::debug!(
                "Dropped {} of {} events (rules: {})",
                fetched - kept.len(),
                fetched,
                rules.join(", ")
            );
        }

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::client::ClientError;
    use crate::domain::FetchError;

    struct FixedRepository(FetchResult);

    #[async_trait]
    impl EventRepository for FixedRepository {
        async fn fetch_all(&self) -> FetchResult {
            self.0.clone()
        }
    }

    fn event(date: &str) -> HistoricalEvent {
        HistoricalEvent {
            date: date.to_string(),
            description: "something happened".to_string(),
            category1: UNKNOWN.to_string(),
            category2: UNKNOWN.to_string(),
        }
    }

    #[tokio::test]
    async fn passes_events_through_without_rules() {
        let events = vec![event("1815-06-18"), event(UNKNOWN)];
        let use_case = FetchEventsUseCase::new(Arc::new(FixedRepository(Ok(events.clone()))));

        assert_eq!(use_case.execute().await, Ok(events));
    }

    #[tokio::test]
    async fn passes_errors_through_unchanged() {
        let error = FetchError::Transport(ClientError::ConnectionError("refused".to_string()));
        let use_case = FetchEventsUseCase::new(Arc::new(FixedRepository(Err(error.clone()))))
            .with_rule(RejectUnknownDates);

        assert_eq!(use_case.execute().await, Err(error));
    }

    #[tokio::test]
    async fn rules_drop_rejected_events_and_keep_order() {
        let events = vec![
            event("1815-06-18"),
            event(UNKNOWN),
            event("  "),
            event("1914-07-28"),
        ];
        let use_case = FetchEventsUseCase::new(Arc::new(FixedRepository(Ok(events))))
            .with_rule(RejectUnknownDates);

        let kept = use_case.execute().await.unwrap();
        let dates: Vec<&str> = kept.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["1815-06-18", "1914-07-28"]);
    }
}
