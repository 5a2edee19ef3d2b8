use tokio::sync::watch;

use crate::domain::{FetchResult, HistoricalEvent};

const UNKNOWN_ERROR: &str = "Unknown error";

/// What observers see after every mutation of [`EventListState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub visible_events: Vec<HistoricalEvent>,
    pub last_error: Option<String>,
    pub filter_query: String,
    pub loaded: bool,
}

/// Latest fetched events, latest error, and the filtered view derived from
/// them.
///
/// Not synchronized: exactly one owner mutates it. Observers subscribe
/// through a watch channel and always see the most recent snapshot.
pub struct EventListState {
    all_events: Option<Vec<HistoricalEvent>>,
    last_error: Option<String>,
    filter_query: String,
    visible_events: Vec<HistoricalEvent>,
    notifier: watch::Sender<StateSnapshot>,
}

impl EventListState {
    pub fn new() -> Self {
        let (notifier, _) = watch::channel(StateSnapshot::default());
        Self {
            all_events: None,
            last_error: None,
            filter_query: String::new(),
            visible_events: vec![],
            notifier,
        }
    }

    /// The new receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.notifier.send_replace(self.snapshot());
        self.notifier.subscribe()
    }

    pub fn all_events(&self) -> Option<&[HistoricalEvent]> {
        self.all_events.as_deref()
    }

    pub fn visible_events(&self) -> &[HistoricalEvent] {
        &self.visible_events
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    pub fn is_loaded(&self) -> bool {
        self.all_events.is_some()
    }

    /// A failure keeps the previous list and view; only the error changes.
    pub fn on_fetch_completed(&mut self, result: FetchResult) {
        match result {
            Ok(events) => {
                self.all_events = Some(events);
                self.last_error = None;
                self.recompute();
            }
            Err(e) => {
                let message = e.to_string();
                self.last_error = Some(if message.trim().is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    message
                });
            }
        }
        self.publish();
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter_query = query.into();
        self.recompute();
        self.publish();
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            visible_events: self.visible_events.clone(),
            last_error: self.last_error.clone(),
            filter_query: self.filter_query.clone(),
            loaded: self.is_loaded(),
        }
    }

    fn recompute(&mut self) {
        self.visible_events = match self.all_events {
            Some(ref events) => filter_by_date(events, &self.filter_query),
            None => vec![],
        };
    }

    /// Snapshots are only built while someone is watching.
    fn publish(&self) {
        if self.notifier.receiver_count() > 0 {
            self.notifier.send_replace(self.snapshot());
        }
    }
}

impl Default for EventListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive substring match on `date`. A blank query keeps every
/// event.
pub fn filter_by_date(events: &[HistoricalEvent], query: &str) -> Vec<HistoricalEvent> {
    if query.trim().is_empty() {
        return events.to_vec();
    }
    let needle = query.to_lowercase();
    events
        .iter()
        .filter(|event| event.date.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::domain::FetchError;

    fn event(date: &str) -> HistoricalEvent {
        HistoricalEvent {
            date: date.to_string(),
            description: format!("event on {}", date),
            category1: "history".to_string(),
            category2: "world".to_string(),
        }
    }

    fn remote(message: &str) -> FetchError {
        FetchError::Transport(ClientError::Remote {
            code: None,
            message: message.to_string(),
        })
    }

    fn loaded(dates: &[&str]) -> EventListState {
        let mut state = EventListState::new();
        state.on_fetch_completed(Ok(dates.iter().map(|d| event(d)).collect()));
        state
    }

    fn visible_dates(state: &EventListState) -> Vec<&str> {
        state.visible_events().iter().map(|e| e.date.as_str()).collect()
    }

    #[test]
    fn starts_empty() {
        let state = EventListState::new();
        assert!(state.all_events().is_none());
        assert!(state.visible_events().is_empty());
        assert!(state.last_error().is_none());
        assert!(!state.is_loaded());
    }

    #[test]
    fn empty_filter_shows_everything_in_order() {
        let mut state = loaded(&["E1", "E2", "E3"]);
        state.set_filter("");
        assert_eq!(visible_dates(&state), vec!["E1", "E2", "E3"]);

        state.set_filter("   ");
        assert_eq!(visible_dates(&state), vec!["E1", "E2", "E3"]);
    }

    #[test]
    fn filter_matches_date_substring_only() {
        let mut state = loaded(&["2024-01-01", "1990-05-05", "2024-12-31"]);

        state.set_filter("2024");
        assert_eq!(visible_dates(&state), vec!["2024-01-01", "2024-12-31"]);

        // Description contains "event on 1990-05-05" but only date is matched.
        state.set_filter("event");
        assert!(state.visible_events().is_empty());
    }

    #[test]
    fn filter_is_case_insensitive() {
        let mut state = loaded(&["March 1815", "june 1815", "1914"]);
        state.set_filter("JUNE");
        assert_eq!(visible_dates(&state), vec!["june 1815"]);
    }

    #[test]
    fn odd_characters_are_just_misses() {
        let mut state = loaded(&["2024-01-01"]);
        state.set_filter("[*.?\\");
        assert!(state.visible_events().is_empty());
        assert!(state.last_error().is_none());
    }

    #[test]
    fn filter_before_first_fetch_is_empty() {
        let mut state = EventListState::new();
        state.set_filter("");
        assert!(state.visible_events().is_empty());
        state.set_filter("2024");
        assert!(state.visible_events().is_empty());
    }

    #[test]
    fn set_filter_is_idempotent() {
        let mut state = loaded(&["2024-01-01", "1990-05-05", "2024-12-31"]);
        state.set_filter("2024");
        let first = state.visible_events().to_vec();
        state.set_filter("2024");
        assert_eq!(state.visible_events(), first.as_slice());
    }

    #[test]
    fn fetch_keeps_active_filter() {
        let mut state = loaded(&["1990-05-05"]);
        state.set_filter("2024");
        assert!(state.visible_events().is_empty());

        state.on_fetch_completed(Ok(vec![event("2024-02-02"), event("1991-01-01")]));

        assert_eq!(state.filter_query(), "2024");
        assert_eq!(visible_dates(&state), vec!["2024-02-02"]);
    }

    #[test]
    fn second_success_replaces_events() {
        let mut state = loaded(&["1990-05-05"]);
        state.on_fetch_completed(Ok(vec![event("2001-09-11")]));
        assert_eq!(state.all_events().unwrap().len(), 1);
        assert_eq!(visible_dates(&state), vec!["2001-09-11"]);
    }

    #[test]
    fn failure_keeps_events_and_records_message() {
        let mut state = loaded(&["2024-01-01", "1990-05-05"]);
        state.set_filter("2024");
        let all_before = state.all_events().unwrap().to_vec();
        let visible_before = state.visible_events().to_vec();

        state.on_fetch_completed(Err(remote("boom")));

        assert_eq!(state.last_error(), Some("boom"));
        assert_eq!(state.all_events().unwrap(), all_before.as_slice());
        assert_eq!(state.visible_events(), visible_before.as_slice());
    }

    #[test]
    fn empty_error_message_falls_back() {
        let mut state = EventListState::new();
        state.on_fetch_completed(Err(remote("")));
        assert_eq!(state.last_error(), Some("Unknown error"));
        assert!(state.all_events().is_none());
    }

    #[test]
    fn success_clears_previous_error() {
        let mut state = EventListState::new();
        state.on_fetch_completed(Err(remote("boom")));
        state.on_fetch_completed(Ok(vec![]));
        assert!(state.last_error().is_none());
        assert!(state.is_loaded());
        assert!(state.visible_events().is_empty());
    }

    #[test]
    fn late_subscriber_starts_at_current_state() {
        let mut state = EventListState::new();
        state.on_fetch_completed(Ok(vec![event("2024-01-01"), event("1990-05-05")]));
        state.set_filter("2024");

        let mut rx = state.subscribe();

        assert!(!rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), state.snapshot());
        assert_eq!(rx.borrow().visible_events, vec![event("2024-01-01")]);

        drop(rx);
        state.set_filter("1990");
        let rx = state.subscribe();
        assert_eq!(rx.borrow().filter_query, "1990");
    }

    #[test]
    fn subscribers_see_latest_snapshot() {
        let mut state = EventListState::new();
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap());

        state.on_fetch_completed(Ok(vec![event("2024-01-01"), event("1990-05-05")]));
        state.set_filter("1990");

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot, state.snapshot());
        assert_eq!(snapshot.visible_events, vec![event("1990-05-05")]);
        assert_eq!(snapshot.filter_query, "1990");
        assert!(snapshot.loaded);

        state.on_fetch_completed(Err(remote("boom")));
        assert_eq!(rx.borrow_and_update().last_error.as_deref(), Some("boom"));
    }
}
