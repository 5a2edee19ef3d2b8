use crate::domain::{FetchError, HistoricalEvent};

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,
    PageUp,
    PageDown,
    Select,
    Back,

    // Vim chord
    EnterPendingG,

    // Search
    OpenSearch,
    UpdateSearch(String),
    SubmitSearch,
    CancelSearch,

    // UI
    ToggleHelp,

    // Data responses
    EventsLoaded(Vec<HistoricalEvent>),
    FetchFailed(FetchError),

    // App control
    Refresh,
    Quit,
    Tick,
}
