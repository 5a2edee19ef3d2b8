use std::time::{Duration, Instant};

use ratatui::widgets::TableState;

use crate::action::Action;
use crate::domain::HistoricalEvent;
use crate::state::EventListState;

const ERROR_TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    EventList,
    EventDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    PendingG,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchEvents,
    Quit,
}

pub struct App {
    // View state
    pub view: View,
    pub input_mode: InputMode,
    pub overlay: Overlay,

    // Event data
    pub events: EventListState,
    pub table_state: TableState,
    pub selected_event: Option<HistoricalEvent>,
    pub fetches_in_flight: usize,

    // Detail scroll
    pub detail_scroll: u16,

    // Input
    pub input_buffer: String,

    // App
    pub should_quit: bool,
    pub last_error: Option<(String, Instant)>,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: View::EventList,
            input_mode: InputMode::Normal,
            overlay: Overlay::None,

            events: EventListState::new(),
            table_state: TableState::default(),
            selected_event: None,
            fetches_in_flight: 0,

            detail_scroll: 0,

            input_buffer: String::new(),

            should_quit: false,
            last_error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fetches_in_flight > 0
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        // Clear stale error toasts
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > ERROR_TOAST_TTL {
                self.last_error = None;
            }
        }

        match action {
            // Navigation
            Action::NavigateUp => {
                if self.is_detail_view() {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                } else {
                    self.navigate_up();
                }
                vec![]
            }
            Action::NavigateDown => {
                if self.is_detail_view() {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                } else {
                    self.navigate_down();
                }
                vec![]
            }
            Action::NavigateTop => {
                self.input_mode = InputMode::Normal;
                if self.is_detail_view() {
                    self.detail_scroll = 0;
                } else {
                    self.navigate_top();
                }
                vec![]
            }
            Action::NavigateBottom => {
                if self.is_detail_view() {
                    self.detail_scroll = u16::MAX;
                } else {
                    self.navigate_bottom();
                }
                vec![]
            }
            Action::PageUp => {
                if self.is_detail_view() {
                    self.detail_scroll =
                        self.detail_scroll.saturating_sub(self.page_height() as u16);
                } else {
                    for _ in 0..self.page_height() {
                        self.navigate_up();
                    }
                }
                vec![]
            }
            Action::PageDown => {
                if self.is_detail_view() {
                    self.detail_scroll =
                        self.detail_scroll.saturating_add(self.page_height() as u16);
                } else {
                    for _ in 0..self.page_height() {
                        self.navigate_down();
                    }
                }
                vec![]
            }
            Action::Select => {
                if self.view == View::EventList {
                    if let Some(event) = self.selected_visible_event().cloned() {
                        self.selected_event = Some(event);
                        self.view = View::EventDetail;
                        self.detail_scroll = 0;
                    }
                }
                vec![]
            }
            Action::Back => {
                if self.input_mode == InputMode::PendingG {
                    self.input_mode = InputMode::Normal;
                } else if self.overlay != Overlay::None {
                    self.overlay = Overlay::None;
                } else if self.view == View::EventDetail {
                    self.view = View::EventList;
                    self.selected_event = None;
                } else if !self.events.filter_query().is_empty() {
                    self.apply_filter(String::new());
                }
                vec![]
            }

            // Vim chord
            Action::EnterPendingG => {
                self.input_mode = InputMode::PendingG;
                vec![]
            }

            // Search
            Action::OpenSearch => {
                if self.view == View::EventList {
                    self.input_mode = InputMode::Search;
                    self.input_buffer = self.events.filter_query().to_string();
                }
                vec![]
            }
            Action::UpdateSearch(query) => {
                self.input_buffer = query.clone();
                self.apply_filter(query);
                vec![]
            }
            Action::SubmitSearch => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                vec![]
            }
            Action::CancelSearch => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.apply_filter(String::new());
                vec![]
            }

            // UI
            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }

            // Data responses
            Action::EventsLoaded(events) => {
                self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
                self.events.on_fetch_completed(Ok(events));
                self.clamp_selection();
                vec![]
            }
            Action::FetchFailed(error) => {
                self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
                self.events.on_fetch_completed(Err(error));
                if let Some(msg) = self.events.last_error() {
                    self.last_error = Some((msg.to_string(), Instant::now()));
                }
                vec![]
            }

            // App control
            Action::Refresh => {
                self.fetches_in_flight += 1;
                vec![Effect::FetchEvents]
            }
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Action::Tick => vec![],
        }
    }

    pub fn selected_visible_event(&self) -> Option<&HistoricalEvent> {
        let idx = self.table_state.selected()?;
        self.events.visible_events().get(idx)
    }

    fn apply_filter(&mut self, query: String) {
        self.events.set_filter(query);
        self.clamp_selection();
    }

    /// Keeps the table cursor inside the visible list after it changes.
    fn clamp_selection(&mut self) {
        let len = self.events.visible_events().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        match self.table_state.selected() {
            Some(idx) if idx < len => {}
            Some(_) => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
        }
    }

    fn navigate_up(&mut self) {
        if self.events.visible_events().is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn navigate_down(&mut self) {
        let len = self.events.visible_events().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn navigate_top(&mut self) {
        if !self.events.visible_events().is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn navigate_bottom(&mut self) {
        let len = self.events.visible_events().len();
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }

    fn is_detail_view(&self) -> bool {
        self.view == View::EventDetail
    }

    fn page_height(&self) -> usize {
        20 // approximate; could be made dynamic
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
