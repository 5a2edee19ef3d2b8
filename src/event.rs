use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::{InputMode, Overlay, View};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

/// Forwards terminal key presses and periodic ticks to the UI loop.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    event = reader.next() => {
                        match event {
                            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                                if tx.send(AppEvent::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) => {}
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Map a key event to an action based on current app state
pub fn key_to_action(
    key: KeyEvent,
    view: &View,
    input_mode: &InputMode,
    overlay: &Overlay,
    input_buffer: &str,
) -> Option<Action> {
    if let Overlay::Help = overlay {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Search => {
            return match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Action::Quit)
                }
                KeyCode::Esc => Some(Action::CancelSearch),
                KeyCode::Enter => Some(Action::SubmitSearch),
                KeyCode::Backspace => {
                    let mut buf = input_buffer.to_string();
                    buf.pop();
                    Some(Action::UpdateSearch(buf))
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    let mut buf = input_buffer.to_string();
                    buf.push(c);
                    Some(Action::UpdateSearch(buf))
                }
                _ => None,
            };
        }
        InputMode::PendingG => {
            return match key.code {
                KeyCode::Char('g') => Some(Action::NavigateTop),
                _ => Some(Action::Back), // Cancel the pending chord
            };
        }
        InputMode::Normal => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('d') => Some(Action::PageDown),
            KeyCode::Char('u') => Some(Action::PageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('/') if *view == View::EventList => Some(Action::OpenSearch),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::NavigateDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::NavigateUp),
        KeyCode::Char('g') => Some(Action::EnterPendingG),
        KeyCode::Char('G') => Some(Action::NavigateBottom),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Enter if *view == View::EventList => Some(Action::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        _ => None,
    }
}
