use std::sync::Arc;

use tokio::sync::mpsc;

use crate::action::Action;
use crate::domain::FetchEventsUseCase;

#[derive(Debug)]
pub enum FetchRequest {
    FetchEvents,
}

#[derive(Clone)]
pub struct FetchHandle {
    tx: mpsc::UnboundedSender<FetchRequest>,
}

impl FetchHandle {
    pub fn send(&self, request: FetchRequest) {
        let _ = self.tx.send(request);
    }
}

/// Runs fetches off the UI loop and reports each outcome as an [`Action`].
///
/// Every request gets its own task. Overlapping fetches are not
/// de-duplicated: each one reports back, so whichever resolves last
/// determines what the list shows.
pub struct FetchWorker {
    use_case: Arc<FetchEventsUseCase>,
    rx: mpsc::UnboundedReceiver<FetchRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl FetchWorker {
    pub fn new(
        use_case: Arc<FetchEventsUseCase>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, FetchHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = FetchHandle { tx };
        let worker = Self {
            use_case,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            if self.action_tx.is_closed() {
                break;
            }
            match request {
                FetchRequest::FetchEvents => {
                    let use_case = self.use_case.clone();
                    let action_tx = self.action_tx.clone();
                    tokio::spawn(async move {
                        let action = match use_case.execute().await {
                            Ok(events) => Action::EventsLoaded(events),
                            Err(e) => {
                                tracing::warn!("Fetch failed: {}", e);
                                Action::FetchFailed(e)
                            }
                        };
                        let _ = action_tx.send(action);
                    });
                }
            }
        }
    }
}
