use thiserror::Error;

use super::HistoricalEvent;
use crate::client::ClientError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The remote call kept failing until the retry bound was reached.
    #[error(transparent)]
    Transport(#[from] ClientError),
    /// A record had the wrong shape. Never retried.
    #[error("malformed record at index {index}: {reason}")]
    Mapping { index: usize, reason: String },
    /// Every attempt came back empty without a concrete error.
    #[error("unknown error after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

pub type FetchResult = Result<Vec<HistoricalEvent>, FetchError>;
