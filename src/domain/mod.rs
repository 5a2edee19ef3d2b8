pub mod error;
pub mod event;
pub mod fetch;

pub use error::*;
pub use event::*;
pub use fetch::*;
