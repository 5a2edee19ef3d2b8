mod parse;
#[cfg(test)]
pub(crate) mod testing;
mod traits;

pub use parse::ParseTransport;
pub use traits::*;
