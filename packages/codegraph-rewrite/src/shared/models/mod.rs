//! Shared models

mod error;
mod span;

pub use error::{ErrorKind, Result, RewriteError};
pub use span::Span;
