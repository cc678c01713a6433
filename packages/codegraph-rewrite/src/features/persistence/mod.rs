//! Persistence Feature
//!
//! Writes the rewritten text back to the document store.
//!
//! ## Structure
//! - `ports/` - DocumentSink trait
//! - `infrastructure/` - FileSystemSink (tokio::fs)

pub mod infrastructure;
pub mod ports;

pub use infrastructure::FileSystemSink;
pub use ports::{DocumentSink, SinkError};
