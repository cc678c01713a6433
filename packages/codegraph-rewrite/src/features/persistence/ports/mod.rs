mod document_sink;

pub use document_sink::{DocumentSink, SinkError};
