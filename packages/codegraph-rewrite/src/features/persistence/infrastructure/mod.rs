mod file_system_sink;

pub use file_system_sink::FileSystemSink;
