//! Consumers of published battery status

mod log_sink;
mod percentage_file;
mod watch_sink;

pub use log_sink::{format_status_line, LogSink};
pub use percentage_file::PercentageFile;
pub use watch_sink::{DisplayState, WatchSink};
