//! Polling loop and its cancellation handle

mod halt;
mod polling_loop;

pub use halt::HaltHandle;
pub use polling_loop::{LoopState, PollStats, PollingLoop};
