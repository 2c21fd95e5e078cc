//! Logging abstractions for runtime-agnostic logging

mod traits;
mod noop;
mod console;
mod deferred;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use deferred::{DeferredLogger, LogLevel, LogRecord};
