//! Host configuration store abstractions
//!
//! - `HostStore`: what the bootstrap needs from the host's property container
//! - `LayeredStore`: ordered named layers, with a `WriteMode` choosing how
//!   the merged result is written back
//! - File loading for local `.yml` / `.properties` layers

mod traits;
mod layered;
mod file;

pub use traits::{HostError, HostResult, HostStore};
pub use layered::{LayeredStore, PropertyLayer, WriteMode};
