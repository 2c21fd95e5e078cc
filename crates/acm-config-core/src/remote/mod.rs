//! Remote config store client abstraction
//!
//! The wire protocol lives outside this crate; implement [`RemoteConfigClient`]
//! over it. [`MemoryConfigClient`] serves documents from memory.

mod error;
mod traits;
mod memory;

pub use error::{RemoteError, RemoteResult};
pub use traits::RemoteConfigClient;
pub use memory::MemoryConfigClient;
