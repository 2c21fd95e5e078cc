//! Process-wide state the bootstrap reads overrides from and publishes into

mod traits;
mod memory;
mod system;

pub use traits::ProcessEnvironment;
pub use memory::MemoryProcessEnvironment;
pub use system::{clear_system_property, get_system_property, set_system_property, SystemProcessEnvironment};
