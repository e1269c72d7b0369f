//! Object storage backends for Arkiva.
//!
//! The `ObjectStore` trait is the boundary the rest of the system talks
//! through. `LocalStore` keeps objects on the filesystem; `MemoryStore`
//! backs tests and ephemeral deployments.

pub mod local;
pub mod memory;
pub mod traits;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use traits::{ObjectStore, StorageError, StorageResult};
