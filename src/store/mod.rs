// ABOUTME: Deployment store port and its in-memory and file-backed implementations.
// ABOUTME: The lifecycle operations only ever see the DeploymentClient trait.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{ResourceKind, StoreError, StoreErrorKind};
pub use file::StateFile;
pub use memory::{MemoryStore, Snapshot};
pub use traits::DeploymentClient;
