// ABOUTME: Command module aggregator for the deployctl CLI.
// ABOUTME: Re-exports lifecycle and read-only command handlers.

mod cancel;
mod latest;
mod retry;
mod status;
mod workspace;

pub use cancel::cancel;
pub use latest::latest;
pub use retry::retry;
pub use status::{history, status};
pub use workspace::Workspace;
