// ABOUTME: Validated domain types.
// ABOUTME: Names are checked once at the boundary and carried typed afterwards.

mod resource_name;

pub use resource_name::{ResourceName, ResourceNameError};
