// ABOUTME: Library root for deployctl - deployment lifecycle control.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod store;
pub mod types;
