//! Command implementations for the `digicam` binary.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial module structure

pub mod settings;
pub mod shooting;
