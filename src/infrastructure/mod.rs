//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! matching or pricing logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation, and logging setup

pub mod config;
