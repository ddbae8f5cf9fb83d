//! Port implementations.
//!
//! - [`scorer`] - keyword-overlap and fuzzy similarity scorers
//! - [`source`] - in-memory and JSON-file listing sources

pub mod scorer;
pub mod source;
