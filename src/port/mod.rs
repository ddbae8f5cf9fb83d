//! Trait seams between the core and its collaborators.
//!
//! - [`scorer`] - pluggable similarity scoring for the matcher
//! - [`source`] - per-platform listing retrieval

pub mod scorer;
pub mod source;

pub use scorer::SimilarityScorer;
pub use source::ListingSource;
