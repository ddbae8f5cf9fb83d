//! Question text canonicalization.
//!
//! - [`normalize`] - lower-case, strip punctuation, drop stop words
//! - [`keywords`] - significant terms of a question, built on [`normalize`]

mod keywords;
mod normalize;

pub use keywords::{keywords, stem, KeywordSet, MIN_KEYWORD_LEN};
pub use normalize::{normalize, STOP_WORDS};
