//! Application services.
//!
//! - [`matcher`] - pairs listings that describe the same proposition
//! - [`evaluator`] - prices the hedges of each match
//! - [`scan`] - fetches sources and runs both over one cycle

pub mod evaluator;
pub mod matcher;
pub mod scan;

pub use evaluator::{ArbitrageEvaluator, EvaluatorConfig};
pub use matcher::{match_platform_pair, CrossPlatformMatcher, MatchLedger, MatcherConfig};
pub use scan::{ScanConfig, Scanner};
