//! `listcheck-match`: company list matching engine.
//!
//! Pure engine crate: receives pre-loaded records, returns match decisions.
//! No CLI or filesystem dependencies.

pub mod cluster;
pub mod config;
pub mod dnc;
pub mod domain;
pub mod duplicate;
pub mod error;
pub mod fuzzy;
pub mod load;
pub mod model;
pub mod normalize;

pub use config::MatchConfig;
pub use dnc::{run_dnc, DncEvaluator};
pub use duplicate::{detect_duplicates, score_pair};
pub use error::MatchError;
pub use load::{read_table, Table};
pub use model::{MatchResult, MatchType, Record};
