//! Game result feed handling.
//!
//! This module provides:
//! - Player records and derived statistics (`PlayerResult`)
//! - The line-oriented feed parser (`parse_result_feed`)
//! - HTTP access to the result server (`ResultClient`)
//! - Tie-aware rankings and the spoken summary (`build_summary`)

pub mod fetch;
pub mod parser;
pub mod player;
pub mod summary;

pub use fetch::ResultClient;
pub use parser::{parse_result_feed, ResultParser};
pub use player::{PlayerResult, Team};
pub use summary::{build_summary, max_elements};
