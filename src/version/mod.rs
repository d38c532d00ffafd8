//! Version ranking and candidate harvesting
//!
//! - [`rank`]: parses raw version strings into ordered comparison keys
//! - [`harvest`]: extracts and groups version candidates from link lists

pub mod harvest;
pub mod rank;
