//! Supported-platform catalog and link-to-platform matching

pub mod matcher;
pub mod platform;
