//! envrepo: keeps a development-environment provisioning catalog current
//!
//! For a set of named environment definitions (a JDK, a runtime, a build
//! tool), resolves the best available download URL for every supported
//! (operating system, architecture) platform across several recent
//! versions, verifying each candidate URL before it enters the catalog.

pub mod catalog;
pub mod config;
pub mod html;
pub mod resolver;
pub mod store;
pub mod version;
