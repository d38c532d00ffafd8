//! Version resolution engine
//!
//! Given a set of environment specs, resolves the best available download
//! URL per supported platform across recent versions and assembles the
//! resolved repository map.
//!
//! # Modules
//!
//! - [`spec`]: environment definitions and acquisition strategies
//! - [`fetcher`]: HTTP transport seam (GET page bodies, HEAD probes)
//! - [`verify`]: file-type classification and retrying liveness probes
//! - [`assembler`]: orchestration across environments and strategies
//! - [`types`]: the resolved repository output types
//! - [`error`]: fetch and spec-file error types

pub mod assembler;
pub mod error;
pub mod fetcher;
pub mod spec;
pub mod types;
pub mod verify;

pub use assembler::Resolver;
pub use spec::{AcquisitionStrategy, EnvironmentSpec, default_specs, load_specs};
pub use types::{PlatformVersionMap, ResolvedRepository};
pub use verify::RetryPolicy;
