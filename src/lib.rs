//! AEIC legacy trajectory workspace.
//!
//! The engine lives in the member crates; this crate re-exports them under one roof for
//! the CLI and the integration tests.

pub use aeic_config as config;
pub use aeic_core as primitives;
pub use aeic_export as export;
pub use aeic_legacy as legacy;
pub use aeic_performance as performance;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
