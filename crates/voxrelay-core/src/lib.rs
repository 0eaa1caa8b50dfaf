//! Shared building blocks for the voxrelay services
//!
//! Holds the pieces every service process needs without pulling in axum or
//! an HTTP client: the startup capability handle, the error-to-HTTP contract,
//! and the static language tables.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod capability;
mod error;
pub mod language;

pub use capability::{Availability, Capability, CapabilityKind, CapabilityState};
pub use error::{ErrorBody, HttpError};

/// Identifier of the current process
///
/// Included in backend responses so operators can spot silent restarts.
pub fn pid() -> u32 {
    std::process::id()
}
