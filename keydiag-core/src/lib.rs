//! Board-agnostic keyboard matrix diagnostics
//!
//! This crate contains the diagnostic logic that does not depend on a
//! specific controller:
//!
//! - Microsecond clock over a free-running cycle counter
//! - Per-key configuration and counters
//! - Lifecycle hooks called by the matrix scanner
//! - Telemetry report emission with scan decimation
//! - Host command dispatch
//! - Persistent layout of per-key configuration
//!
//! Everything is reached through one owned [`Diagnostics`] value that the
//! firmware constructs at startup and passes to the scan loop and the host
//! link.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod command;
pub mod config;
pub mod diag;
pub mod persist;
pub mod reporter;
pub mod state;

#[cfg(test)]
mod test_support;

pub use clock::MicrosClock;
pub use config::DiagConfig;
pub use diag::Diagnostics;
pub use persist::ConfigCodec;
pub use reporter::Reporter;
pub use state::{DiagCounters, DiagState, DEFAULT_DEBOUNCE_MS};

pub use keydiag_protocol::{Command, KEY_COUNT};
