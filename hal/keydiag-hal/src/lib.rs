//! keydiag Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the diagnostic core. Chip
//! specific crates implement them; the core only ever talks to these
//! traits, so the same logic runs on the keyboard and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  keydiag-core (hooks, commands, codec)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keydiag-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keydiag-hal-cortex-m                   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::CycleCounter`] - Free-running CPU cycle counter
//! - [`eeprom::ByteStore`] - Byte-addressed non-volatile storage
//! - [`report::ReportSink`] - Outbound 32-byte report transport

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod eeprom;
pub mod report;

// Re-export key traits at crate root for convenience
pub use clock::CycleCounter;
pub use eeprom::{ByteStore, ERASED_BYTE};
pub use report::ReportSink;
