//! Cortex-M bindings for keydiag
//!
//! Implements the keydiag-hal traits on top of the Cortex-M core
//! peripherals and embassy-sync primitives:
//!
//! - [`DwtCycleCounter`] - DWT `CYCCNT` as the diagnostic clock source
//! - [`ChannelSink`] - Queues reports for an async transport task
//! - [`SharedDiagnostics`] - Shares one core between the scan loop and the
//!   host command handler
//!
//! Needs an ARMv7-M or ARMv8-M Mainline core (Cortex-M3 and up). ARMv6-M
//! parts such as the Cortex-M0/M0+ have no DWT cycle counter, and
//! [`DwtCycleCounter`] does not build for `thumbv6m` targets.
//!
//! EEPROM access stays with the board firmware, which implements
//! [`keydiag_hal::ByteStore`] over whatever emulation its chip uses.

#![no_std]
#![deny(unsafe_code)]

pub mod channel;
pub mod dwt;
pub mod shared;

pub use channel::{ChannelSink, ReportChannel, REPORT_QUEUE_DEPTH};
pub use dwt::DwtCycleCounter;
pub use shared::SharedDiagnostics;
