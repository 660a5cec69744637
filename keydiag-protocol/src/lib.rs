//! Keyboard Matrix Diagnostic Protocol
//!
//! This crate defines the raw HID report protocol between the keyboard
//! controller and a host-side diagnostic tool. Both directions use fixed
//! 32-byte reports.
//!
//! # Protocol Overview
//!
//! Device → host telemetry reports share a 12-byte header:
//! ```text
//! ┌──────┬──────┬──────┬──────┬──────────────┬──────────┬──────────────┐
//! │ TYPE │  B1  │  B2  │  B3  │ TIMESTAMP_US │ SCAN_ID  │ PAYLOAD      │
//! │ 1B   │ 1B   │ 1B   │ 1B   │ 4B LE        │ 4B LE    │ 0–20B        │
//! └──────┴──────┴──────┴──────┴──────────────┴──────────┴──────────────┘
//! ```
//!
//! Host → device commands carry the command code in byte 0 followed by up
//! to two argument bytes; the rest of the report is ignored.
//!
//! Reports are transient telemetry. There is no sequence number, checksum
//! or retransmission; a lost report is simply lost.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod matrix;
pub mod messages;

pub use events::{EdgeEvent, EdgeKind, EdgePhase, ScanSummary, Telemetry};
pub use frame::{FrameError, Report, ReportType, MAX_BITMAP_PAYLOAD, REPORT_SIZE};
pub use matrix::{MatrixGeometry, BITMAP_STRIDE, KEY_COUNT, MATRIX_COLS, MATRIX_ROWS};
pub use messages::{Command, CommandError};
