//! Fixed-size report layout shared by all telemetry frames.
//!
//! Report format:
//! - TYPE (1 byte): report type identifier
//! - B1..B3 (3 bytes): type-specific header fields
//! - TIMESTAMP_US (4 bytes): microsecond timestamp, little-endian
//! - SCAN_ID (4 bytes): scan sequence number, little-endian
//! - PAYLOAD (20 bytes): type-specific data, zero-filled when unused

/// Size of every report on the wire
pub const REPORT_SIZE: usize = 32;

/// Bytes occupied by the common header
pub const HEADER_SIZE: usize = 12;

/// Bytes available after the header
pub const MAX_BITMAP_PAYLOAD: usize = REPORT_SIZE - HEADER_SIZE;

/// Offset of the timestamp field
pub const TIMESTAMP_OFFSET: usize = 4;

/// Offset of the scan id field
pub const SCAN_ID_OFFSET: usize = 8;

/// One raw report as handed to the transport
pub type Report = [u8; REPORT_SIZE];

// Report type IDs: device → host
pub const REPORT_EDGE: u8 = 0x50;
pub const REPORT_SCAN_SUMMARY: u8 = 0x51;
pub const REPORT_METRICS_DUMP: u8 = 0x52;

/// Errors that can occur while decoding a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Fewer bytes than the report type requires
    Truncated,
    /// Type byte does not name a known report
    UnknownType(u8),
    /// A header field holds a value outside its encoding
    InvalidField,
}

/// Telemetry report types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ReportType {
    /// Single key transition
    Edge = REPORT_EDGE,
    /// Decimated matrix snapshot
    ScanSummary = REPORT_SCAN_SUMMARY,
    /// Aggregate statistics (reserved, never emitted)
    MetricsDump = REPORT_METRICS_DUMP,
}

impl ReportType {
    /// Parse a report type from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            REPORT_EDGE => Some(ReportType::Edge),
            REPORT_SCAN_SUMMARY => Some(ReportType::ScanSummary),
            REPORT_METRICS_DUMP => Some(ReportType::MetricsDump),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Write `value` little-endian into `buf[offset..offset + 4]`
pub fn put_u32_le(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Read a little-endian `u32` from `buf[offset..offset + 4]`
pub fn get_u32_le(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

/// Start a zeroed report with the type byte, the three header bytes and the
/// timestamp/scan-id pair filled in.
pub(crate) fn header(
    report_type: ReportType,
    fields: [u8; 3],
    timestamp_us: u32,
    scan_id: u32,
) -> Report {
    let mut report = [0u8; REPORT_SIZE];
    report[0] = report_type.to_byte();
    report[1..4].copy_from_slice(&fields);
    put_u32_le(&mut report, TIMESTAMP_OFFSET, timestamp_us);
    put_u32_le(&mut report, SCAN_ID_OFFSET, scan_id);
    report
}
