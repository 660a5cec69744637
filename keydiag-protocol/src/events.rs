//! Telemetry reports sent from the controller to the host

use heapless::Vec;

use crate::frame::{
    get_u32_le, header, FrameError, Report, ReportType, HEADER_SIZE, MAX_BITMAP_PAYLOAD,
    SCAN_ID_OFFSET, TIMESTAMP_OFFSET,
};
use crate::matrix::MatrixGeometry;

/// Where in the debounce pipeline an edge was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgePhase {
    /// Raw transition, before the debounce window
    Raw,
    /// Transition confirmed by the debouncer
    Confirmed,
}

// Wire format values
const PHASE_RAW: u8 = 1;
const PHASE_CONFIRMED: u8 = 2;

impl EdgePhase {
    /// Parse a phase from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            PHASE_RAW => Some(EdgePhase::Raw),
            PHASE_CONFIRMED => Some(EdgePhase::Confirmed),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            EdgePhase::Raw => PHASE_RAW,
            EdgePhase::Confirmed => PHASE_CONFIRMED,
        }
    }
}

/// Direction of a key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    Release,
    Press,
}

const KIND_RELEASE: u8 = 0;
const KIND_PRESS: u8 = 1;

impl EdgeKind {
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            EdgeKind::Press
        } else {
            EdgeKind::Release
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            KIND_RELEASE => Some(EdgeKind::Release),
            KIND_PRESS => Some(EdgeKind::Press),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            EdgeKind::Release => KIND_RELEASE,
            EdgeKind::Press => KIND_PRESS,
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, EdgeKind::Press)
    }
}

/// A single key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeEvent {
    /// Key index (0-based)
    pub key: u8,
    pub phase: EdgePhase,
    pub kind: EdgeKind,
    /// Microsecond timestamp from the controller clock
    pub timestamp_us: u32,
    /// Scan sequence number the edge was detected in
    pub scan_id: u32,
}

impl EdgeEvent {
    /// Encode into a report
    ///
    /// Payload bytes after the header are left zero.
    pub fn encode(&self) -> Report {
        header(
            ReportType::Edge,
            [self.key, self.phase.to_byte(), self.kind.to_byte()],
            self.timestamp_us,
            self.scan_id,
        )
    }

    fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FrameError::Truncated);
        }
        let phase = EdgePhase::from_byte(bytes[2]).ok_or(FrameError::InvalidField)?;
        let kind = EdgeKind::from_byte(bytes[3]).ok_or(FrameError::InvalidField)?;

        Ok(Self {
            key: bytes[1],
            phase,
            kind,
            timestamp_us: get_u32_le(bytes, TIMESTAMP_OFFSET),
            scan_id: get_u32_le(bytes, SCAN_ID_OFFSET),
        })
    }
}

/// A decimated snapshot of the key matrix
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanSummary {
    pub rows: u8,
    pub cols: u8,
    /// Bytes per row in `bitmap`
    pub stride: u8,
    pub timestamp_us: u32,
    pub scan_id: u32,
    /// Row-major bitmap, truncated to the report payload
    pub bitmap: Vec<u8, MAX_BITMAP_PAYLOAD>,
}

impl ScanSummary {
    /// Build a summary from a raw scan bitmap
    ///
    /// At most `min(geometry.bitmap_len(), MAX_BITMAP_PAYLOAD)` bytes are
    /// copied. Anything past the report payload is dropped; that is the
    /// capacity of a single report, not an error.
    pub fn new(geometry: MatrixGeometry, timestamp_us: u32, scan_id: u32, bitmap: &[u8]) -> Self {
        let len = geometry
            .bitmap_len()
            .min(MAX_BITMAP_PAYLOAD)
            .min(bitmap.len());

        let mut payload = Vec::new();
        // Cannot fail: len <= MAX_BITMAP_PAYLOAD
        let _ = payload.extend_from_slice(&bitmap[..len]);

        Self {
            rows: geometry.rows,
            cols: geometry.cols,
            stride: geometry.stride(),
            timestamp_us,
            scan_id,
            bitmap: payload,
        }
    }

    pub fn geometry(&self) -> MatrixGeometry {
        MatrixGeometry::new(self.rows, self.cols)
    }

    /// Check whether the key at `row`/`col` was down in this snapshot
    pub fn is_key_down(&self, row: u8, col: u8) -> bool {
        self.geometry().is_key_down(&self.bitmap, row, col)
    }

    /// Encode into a report
    pub fn encode(&self) -> Report {
        let mut report = header(
            ReportType::ScanSummary,
            [self.rows, self.cols, self.stride],
            self.timestamp_us,
            self.scan_id,
        );
        report[HEADER_SIZE..HEADER_SIZE + self.bitmap.len()].copy_from_slice(&self.bitmap);
        report
    }

    fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FrameError::Truncated);
        }
        let (rows, cols, stride) = (bytes[1], bytes[2], bytes[3]);
        let len = (rows as usize * stride as usize).min(MAX_BITMAP_PAYLOAD);
        if bytes.len() < HEADER_SIZE + len {
            return Err(FrameError::Truncated);
        }

        let mut bitmap = Vec::new();
        bitmap
            .extend_from_slice(&bytes[HEADER_SIZE..HEADER_SIZE + len])
            .map_err(|_| FrameError::Truncated)?;

        Ok(Self {
            rows,
            cols,
            stride,
            timestamp_us: get_u32_le(bytes, TIMESTAMP_OFFSET),
            scan_id: get_u32_le(bytes, SCAN_ID_OFFSET),
            bitmap,
        })
    }
}

/// Any report the controller can send
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Telemetry {
    Edge(EdgeEvent),
    ScanSummary(ScanSummary),
    /// Reserved; the payload layout is not defined yet
    MetricsDump,
}

impl Telemetry {
    /// Parse a report received by the host
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        let type_byte = *bytes.first().ok_or(FrameError::Truncated)?;
        match ReportType::from_byte(type_byte) {
            Some(ReportType::Edge) => EdgeEvent::decode(bytes).map(Telemetry::Edge),
            Some(ReportType::ScanSummary) => {
                ScanSummary::decode(bytes).map(Telemetry::ScanSummary)
            }
            Some(ReportType::MetricsDump) => Ok(Telemetry::MetricsDump),
            None => Err(FrameError::UnknownType(type_byte)),
        }
    }

    pub fn report_type(&self) -> ReportType {
        match self {
            Telemetry::Edge(_) => ReportType::Edge,
            Telemetry::ScanSummary(_) => ReportType::ScanSummary,
            Telemetry::MetricsDump => ReportType::MetricsDump,
        }
    }
}
