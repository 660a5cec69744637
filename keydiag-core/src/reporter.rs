//! Telemetry report emission
//!
//! Turns edge and scan notifications into protocol reports and hands each
//! one to the [`ReportSink`] as a single complete report.

use keydiag_hal::ReportSink;
use keydiag_protocol::{EdgeEvent, EdgeKind, EdgePhase, MatrixGeometry, ScanSummary};

/// Report encoder bound to an outbound transport
#[derive(Debug)]
pub struct Reporter<R> {
    sink: R,
    geometry: MatrixGeometry,
}

impl<R: ReportSink> Reporter<R> {
    pub fn new(sink: R, geometry: MatrixGeometry) -> Self {
        Self { sink, geometry }
    }

    pub fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    /// Emit one edge report
    pub fn send_edge(
        &mut self,
        key: u8,
        phase: EdgePhase,
        kind: EdgeKind,
        timestamp_us: u32,
        scan_id: u32,
    ) {
        let event = EdgeEvent {
            key,
            phase,
            kind,
            timestamp_us,
            scan_id,
        };
        self.sink.send(&event.encode());
    }

    /// Emit one scan summary report
    ///
    /// Only the first 20 bitmap bytes fit; the rest are dropped.
    pub fn send_scan_summary(&mut self, bitmap: &[u8], timestamp_us: u32, scan_id: u32) {
        let summary = ScanSummary::new(self.geometry, timestamp_us, scan_id, bitmap);
        self.sink.send(&summary.encode());
    }

    /// Aggregate statistics report
    ///
    /// The payload layout is not defined yet, so nothing is sent.
    pub fn send_metrics_dump(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("metrics dump requested, no payload defined");
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    pub fn into_sink(self) -> R {
        self.sink
    }
}
