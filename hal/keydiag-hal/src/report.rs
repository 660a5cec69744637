//! Outbound report transport

pub use keydiag_protocol::Report;

/// Transport for fixed-size telemetry reports
///
/// Each call hands over exactly one complete report. The call must not
/// block for long; if the transport cannot accept the report it decides
/// whether to queue or drop it.
pub trait ReportSink {
    fn send(&mut self, report: &Report);
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn send(&mut self, report: &Report) {
        (**self).send(report)
    }
}
