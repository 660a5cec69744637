//! Report queue between the diagnostics and the transport task
//!
//! The scan loop must never wait on the host, so reports are pushed with
//! `try_send` and dropped when the queue is full. The transport task drains
//! the same channel with `receive().await` and writes each report to the
//! raw HID endpoint.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use keydiag_hal::ReportSink;
use keydiag_protocol::Report;

/// Default queue depth, enough for a burst of edges within one scan
pub const REPORT_QUEUE_DEPTH: usize = 16;

/// Outbound report queue
pub type ReportChannel<const N: usize = REPORT_QUEUE_DEPTH> =
    Channel<CriticalSectionRawMutex, Report, N>;

/// [`ReportSink`] that enqueues into a [`ReportChannel`]
pub struct ChannelSink<'a, const N: usize = REPORT_QUEUE_DEPTH> {
    channel: &'a ReportChannel<N>,
    dropped: u32,
}

impl<'a, const N: usize> ChannelSink<'a, N> {
    pub fn new(channel: &'a ReportChannel<N>) -> Self {
        Self {
            channel,
            dropped: 0,
        }
    }

    /// Reports discarded because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> ReportSink for ChannelSink<'_, N> {
    fn send(&mut self, report: &Report) {
        if self.channel.try_send(*report).is_err() {
            self.dropped = self.dropped.wrapping_add(1);

            #[cfg(feature = "defmt")]
            defmt::warn!(
                "report queue full, dropped type {=u8:#x} ({=u32} total)",
                report[0],
                self.dropped
            );
        }
    }
}
