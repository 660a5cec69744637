//! Diagnostics handle and scanner lifecycle hooks
//!
//! The matrix scanner calls into [`Diagnostics`] at three points of each
//! scan: raw edges before debouncing, confirmed edges after debouncing, and
//! scan completion. All hooks do nothing while telemetry is disabled.

use keydiag_hal::{ByteStore, CycleCounter, ReportSink};
use keydiag_protocol::{EdgeKind, EdgePhase};

use crate::clock::MicrosClock;
use crate::config::DiagConfig;
use crate::persist::ConfigCodec;
use crate::reporter::Reporter;
use crate::state::{key_index, DiagState};

/// Diagnostic core
///
/// Owns the state and the three hardware collaborators. Construct it once
/// at startup and hand `&mut` to every caller; if the scanner and the host
/// link run in different contexts, wrap it in a mutex so calls never
/// interleave.
#[derive(Debug)]
pub struct Diagnostics<C, S, R> {
    pub(crate) state: DiagState,
    pub(crate) clock: MicrosClock<C>,
    pub(crate) store: S,
    pub(crate) codec: ConfigCodec,
    pub(crate) reporter: Reporter<R>,
}

impl<C, S, R> Diagnostics<C, S, R>
where
    C: CycleCounter,
    S: ByteStore,
    R: ReportSink,
{
    /// Create the core with power-on state; call [`init`](Self::init)
    /// before the first scan
    pub fn new(config: DiagConfig, counter: C, store: S, sink: R) -> Self {
        Self {
            state: DiagState::new(),
            clock: MicrosClock::new(counter, config.cpu_hz),
            store,
            codec: ConfigCodec::new(config.eeprom_base),
            reporter: Reporter::new(sink, config.geometry),
        }
    }

    /// Reset all state to defaults and restart the clock
    ///
    /// Telemetry is disabled afterwards. Stored configuration is not loaded;
    /// that only happens on a LOAD_EEPROM command.
    pub fn init(&mut self) {
        self.state = DiagState::new();
        self.clock.init();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "diagnostics ready, clock wraps every {=u64} us",
            self.clock.wrap_period_us()
        );
    }

    /// Edge seen by the scanner before debouncing
    pub fn on_pre_debounce_edge(&mut self, key: u8, pressed: bool, timestamp_us: u32, scan_id: u32) {
        if !self.state.is_enabled() || key_index(key).is_none() {
            return;
        }

        self.reporter.send_edge(
            key,
            EdgePhase::Raw,
            EdgeKind::from_pressed(pressed),
            timestamp_us,
            scan_id,
        );
    }

    /// Edge confirmed by the debouncer
    ///
    /// Presses are counted in the per-key actuation counter.
    pub fn on_post_debounce_edge(&mut self, key: u8, pressed: bool, timestamp_us: u32, scan_id: u32) {
        if !self.state.is_enabled() || key_index(key).is_none() {
            return;
        }

        if pressed {
            self.state.record_actuation(key);
        }

        self.reporter.send_edge(
            key,
            EdgePhase::Confirmed,
            EdgeKind::from_pressed(pressed),
            timestamp_us,
            scan_id,
        );
    }

    /// Full matrix scan finished
    ///
    /// Sends a summary of `bitmap` on every `scan_div`-th call.
    pub fn on_scan_complete(&mut self, bitmap: &[u8], timestamp_us: u32, scan_id: u32) {
        if !self.state.is_enabled() {
            return;
        }

        if self.state.tick_scan() {
            self.reporter.send_scan_summary(bitmap, timestamp_us, scan_id);
        }
    }

    /// Debounce window for `key`, default for unknown keys
    pub fn get_debounce(&self, key: u8) -> u8 {
        self.state.debounce(key)
    }

    /// Eager flag for `key`, false for unknown keys
    pub fn is_eager(&self, key: u8) -> bool {
        self.state.is_eager(key)
    }

    /// Current timestamp for edge and scan notifications
    pub fn now_us(&self) -> u32 {
        self.clock.now_us()
    }

    pub fn elapsed_us(&self, since: u32) -> u32 {
        self.clock.elapsed_us(since)
    }

    /// Write per-key configuration to storage
    pub fn save_config(&mut self) {
        self.codec.save(&self.state, &mut self.store);
    }

    /// Replace per-key configuration with the stored one
    pub fn load_config(&mut self) {
        self.codec.load(&mut self.state, &mut self.store);
    }

    pub fn state(&self) -> &DiagState {
        &self.state
    }

    pub fn clock(&self) -> &MicrosClock<C> {
        &self.clock
    }

    pub fn reporter(&self) -> &Reporter<R> {
        &self.reporter
    }

    pub fn codec(&self) -> ConfigCodec {
        self.codec
    }

    /// Hand back the store and sink, e.g. to simulate a power cycle
    pub fn into_parts(self) -> (C, S, R) {
        let Self {
            clock,
            store,
            reporter,
            ..
        } = self;
        (clock.into_counter(), store, reporter.into_sink())
    }
}
