//! Diagnostic configuration and counters
//!
//! Holds everything the host can observe or change: the telemetry gate,
//! the scan summary divider, per-key counters and per-key debounce/eager
//! configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use keydiag_protocol::KEY_COUNT;

/// Debounce window used for keys that were never configured
pub const DEFAULT_DEBOUNCE_MS: u8 = 5;

/// Map a raw key index to an array index
///
/// Returns `None` for keys outside `0..KEY_COUNT`.
pub fn key_index(key: u8) -> Option<usize> {
    let index = key as usize;
    (index < KEY_COUNT).then_some(index)
}

/// Global counters, as a read-only snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiagCounters {
    /// Completed scans while telemetry was enabled
    pub scan_counter: u32,
    /// Reserved for ghosting detection
    pub ghost_events: u32,
    /// Reserved bitfield of rows suspected stuck
    pub stuck_rows: u8,
    /// Reserved bitfield of columns suspected stuck
    pub stuck_cols: u8,
}

/// Diagnostic state
///
/// `ghost_events`, `chatter`, `stuck_rows` and `stuck_cols` are cleared by
/// [`reset_counters`](Self::reset_counters) but nothing increments them yet.
#[derive(Debug, Clone)]
pub struct DiagState {
    enabled: bool,
    scan_div: u8,
    counters: DiagCounters,
    actuations: [u32; KEY_COUNT],
    chatter: [u32; KEY_COUNT],
    debounce_ms: [u8; KEY_COUNT],
    eager_mode: [bool; KEY_COUNT],
}

impl Default for DiagState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagState {
    /// Power-on state: disabled, divider 1, zero counters, default config
    pub const fn new() -> Self {
        Self {
            enabled: false,
            scan_div: 1,
            counters: DiagCounters {
                scan_counter: 0,
                ghost_events: 0,
                stuck_rows: 0,
                stuck_cols: 0,
            },
            actuations: [0; KEY_COUNT],
            chatter: [0; KEY_COUNT],
            debounce_ms: [DEFAULT_DEBOUNCE_MS; KEY_COUNT],
            eager_mode: [false; KEY_COUNT],
        }
    }

    /// Zero every counter; per-key configuration is kept
    pub fn reset_counters(&mut self) {
        self.counters = DiagCounters::default();
        self.actuations = [0; KEY_COUNT];
        self.chatter = [0; KEY_COUNT];
    }

    /// Set the telemetry gate and summary divider
    ///
    /// A zero divider is stored as 1. Restarts the scan counter so the next
    /// summary is `scan_div` scans away.
    pub fn enable(&mut self, enabled: bool, scan_div: u8) {
        self.enabled = enabled;
        self.scan_div = scan_div.max(1);
        self.counters.scan_counter = 0;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn scan_div(&self) -> u8 {
        self.scan_div
    }

    pub fn counters(&self) -> DiagCounters {
        self.counters
    }

    /// Count a completed scan
    ///
    /// Returns true when this scan is due for a summary.
    pub fn tick_scan(&mut self) -> bool {
        self.counters.scan_counter = self.counters.scan_counter.wrapping_add(1);
        self.counters.scan_counter % self.scan_div as u32 == 0
    }

    /// Count a confirmed press; out-of-range keys are ignored
    pub fn record_actuation(&mut self, key: u8) {
        if let Some(index) = key_index(key) {
            self.actuations[index] = self.actuations[index].wrapping_add(1);
        }
    }

    /// Confirmed presses of `key`, 0 if out of range
    pub fn actuations(&self, key: u8) -> u32 {
        key_index(key).map_or(0, |index| self.actuations[index])
    }

    /// Chatter count of `key`, 0 if out of range
    pub fn chatter(&self, key: u8) -> u32 {
        key_index(key).map_or(0, |index| self.chatter[index])
    }

    /// Debounce window of `key`, or the default if out of range
    pub fn debounce(&self, key: u8) -> u8 {
        key_index(key).map_or(DEFAULT_DEBOUNCE_MS, |index| self.debounce_ms[index])
    }

    /// Eager flag of `key`, false if out of range
    pub fn is_eager(&self, key: u8) -> bool {
        key_index(key).is_some_and(|index| self.eager_mode[index])
    }

    /// Returns false (and changes nothing) if `key` is out of range
    pub fn set_debounce(&mut self, key: u8, ms: u8) -> bool {
        match key_index(key) {
            Some(index) => {
                self.debounce_ms[index] = ms;
                true
            }
            None => false,
        }
    }

    /// Returns false (and changes nothing) if `key` is out of range
    pub fn set_eager(&mut self, key: u8, eager: bool) -> bool {
        match key_index(key) {
            Some(index) => {
                self.eager_mode[index] = eager;
                true
            }
            None => false,
        }
    }

    pub(crate) fn debounce_table(&self) -> &[u8; KEY_COUNT] {
        &self.debounce_ms
    }

    pub(crate) fn eager_table(&self) -> &[bool; KEY_COUNT] {
        &self.eager_mode
    }

    pub(crate) fn debounce_table_mut(&mut self) -> &mut [u8; KEY_COUNT] {
        &mut self.debounce_ms
    }

    pub(crate) fn eager_table_mut(&mut self) -> &mut [bool; KEY_COUNT] {
        &mut self.eager_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAST_KEY: u8 = (KEY_COUNT - 1) as u8;
    const FIRST_INVALID: u8 = KEY_COUNT as u8;

    #[test]
    fn test_power_on_defaults() {
        let state = DiagState::new();
        assert!(!state.is_enabled());
        assert_eq!(state.scan_div(), 1);
        assert_eq!(state.counters(), DiagCounters::default());
        for key in 0..=LAST_KEY {
            assert_eq!(state.debounce(key), DEFAULT_DEBOUNCE_MS);
            assert!(!state.is_eager(key));
            assert_eq!(state.actuations(key), 0);
            assert_eq!(state.chatter(key), 0);
        }
    }

    #[test]
    fn test_out_of_range_reads_default() {
        let mut state = DiagState::new();
        for key in 0..=LAST_KEY {
            state.set_debounce(key, 20);
            state.set_eager(key, true);
        }
        for key in FIRST_INVALID..=u8::MAX {
            assert_eq!(state.debounce(key), DEFAULT_DEBOUNCE_MS);
            assert!(!state.is_eager(key));
            assert_eq!(state.actuations(key), 0);
        }
    }

    #[test]
    fn test_out_of_range_writes_rejected() {
        let mut state = DiagState::new();
        assert!(!state.set_debounce(FIRST_INVALID, 1));
        assert!(!state.set_eager(u8::MAX, true));
        state.record_actuation(FIRST_INVALID);

        assert!(state.debounce_table().iter().all(|&ms| ms == DEFAULT_DEBOUNCE_MS));
        assert!(state.eager_table().iter().all(|&eager| !eager));
        assert!((0..=LAST_KEY).all(|key| state.actuations(key) == 0));
    }

    #[test]
    fn test_set_last_key() {
        let mut state = DiagState::new();
        assert!(state.set_debounce(LAST_KEY, 12));
        assert!(state.set_eager(LAST_KEY, true));
        assert_eq!(state.debounce(LAST_KEY), 12);
        assert!(state.is_eager(LAST_KEY));
    }

    #[test]
    fn test_enable_coerces_divider() {
        let mut state = DiagState::new();
        state.enable(true, 0);
        assert!(state.is_enabled());
        assert_eq!(state.scan_div(), 1);

        state.enable(false, 9);
        assert!(!state.is_enabled());
        assert_eq!(state.scan_div(), 9);
    }

    #[test]
    fn test_tick_scan_decimation() {
        let mut state = DiagState::new();
        state.enable(true, 4);
        let due: [bool; 12] = core::array::from_fn(|_| state.tick_scan());
        for (i, is_due) in due.iter().enumerate() {
            assert_eq!(*is_due, (i + 1) % 4 == 0, "scan {}", i + 1);
        }
        assert_eq!(state.counters().scan_counter, 12);
    }

    #[test]
    fn test_enable_restarts_decimation() {
        let mut state = DiagState::new();
        state.enable(true, 3);
        state.tick_scan();
        state.tick_scan();
        state.enable(true, 3);
        assert!(!state.tick_scan());
        assert!(!state.tick_scan());
        assert!(state.tick_scan());
    }

    #[test]
    fn test_actuation_wraps() {
        let mut state = DiagState::new();
        state.actuations[3] = u32::MAX;
        state.record_actuation(3);
        assert_eq!(state.actuations(3), 0);
    }

    #[test]
    fn test_reset_counters_keeps_config() {
        let mut state = DiagState::new();
        state.enable(true, 2);
        state.set_debounce(1, 30);
        state.set_eager(2, true);
        state.record_actuation(1);
        state.tick_scan();
        state.chatter[4] = 7;
        state.counters.ghost_events = 3;
        state.counters.stuck_rows = 0b10;
        state.counters.stuck_cols = 0b1;

        state.reset_counters();

        assert_eq!(state.counters(), DiagCounters::default());
        assert_eq!(state.actuations(1), 0);
        assert_eq!(state.chatter(4), 0);
        assert_eq!(state.debounce(1), 30);
        assert!(state.is_eager(2));
        assert!(state.is_enabled());
        assert_eq!(state.scan_div(), 2);
    }
}
