//! Diagnostics shared across execution contexts
//!
//! The scanner hooks and the host command handler usually run in different
//! tasks or interrupt priorities. [`SharedDiagnostics`] serialises them with
//! a critical section so a command can never land halfway through a hook.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use keydiag_core::Diagnostics;
use keydiag_hal::{ByteStore, CycleCounter, ReportSink};

/// [`Diagnostics`] behind a critical-section mutex
///
/// Every method takes `&self`, so one instance can be referenced from the
/// scan loop and from the raw HID receive path at the same time.
pub struct SharedDiagnostics<C, S, R> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Diagnostics<C, S, R>>>,
}

impl<C, S, R> SharedDiagnostics<C, S, R>
where
    C: CycleCounter,
    S: ByteStore,
    R: ReportSink,
{
    pub const fn new(diag: Diagnostics<C, S, R>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(diag)),
        }
    }

    /// Run `f` with exclusive access to the core
    ///
    /// Calling back into `self` from inside `f` panics.
    pub fn with<U>(&self, f: impl FnOnce(&mut Diagnostics<C, S, R>) -> U) -> U {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn init(&self) {
        self.with(|diag| diag.init())
    }

    pub fn on_pre_debounce_edge(&self, key: u8, pressed: bool, timestamp_us: u32, scan_id: u32) {
        self.with(|diag| diag.on_pre_debounce_edge(key, pressed, timestamp_us, scan_id))
    }

    pub fn on_post_debounce_edge(&self, key: u8, pressed: bool, timestamp_us: u32, scan_id: u32) {
        self.with(|diag| diag.on_post_debounce_edge(key, pressed, timestamp_us, scan_id))
    }

    pub fn on_scan_complete(&self, bitmap: &[u8], timestamp_us: u32, scan_id: u32) {
        self.with(|diag| diag.on_scan_complete(bitmap, timestamp_us, scan_id))
    }

    /// Handle one inbound raw HID report
    pub fn process_command(&self, data: &[u8]) {
        self.with(|diag| diag.process_command(data))
    }

    pub fn get_debounce(&self, key: u8) -> u8 {
        self.with(|diag| diag.get_debounce(key))
    }

    pub fn is_eager(&self, key: u8) -> bool {
        self.with(|diag| diag.is_eager(key))
    }

    pub fn now_us(&self) -> u32 {
        self.with(|diag| diag.now_us())
    }

    pub fn elapsed_us(&self, since: u32) -> u32 {
        self.with(|diag| diag.elapsed_us(since))
    }

    pub fn into_inner(self) -> Diagnostics<C, S, R> {
        self.inner.into_inner().into_inner()
    }
}
