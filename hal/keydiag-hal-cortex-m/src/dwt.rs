//! DWT cycle counter
//!
//! `CYCCNT` counts core clock cycles and wraps at 2^32. It only runs once
//! trace is enabled in the DCB, which [`DwtCycleCounter::reset`] takes care
//! of.
//!
//! `CYCCNT` is not implemented on ARMv6-M.

use cortex_m::peripheral::{DCB, DWT};
use keydiag_hal::CycleCounter;

/// Owns the DWT and DCB peripherals for the lifetime of the diagnostics
pub struct DwtCycleCounter {
    dcb: DCB,
    dwt: DWT,
}

impl DwtCycleCounter {
    /// Take ownership; the counter is not started until [`CycleCounter::reset`]
    pub fn new(dcb: DCB, dwt: DWT) -> Self {
        Self { dcb, dwt }
    }

    pub fn free(self) -> (DCB, DWT) {
        (self.dcb, self.dwt)
    }
}

impl CycleCounter for DwtCycleCounter {
    fn reset(&mut self) {
        self.dcb.enable_trace();
        self.dwt.enable_cycle_counter();
        self.dwt.set_cycle_count(0);

        #[cfg(feature = "defmt")]
        defmt::debug!("DWT cycle counter started");
    }

    fn cycles(&self) -> u32 {
        DWT::cycle_count()
    }
}
