//! Cycle counter abstraction
//!
//! The microsecond clock is derived from a free-running counter that ticks
//! once per CPU cycle and wraps at 32 bits.

/// Free-running 32-bit cycle counter
pub trait CycleCounter {
    /// Enable the counter and restart it from zero
    fn reset(&mut self);

    /// Current counter value
    ///
    /// Wraps to zero after `u32::MAX`.
    fn cycles(&self) -> u32;
}

impl<T: CycleCounter + ?Sized> CycleCounter for &mut T {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn cycles(&self) -> u32 {
        (**self).cycles()
    }
}
