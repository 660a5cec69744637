//! Microsecond clock
//!
//! Converts a free-running 32-bit cycle counter into microseconds since
//! [`MicrosClock::init`].
//!
//! # Wraparound
//!
//! Two 32-bit quantities wrap:
//!
//! - The cycle counter itself, every `2^32 / cpu_hz` seconds. At the default
//!   168 MHz that is about 25.6 s, after which `now_us` restarts from zero.
//! - The microsecond value, every `2^32` µs (about 71.6 min). Only reached
//!   directly at clocks at or below 1 MHz.
//!
//! [`wrap_period_us`] returns whichever comes first. [`MicrosClock::elapsed_us`]
//! is correct across a single microsecond wrap; intervals longer than the
//! wrap period cannot be measured.

use keydiag_hal::CycleCounter;

/// Core clock of the supported controller
pub const DEFAULT_CPU_HZ: u32 = 168_000_000;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Convert a cycle count to microseconds
///
/// Uses 64-bit intermediates so `cycles * 1_000_000` cannot overflow; the
/// result is truncated to 32 bits.
pub fn cycles_to_us(cycles: u32, cpu_hz: u32) -> u32 {
    (cycles as u64 * MICROS_PER_SECOND / cpu_hz.max(1) as u64) as u32
}

/// Forward distance from `since` to `now` on a wrapping 32-bit counter
pub fn wrapping_elapsed(now: u32, since: u32) -> u32 {
    if now >= since {
        now - since
    } else {
        (u32::MAX - since) + now + 1
    }
}

/// Interval after which `now_us` starts again from zero
pub fn wrap_period_us(cpu_hz: u32) -> u64 {
    let cycle_wrap = (1u64 << 32) * MICROS_PER_SECOND / cpu_hz.max(1) as u64;
    cycle_wrap.min(1u64 << 32)
}

/// Microsecond clock over a [`CycleCounter`]
#[derive(Debug)]
pub struct MicrosClock<C> {
    counter: C,
    cpu_hz: u32,
}

impl<C: CycleCounter> MicrosClock<C> {
    /// Create a clock; call [`init`](Self::init) before reading it
    ///
    /// A zero `cpu_hz` is treated as 1 Hz.
    pub fn new(counter: C, cpu_hz: u32) -> Self {
        Self {
            counter,
            cpu_hz: cpu_hz.max(1),
        }
    }

    /// Restart the counter from zero
    pub fn init(&mut self) {
        self.counter.reset();
    }

    /// Microseconds since [`init`](Self::init)
    pub fn now_us(&self) -> u32 {
        cycles_to_us(self.counter.cycles(), self.cpu_hz)
    }

    /// Microseconds from `since` to now, across a wrap
    pub fn elapsed_us(&self, since: u32) -> u32 {
        wrapping_elapsed(self.now_us(), since)
    }

    pub fn cpu_hz(&self) -> u32 {
        self.cpu_hz
    }

    /// See the module documentation
    pub fn wrap_period_us(&self) -> u64 {
        wrap_period_us(self.cpu_hz)
    }

    pub fn into_counter(self) -> C {
        self.counter
    }
}
