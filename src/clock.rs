//! Vertical-blank time base.

use core::sync::atomic::{AtomicU64, Ordering};
use libgadget::{Clock, TimeVal};

pub const PAL_HZ: u32 = 50;
pub const NTSC_HZ: u32 = 60;

/// Counts vertical-blank interrupts and converts them to elapsed time.
pub struct VblankClock {
    ticks: AtomicU64,
    hz: u32,
}

impl VblankClock {
    pub const fn new(hz: u32) -> Self {
        Self {
            ticks: AtomicU64::new(0),
            hz: if hz == 0 { 1 } else { hz },
        }
    }

    /// Called by the vertical-blank interrupt handler.
    pub fn on_vblank(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn advance(&self, frames: u64) {
        self.ticks.fetch_add(frames, Ordering::Relaxed);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn hz(&self) -> u32 {
        self.hz
    }
}

impl Clock for VblankClock {
    fn now(&self) -> TimeVal {
        TimeVal::from_micros(self.ticks().saturating_mul(1_000_000) / u64::from(self.hz))
    }
}
