//! The `Platform` a session polls on real hardware.

use libgadget::{Clock, InputSource, PointerState, Symbol, TimeVal};

use crate::clock::VblankClock;
use crate::input::{InputRing, MouseLatch};

/// Interrupt-fed keyboard ring, mouse latch and vertical-blank clock,
/// plus an optional beep hook (screen flash, speaker click).
pub struct Firmware<'a> {
    ring: &'a InputRing,
    mouse: &'a MouseLatch,
    clock: &'a VblankClock,
    beep: Option<fn()>,
    beeps: u32,
}

impl<'a> Firmware<'a> {
    pub fn new(ring: &'a InputRing, mouse: &'a MouseLatch, clock: &'a VblankClock) -> Self {
        Self {
            ring,
            mouse,
            clock,
            beep: None,
            beeps: 0,
        }
    }

    pub fn with_beep(mut self, hook: fn()) -> Self {
        self.beep = Some(hook);
        self
    }

    /// Beeps requested so far.
    pub fn beeps(&self) -> u32 {
        self.beeps
    }
}

impl InputSource for Firmware<'_> {
    fn next_symbol(&mut self) -> Option<Symbol> {
        self.ring.pop()
    }

    fn pointer(&mut self) -> PointerState {
        self.mouse.snapshot()
    }

    fn beep(&mut self) {
        self.beeps = self.beeps.wrapping_add(1);
        match self.beep {
            Some(hook) => hook(),
            None => log::debug!("beep"),
        }
    }
}

impl Clock for Firmware<'_> {
    fn now(&self) -> TimeVal {
        self.clock.now()
    }
}
