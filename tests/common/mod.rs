//! Shared harness: a session wired to test-owned interrupt collaborators.
//!
//! Tests play the interrupt handlers by pushing into the ring, moving the
//! latch and advancing the clock, then call `poll` like the firmware loop.

#![allow(dead_code)]

use libgadget::{Event, Session, SessionConfig, Symbol, Theme};
use libraster::{Backend, BitMap, RastPort};
use romswitch::{Firmware, InputRing, MouseLatch, VblankClock};

pub const SCREEN_W: i32 = 320;
pub const SCREEN_H: i32 = 200;

pub struct Rig {
    pub ring: &'static InputRing,
    pub mouse: &'static MouseLatch,
    pub clock: &'static VblankClock,
}

pub fn rig() -> Rig {
    Rig {
        ring: Box::leak(Box::new(InputRing::new(64))),
        mouse: Box::leak(Box::new(MouseLatch::new(SCREEN_W, SCREEN_H))),
        clock: Box::leak(Box::new(VblankClock::new(romswitch::clock::PAL_HZ))),
    }
}

impl Rig {
    pub fn session(&self) -> Session<Firmware<'static>> {
        self.session_with(SessionConfig::default())
    }

    pub fn session_with(&self, config: SessionConfig) -> Session<Firmware<'static>> {
        let rp = RastPort::new(
            BitMap::new(SCREEN_W as usize, SCREEN_H as usize, 2),
            Backend::Blitter,
        );
        Session::with_config(
            Firmware::new(self.ring, self.mouse, self.clock),
            rp,
            Theme::workbench(),
            config,
        )
    }

    pub fn type_bytes(&self, bytes: &[u8]) {
        for &b in bytes {
            self.ring.push_from_isr(Symbol::Char(b));
        }
    }

    pub fn key(&self, code: u8, up: bool) {
        self.ring.push_from_isr(Symbol::RawKey { code, up });
    }

    /// Latch a pointer position and left-button state.
    pub fn pointer(&self, x: i32, y: i32, left: bool) {
        self.mouse.move_to(x, y);
        self.mouse
            .set_buttons(if left { romswitch::input::BUTTON_LEFT } else { 0 });
    }
}

/// Everything queued, in order.
pub fn drain<P: libgadget::Platform>(s: &mut Session<P>) -> Vec<Event> {
    let mut out = Vec::new();
    while let Some(ev) = s.get_event() {
        out.push(ev.event());
        s.ack_event(ev);
    }
    out
}
