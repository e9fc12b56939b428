//! Scripted platform for in-crate tests.

use alloc::collections::VecDeque;
use core::cell::Cell;

use libraster::{Backend, BitMap, RastPort};

use crate::input::{Clock, InputSource, PointerState, Symbol, TimeVal};
use crate::session::Session;

/// Clock advance per reading.
const STEP_MICROS: u64 = 10_000;

#[derive(Default)]
pub struct Script {
    symbols: VecDeque<Symbol>,
    pointers: VecDeque<PointerState>,
    last: PointerState,
    now_us: Cell<u64>,
    pub beeps: usize,
}

impl Script {
    pub fn pointer(&mut self, x: i32, y: i32, left: bool) -> &mut Self {
        self.pointers.push_back(PointerState::new(x, y, left));
        self
    }

    pub fn chars(&mut self, bytes: &[u8]) -> &mut Self {
        self.symbols.extend(bytes.iter().map(|&b| Symbol::Char(b)));
        self
    }

    pub fn raw(&mut self, code: u8, up: bool) -> &mut Self {
        self.symbols.push_back(Symbol::RawKey { code, up });
        self
    }
}

impl InputSource for Script {
    fn next_symbol(&mut self) -> Option<Symbol> {
        self.symbols.pop_front()
    }

    fn pointer(&mut self) -> PointerState {
        if let Some(p) = self.pointers.pop_front() {
            self.last = p;
        }
        self.last
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }
}

impl Clock for Script {
    fn now(&self) -> TimeVal {
        let t = self.now_us.get();
        self.now_us.set(t + STEP_MICROS);
        TimeVal::from_micros(t)
    }
}

pub fn session(script: Script) -> Session<Script> {
    Session::new(script, RastPort::new(BitMap::new(320, 200, 2), Backend::Cpu))
}
