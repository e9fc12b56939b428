//! Collaborator contracts: where input and time come from.
//!
//! The toolkit never touches hardware. A platform hands it decoded keyboard
//! symbols, the pointer state and a clock; everything else is polling.

use core::ops::Add;

/// One keyboard item from the platform input ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// A translated character (ASCII, or an escape-sequence byte).
    Char(u8),
    /// An untranslated key transition.
    RawKey { code: u8, up: bool },
}

impl Symbol {
    /// Bit marking a raw key in the 16-bit ring encoding.
    pub const RAW_BIT: u16 = 0x100;

    /// Decode a ring entry: low byte is the value; [`Self::RAW_BIT`] marks
    /// a raw key whose bit 7 is the release flag.
    pub fn decode(raw: u16) -> Self {
        let byte = raw as u8;
        if raw & Self::RAW_BIT != 0 {
            Symbol::RawKey {
                code: byte & 0x7F,
                up: byte & 0x80 != 0,
            }
        } else {
            Symbol::Char(byte)
        }
    }

    pub fn encode(self) -> u16 {
        match self {
            Symbol::Char(ch) => u16::from(ch),
            Symbol::RawKey { code, up } => {
                Self::RAW_BIT | u16::from(code & 0x7F) | if up { 0x80 } else { 0 }
            }
        }
    }
}

/// Snapshot of the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    /// Left button currently held.
    pub left: bool,
    pub right: bool,
}

impl PointerState {
    pub const fn new(x: i32, y: i32, left: bool) -> Self {
        Self { x, y, left, right: false }
    }

    /// Construct from a button bitmask where bit 0 = left, bit 1 = right.
    pub fn from_raw(x: i32, y: i32, buttons: u32) -> Self {
        Self {
            x,
            y,
            left: buttons & 1 != 0,
            right: buttons & 2 != 0,
        }
    }
}

/// Seconds plus microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeVal {
    pub secs: u32,
    pub micros: u32,
}

impl TimeVal {
    pub const fn new(secs: u32, micros: u32) -> Self {
        Self { secs, micros }
    }

    pub fn from_micros(total: u64) -> Self {
        Self {
            secs: (total / 1_000_000) as u32,
            micros: (total % 1_000_000) as u32,
        }
    }

    pub fn as_micros(self) -> u64 {
        u64::from(self.secs) * 1_000_000 + u64::from(self.micros)
    }

    pub fn add_millis(self, ms: u32) -> Self {
        Self::from_micros(self.as_micros() + u64::from(ms) * 1_000)
    }
}

impl Add for TimeVal {
    type Output = TimeVal;

    fn add(self, rhs: TimeVal) -> TimeVal {
        Self::from_micros(self.as_micros() + rhs.as_micros())
    }
}

/// Keyboard and pointer provider.
pub trait InputSource {
    /// Next pending keyboard symbol, if any. Must not block.
    fn next_symbol(&mut self) -> Option<Symbol>;

    /// Current pointer state.
    fn pointer(&mut self) -> PointerState;

    /// Audible (or visible) error signal. Defaults to nothing.
    fn beep(&mut self) {}
}

/// Monotonic time provider.
pub trait Clock {
    fn now(&self) -> TimeVal;

    /// Returns true once `deadline` has been reached.
    fn reached(&self, deadline: TimeVal) -> bool {
        self.now() >= deadline
    }
}

/// Everything a session needs from its host.
pub trait Platform: InputSource + Clock {}

impl<T: InputSource + Clock> Platform for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_encoding() {
        for sym in [
            Symbol::Char(b'a'),
            Symbol::Char(0x9B),
            Symbol::RawKey { code: 0x4F, up: false },
            Symbol::RawKey { code: 0x60, up: true },
        ] {
            assert_eq!(Symbol::decode(sym.encode()), sym);
        }
        assert_eq!(Symbol::decode(0x1E0), Symbol::RawKey { code: 0x60, up: true });
    }

    #[test]
    fn time_arithmetic_carries() {
        let t = TimeVal::new(1, 950_000).add_millis(100);
        assert_eq!(t, TimeVal::new(2, 50_000));
        assert!(TimeVal::new(1, 999_999) < TimeVal::new(2, 0));
        assert_eq!(TimeVal::new(0, 600_000) + TimeVal::new(0, 500_000), TimeVal::new(1, 100_000));
    }

    #[test]
    fn raw_buttons() {
        let p = PointerState::from_raw(3, 4, 0b11);
        assert!(p.left && p.right);
        assert!(!PointerState::from_raw(0, 0, 0b10).left);
    }
}
