//! Keyboard and mouse-button qualifiers.

use bitflags::bitflags;

/// Raw key codes of the modifier keys. Bit 7 marks a release.
pub mod rawkey {
    pub const LEFT_SHIFT: u8 = 0x60;
    pub const RIGHT_SHIFT: u8 = 0x61;
    pub const CAPS_LOCK: u8 = 0x62;
    pub const CONTROL: u8 = 0x63;
    pub const LEFT_ALT: u8 = 0x64;
    pub const RIGHT_ALT: u8 = 0x65;
    pub const LEFT_COMMAND: u8 = 0x66;
    pub const RIGHT_COMMAND: u8 = 0x67;

    pub const CURSOR_UP: u8 = 0x4C;
    pub const CURSOR_DOWN: u8 = 0x4D;
    pub const CURSOR_RIGHT: u8 = 0x4E;
    pub const CURSOR_LEFT: u8 = 0x4F;

    pub const UP_BIT: u8 = 0x80;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Qualifier: u16 {
        const LEFT_SHIFT = 1 << 0;
        const RIGHT_SHIFT = 1 << 1;
        const CAPS_LOCK = 1 << 2;
        const CONTROL = 1 << 3;
        const LEFT_ALT = 1 << 4;
        const RIGHT_ALT = 1 << 5;
        const LEFT_COMMAND = 1 << 6;
        const RIGHT_COMMAND = 1 << 7;
        const LEFT_BUTTON = 1 << 14;
        const RIGHT_BUTTON = 1 << 13;
    }
}

impl Qualifier {
    /// Returns true if either shift key is held
    pub fn shift(self) -> bool {
        self.intersects(Self::LEFT_SHIFT | Self::RIGHT_SHIFT)
    }

    pub fn ctrl(self) -> bool {
        self.contains(Self::CONTROL)
    }

    pub fn alt(self) -> bool {
        self.intersects(Self::LEFT_ALT | Self::RIGHT_ALT)
    }

    /// Track a raw key transition. Returns true if `code` was a modifier.
    ///
    /// Caps lock toggles on press and ignores release.
    pub fn update(&mut self, code: u8, up: bool) -> bool {
        let flag = match code {
            rawkey::LEFT_SHIFT => Self::LEFT_SHIFT,
            rawkey::RIGHT_SHIFT => Self::RIGHT_SHIFT,
            rawkey::CONTROL => Self::CONTROL,
            rawkey::LEFT_ALT => Self::LEFT_ALT,
            rawkey::RIGHT_ALT => Self::RIGHT_ALT,
            rawkey::LEFT_COMMAND => Self::LEFT_COMMAND,
            rawkey::RIGHT_COMMAND => Self::RIGHT_COMMAND,
            rawkey::CAPS_LOCK => {
                if !up {
                    self.toggle(Self::CAPS_LOCK);
                }
                return true;
            }
            _ => return false,
        };
        self.set(flag, !up);
        true
    }

    /// Mirror mouse button state into the qualifier.
    pub fn set_buttons(&mut self, left: bool, right: bool) {
        self.set(Self::LEFT_BUTTON, left);
        self.set(Self::RIGHT_BUTTON, right);
    }
}
