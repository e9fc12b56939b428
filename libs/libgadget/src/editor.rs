//! Byte-stream decoder for text-entry keys.
//!
//! Plain bytes map straight to editing keys; ESC and CSI introduce the
//! ANSI-style cursor sequences a serial terminal or keyboard handler sends.
//! Unrecognised sequences are swallowed and ask for a redraw.

pub const ESC: u8 = 0x1B;
/// Single-byte control sequence introducer, equivalent to `ESC [`.
pub const CSI: u8 = 0x9B;

pub const CTRL_A: u8 = 0x01;
pub const CTRL_B: u8 = 0x02;
pub const CTRL_D: u8 = 0x04;
pub const CTRL_E: u8 = 0x05;
pub const CTRL_F: u8 = 0x06;
pub const BACKSPACE: u8 = 0x08;
pub const TAB: u8 = 0x09;
pub const LF: u8 = 0x0A;
pub const CTRL_K: u8 = 0x0B;
pub const CTRL_L: u8 = 0x0C;
pub const CR: u8 = 0x0D;
pub const CTRL_U: u8 = 0x15;
pub const CTRL_V: u8 = 0x16;
pub const CTRL_W: u8 = 0x17;
pub const CTRL_X: u8 = 0x18;
pub const DEL: u8 = 0x7F;

/// Map a letter typed with control held to its control code (1..=26).
/// Anything else passes through.
pub fn control_code(ch: u8) -> u8 {
    if ch.is_ascii_alphabetic() {
        ch.to_ascii_uppercase() - b'A' + 1
    } else {
        ch
    }
}

/// A decoded editing action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    Insert(u8),
    Left,
    Right,
    LineBegin,
    LineEnd,
    DeleteLeft,
    DeleteRight,
    DeleteWord,
    ClearToEnd,
    ClearToStart,
    ClearAll,
    Redraw,
    /// CR or LF; carries the byte.
    Return(u8),
    Tab,
    BackTab,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EscState {
    #[default]
    Normal,
    Escape,
    Bracket,
    Bracket1,
    Bracket1Semi,
    Bracket1Semi2,
    Bracket1Semi3,
    Bracket1Semi5,
    Bracket2,
    Bracket3,
    LiteralNext,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EscapeDecoder {
    state: EscState,
}

impl EscapeDecoder {
    pub const fn new() -> Self {
        Self {
            state: EscState::Normal,
        }
    }

    pub fn state(&self) -> EscState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = EscState::Normal;
    }

    /// Feed one byte. Returns a key once a complete sequence is seen.
    pub fn feed(&mut self, byte: u8) -> Option<EditKey> {
        use EscState::*;

        let (next, key) = match self.state {
            Normal => match byte {
                ESC => (Escape, None),
                CSI => (Bracket, None),
                CTRL_V => (LiteralNext, None),
                _ => (Normal, plain_key(byte)),
            },
            LiteralNext => (Normal, Some(EditKey::Insert(byte))),
            Escape => match byte {
                b'[' => (Bracket, None),
                _ => (Normal, Some(EditKey::Redraw)),
            },
            Bracket => match byte {
                b'C' => (Normal, Some(EditKey::Right)),
                b'D' => (Normal, Some(EditKey::Left)),
                b'H' => (Normal, Some(EditKey::LineBegin)),
                b'F' => (Normal, Some(EditKey::LineEnd)),
                b'Z' => (Normal, Some(EditKey::BackTab)),
                b'1' => (Bracket1, None),
                b'2' => (Bracket2, None),
                b'3' => (Bracket3, None),
                _ => (Normal, Some(EditKey::Redraw)),
            },
            Bracket1 => match byte {
                b'~' => (Normal, Some(EditKey::LineBegin)),
                b';' => (Bracket1Semi, None),
                _ => (Normal, Some(EditKey::Redraw)),
            },
            Bracket1Semi => match byte {
                b'2' => (Bracket1Semi2, None),
                b'3' => (Bracket1Semi3, None),
                b'5' => (Bracket1Semi5, None),
                _ => (Normal, Some(EditKey::Redraw)),
            },
            // Shift, alt or control with an arrow jumps to the line ends.
            Bracket1Semi2 | Bracket1Semi3 | Bracket1Semi5 => match byte {
                b'C' => (Normal, Some(EditKey::LineEnd)),
                b'D' => (Normal, Some(EditKey::LineBegin)),
                _ => (Normal, Some(EditKey::Redraw)),
            },
            // Insert key: there is no overwrite mode.
            Bracket2 => (Normal, Some(EditKey::Redraw)),
            Bracket3 => match byte {
                b'~' => (Normal, Some(EditKey::DeleteRight)),
                _ => (Normal, Some(EditKey::Redraw)),
            },
        };
        if next != Normal || self.state != Normal {
            log::trace!("editor: {:?} --{:#04x}--> {:?}", self.state, byte, next);
        }
        self.state = next;
        key
    }
}

fn plain_key(byte: u8) -> Option<EditKey> {
    let key = match byte {
        CTRL_A => EditKey::LineBegin,
        CTRL_B => EditKey::Left,
        CTRL_D | DEL => EditKey::DeleteRight,
        CTRL_E => EditKey::LineEnd,
        CTRL_F => EditKey::Right,
        BACKSPACE => EditKey::DeleteLeft,
        TAB => EditKey::Tab,
        CR | LF => EditKey::Return(byte),
        CTRL_K => EditKey::ClearToEnd,
        CTRL_L => EditKey::Redraw,
        CTRL_U => EditKey::ClearToStart,
        CTRL_W => EditKey::DeleteWord,
        CTRL_X => EditKey::ClearAll,
        0x20..=0x7E => EditKey::Insert(byte),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strinfo::{CharFilter, StringInfo};

    fn decode(bytes: &[u8]) -> Vec<EditKey> {
        let mut dec = EscapeDecoder::new();
        bytes.iter().filter_map(|&b| dec.feed(b)).collect()
    }

    #[test]
    fn cursor_right_sequence_matches_ctrl_f() {
        assert_eq!(decode(b"\x1b[C"), decode(&[CTRL_F]));
        assert_eq!(decode(&[CSI, b'C']), [EditKey::Right]);
        assert_eq!(decode(b"\x1b[D"), decode(&[CTRL_B]));
    }

    #[test]
    fn modified_arrows_jump_to_line_ends() {
        assert_eq!(decode(b"\x1b[1;5C"), [EditKey::LineEnd]);
        assert_eq!(decode(b"\x1b[1;2D"), [EditKey::LineBegin]);
        assert_eq!(decode(b"\x1b[1;3C"), [EditKey::LineEnd]);
    }

    #[test]
    fn tilde_sequences() {
        assert_eq!(decode(b"\x1b[1~"), [EditKey::LineBegin]);
        assert_eq!(decode(b"\x1b[3~"), [EditKey::DeleteRight]);
        assert_eq!(decode(b"\x1b[2~"), [EditKey::Redraw]);
        assert_eq!(decode(b"\x1b[Z"), [EditKey::BackTab]);
    }

    #[test]
    fn unknown_sequences_are_swallowed_with_redraw() {
        assert_eq!(decode(b"\x1bxa"), [EditKey::Redraw, EditKey::Insert(b'a')]);
        assert_eq!(decode(b"\x1b[1;9Cb"), [EditKey::Redraw, EditKey::Insert(b'C'), EditKey::Insert(b'b')]);
        let mut dec = EscapeDecoder::new();
        dec.feed(ESC);
        dec.feed(b'[');
        assert_eq!(dec.state(), EscState::Bracket);
        dec.feed(b'q');
        assert_eq!(dec.state(), EscState::Normal);
    }

    #[test]
    fn literal_next_inserts_control_bytes() {
        assert_eq!(decode(&[CTRL_V, CTRL_A]), [EditKey::Insert(CTRL_A)]);
    }

    #[test]
    fn control_letters_map_to_codes() {
        assert_eq!(control_code(b'a'), CTRL_A);
        assert_eq!(control_code(b'K'), CTRL_K);
        assert_eq!(control_code(b'z'), 26);
        assert_eq!(control_code(b'1'), b'1');
    }

    #[test]
    fn escape_move_equals_control_move_on_buffer() {
        let run = |keys: &[u8]| {
            let mut si = StringInfo::try_new(16, 0).unwrap();
            si.set_text("abcdef");
            si.set_cursor(2);
            let mut dec = EscapeDecoder::new();
            for &b in keys {
                if let Some(key) = dec.feed(b) {
                    si.apply(key, CharFilter::Any);
                }
            }
            (si.cursor(), si.text().to_string())
        };
        assert_eq!(run(b"\x1b[C"), run(&[CTRL_F]));
        assert_eq!(run(b"\x1b[1;5C"), (6, "abcdef".to_string()));
        assert_eq!(run(b"\x1b[1;5D"), run(&[CTRL_A]));
    }
}
