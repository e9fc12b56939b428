//! Single-line text-entry buffer.
//!
//! The buffer always satisfies `cursor <= len <= max_chars` and holds a NUL
//! at index `len`. Every edit preserves both.

use alloc::vec::Vec;
use core::fmt;

use crate::editor::EditKey;

/// Default character limit of a text-entry gadget.
pub const DEFAULT_MAX_CHARS: usize = 64;
/// Default character limit of an integer-entry gadget (sign plus ten digits).
pub const DEFAULT_INTEGER_CHARS: usize = 11;
/// Smallest buffer ever allocated, one character plus terminator.
pub const MIN_BUFFER: usize = 2;
/// Integer buffers are padded to at least this many bytes.
pub const INTEGER_BUFFER: usize = 8;

/// Which bytes an insert accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CharFilter {
    #[default]
    Any,
    /// Digits, plus one leading '-'.
    Integer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditError {
    /// The buffer already holds `max_chars` characters.
    Full,
    /// The byte is not allowed here.
    Rejected,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::Full => f.write_str("text buffer full"),
            EditError::Rejected => f.write_str("character rejected"),
        }
    }
}

/// What an edit did, for the caller to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    /// Contents or cursor moved; redraw.
    Changed,
    /// The edit was refused; beep.
    Beep,
    /// Editing finished with this terminating byte.
    Done(u8),
    /// Move focus forward.
    Next,
    /// Move focus backward.
    Prev,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringInfo {
    buffer: Vec<u8>,
    max_chars: usize,
    len: usize,
    cursor: usize,
    disp_pos: usize,
}

impl StringInfo {
    /// Allocate a buffer for `max_chars` characters, at least
    /// `min_buffer` bytes long. Returns `None` if the allocation fails.
    pub fn try_new(max_chars: usize, min_buffer: usize) -> Option<Self> {
        let max_chars = max_chars.max(MIN_BUFFER - 1);
        let capacity = (max_chars + 1).max(min_buffer).max(MIN_BUFFER);
        let mut buffer = Vec::new();
        if buffer.try_reserve_exact(capacity).is_err() {
            log::warn!("strinfo: cannot allocate {} byte buffer", capacity);
            return None;
        }
        buffer.resize(capacity, 0);
        Some(Self {
            buffer,
            max_chars,
            len: 0,
            cursor: 0,
            disp_pos: 0,
        })
    }

    pub fn text(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// The whole backing store, terminator and padding included.
    pub fn raw(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First character shown when the field is narrower than the text.
    pub fn disp_pos(&self) -> usize {
        self.disp_pos
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len);
    }

    /// Replace the contents, truncated to `max_chars`. Bytes outside 7-bit
    /// ASCII and NULs are dropped. The cursor moves to the end.
    pub fn set_text(&mut self, text: &str) {
        self.len = 0;
        for b in text.bytes().filter(|&b| b != 0 && b < 0x80) {
            if self.len == self.max_chars {
                break;
            }
            self.buffer[self.len] = b;
            self.len += 1;
        }
        self.terminate();
        self.cursor = self.len;
        self.disp_pos = 0;
    }

    pub fn set_number(&mut self, value: i32) {
        let text = alloc::format!("{}", value);
        self.set_text(&text);
    }

    /// Parse a leading decimal integer. Empty or non-numeric text is 0;
    /// values out of range saturate.
    pub fn number(&self) -> i32 {
        let bytes = self.as_bytes();
        let (negative, digits) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            _ => (false, bytes),
        };
        let mut value: i64 = 0;
        for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
            value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
        }
        if negative {
            value = -value;
        }
        value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Insert `byte` at the cursor.
    pub fn insert(&mut self, byte: u8, filter: CharFilter) -> Result<(), EditError> {
        if byte == 0 || byte >= 0x80 || !self.accepts(byte, filter) {
            return Err(EditError::Rejected);
        }
        if self.len >= self.max_chars {
            return Err(EditError::Full);
        }
        self.buffer.copy_within(self.cursor..self.len, self.cursor + 1);
        self.buffer[self.cursor] = byte;
        self.len += 1;
        self.cursor += 1;
        self.terminate();
        Ok(())
    }

    fn accepts(&self, byte: u8, filter: CharFilter) -> bool {
        match filter {
            CharFilter::Any => true,
            CharFilter::Integer => {
                byte.is_ascii_digit()
                    || (byte == b'-' && self.cursor == 0 && self.as_bytes().first() != Some(&b'-'))
            }
        }
    }

    /// Remove `start..end` and put the cursor at `start`.
    fn remove(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        self.buffer.copy_within(end..self.len, start);
        self.len -= end - start;
        self.cursor = start;
        self.terminate();
        for b in &mut self.buffer[self.len + 1..] {
            *b = 0;
        }
        true
    }

    fn terminate(&mut self) {
        self.buffer[self.len] = 0;
    }

    pub fn delete_left(&mut self) -> bool {
        self.cursor > 0 && self.remove(self.cursor - 1, self.cursor)
    }

    pub fn delete_right(&mut self) -> bool {
        let cursor = self.cursor;
        self.cursor < self.len && self.remove(cursor, cursor + 1)
    }

    /// Delete the word left of the cursor, along with any spaces between it
    /// and the cursor.
    pub fn delete_word(&mut self) -> bool {
        let bytes = &self.buffer[..self.cursor];
        let mut start = self.cursor;
        while start > 0 && bytes[start - 1] == b' ' {
            start -= 1;
        }
        while start > 0 && bytes[start - 1] != b' ' {
            start -= 1;
        }
        self.remove(start, self.cursor)
    }

    pub fn clear_to_end(&mut self) -> bool {
        let (cursor, len) = (self.cursor, self.len);
        self.remove(cursor, len)
    }

    pub fn clear_to_start(&mut self) -> bool {
        self.remove(0, self.cursor)
    }

    pub fn clear(&mut self) -> bool {
        self.cursor = self.len;
        self.remove(0, self.len)
    }

    fn move_to(&mut self, pos: usize) -> EditOutcome {
        let pos = pos.min(self.len);
        if pos == self.cursor {
            EditOutcome::Unchanged
        } else {
            self.cursor = pos;
            EditOutcome::Changed
        }
    }

    /// Apply one decoded editing key.
    pub fn apply(&mut self, key: EditKey, filter: CharFilter) -> EditOutcome {
        let changed = |did: bool| {
            if did {
                EditOutcome::Changed
            } else {
                EditOutcome::Unchanged
            }
        };
        match key {
            EditKey::Insert(byte) => match self.insert(byte, filter) {
                Ok(()) => EditOutcome::Changed,
                Err(err) => {
                    log::trace!("strinfo: insert {:#04x}: {}", byte, err);
                    EditOutcome::Beep
                }
            },
            EditKey::Left => self.move_to(self.cursor.saturating_sub(1)),
            EditKey::Right => self.move_to(self.cursor + 1),
            EditKey::LineBegin => self.move_to(0),
            EditKey::LineEnd => self.move_to(self.len),
            EditKey::DeleteLeft => changed(self.delete_left()),
            EditKey::DeleteRight => changed(self.delete_right()),
            EditKey::DeleteWord => changed(self.delete_word()),
            EditKey::ClearToEnd => changed(self.clear_to_end()),
            EditKey::ClearToStart => changed(self.clear_to_start()),
            EditKey::ClearAll => changed(self.clear()),
            EditKey::Redraw => EditOutcome::Changed,
            EditKey::Return(byte) => EditOutcome::Done(byte),
            EditKey::Tab => EditOutcome::Next,
            EditKey::BackTab => EditOutcome::Prev,
        }
    }

    /// Rewrite the contents as the canonical form of their numeric value.
    pub fn normalize_number(&mut self) {
        let value = self.number();
        self.set_number(value);
    }

    /// Adjust the display origin so the cursor lies within `columns`
    /// visible characters.
    pub fn scroll_to_cursor(&mut self, columns: usize) {
        if columns == 0 {
            self.disp_pos = self.cursor;
            return;
        }
        if self.cursor < self.disp_pos {
            self.disp_pos = self.cursor;
        } else if self.cursor >= self.disp_pos + columns {
            self.disp_pos = self.cursor + 1 - columns;
        }
        self.disp_pos = self.disp_pos.min(self.len);
    }

    /// Place the cursor under a click at character column `column` of the
    /// visible field.
    pub fn cursor_from_column(&mut self, column: usize) {
        self.set_cursor(self.disp_pos + column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holds_invariant(si: &StringInfo) -> bool {
        si.cursor() <= si.len() && si.len() <= si.max_chars() && si.raw()[si.len()] == 0
    }

    fn type_text(si: &mut StringInfo, text: &str) {
        for b in text.bytes() {
            assert_eq!(si.apply(EditKey::Insert(b), CharFilter::Any), EditOutcome::Changed);
        }
    }

    #[test]
    fn buffer_never_smaller_than_minimum() {
        let si = StringInfo::try_new(0, 0).unwrap();
        assert_eq!(si.max_chars(), 1);
        assert_eq!(si.capacity(), MIN_BUFFER);

        let int = StringInfo::try_new(3, INTEGER_BUFFER).unwrap();
        assert_eq!(int.max_chars(), 3);
        assert_eq!(int.capacity(), INTEGER_BUFFER);
    }

    #[test]
    fn typing_then_ctrl_a_ctrl_k_empties() {
        let mut si = StringInfo::try_new(10, 0).unwrap();
        type_text(&mut si, "abc");
        assert_eq!(si.text(), "abc");
        assert_eq!(si.cursor(), 3);
        si.apply(EditKey::LineBegin, CharFilter::Any);
        si.apply(EditKey::ClearToEnd, CharFilter::Any);
        assert_eq!(si.text(), "");
        assert_eq!(si.cursor(), 0);
        assert!(holds_invariant(&si));
    }

    #[test]
    fn overflow_beeps_and_keeps_contents() {
        let mut si = StringInfo::try_new(3, 0).unwrap();
        type_text(&mut si, "xyz");
        assert_eq!(si.apply(EditKey::Insert(b'!'), CharFilter::Any), EditOutcome::Beep);
        assert_eq!(si.text(), "xyz");
        assert!(holds_invariant(&si));
    }

    #[test]
    fn mid_buffer_edits_keep_terminator() {
        let mut si = StringInfo::try_new(8, 0).unwrap();
        type_text(&mut si, "hello");
        si.apply(EditKey::Left, CharFilter::Any);
        si.apply(EditKey::Left, CharFilter::Any);
        si.apply(EditKey::Insert(b'X'), CharFilter::Any);
        assert_eq!(si.text(), "helXlo");
        si.apply(EditKey::DeleteRight, CharFilter::Any);
        assert_eq!(si.text(), "helXo");
        si.apply(EditKey::DeleteLeft, CharFilter::Any);
        assert_eq!(si.text(), "helo");
        assert_eq!(si.cursor(), 3);
        si.apply(EditKey::ClearToStart, CharFilter::Any);
        assert_eq!(si.text(), "o");
        assert_eq!(si.raw()[1..], [0u8; 8]);
        assert!(holds_invariant(&si));
    }

    #[test]
    fn word_delete_eats_trailing_spaces() {
        let mut si = StringInfo::try_new(20, 0).unwrap();
        type_text(&mut si, "one two  ");
        assert!(si.delete_word());
        assert_eq!(si.text(), "one ");
        assert!(si.delete_word());
        assert_eq!(si.text(), "");
        assert!(!si.delete_word());
    }

    #[test]
    fn cursor_moves_are_clamped() {
        let mut si = StringInfo::try_new(4, 0).unwrap();
        assert_eq!(si.apply(EditKey::Left, CharFilter::Any), EditOutcome::Unchanged);
        type_text(&mut si, "ab");
        assert_eq!(si.apply(EditKey::Right, CharFilter::Any), EditOutcome::Unchanged);
        si.set_cursor(99);
        assert_eq!(si.cursor(), 2);
    }

    #[test]
    fn integer_filter_allows_one_leading_minus() {
        let mut si = StringInfo::try_new(6, INTEGER_BUFFER).unwrap();
        assert_eq!(si.insert(b'-', CharFilter::Integer), Ok(()));
        assert_eq!(si.insert(b'-', CharFilter::Integer), Err(EditError::Rejected));
        assert_eq!(si.insert(b'4', CharFilter::Integer), Ok(()));
        assert_eq!(si.insert(b'a', CharFilter::Integer), Err(EditError::Rejected));
        assert_eq!(si.number(), -4);
        si.set_cursor(0);
        assert_eq!(si.insert(b'-', CharFilter::Integer), Err(EditError::Rejected));
    }

    #[test]
    fn numbers_format_and_parse() {
        let mut si = StringInfo::try_new(DEFAULT_INTEGER_CHARS, INTEGER_BUFFER).unwrap();
        si.set_number(i32::MIN);
        assert_eq!(si.text(), "-2147483648");
        assert_eq!(si.number(), i32::MIN);
        si.set_text("0042");
        si.normalize_number();
        assert_eq!(si.text(), "42");
        si.set_text("99999999999");
        assert_eq!(si.number(), i32::MAX);
        si.set_text("-");
        assert_eq!(si.number(), 0);
    }

    #[test]
    fn set_text_truncates_and_filters() {
        let mut si = StringInfo::try_new(4, 0).unwrap();
        si.set_text("ab\u{e9}cdef");
        assert_eq!(si.text(), "abcd");
        assert_eq!(si.cursor(), 4);
        assert!(holds_invariant(&si));
    }

    #[test]
    fn scrolling_follows_cursor() {
        let mut si = StringInfo::try_new(20, 0).unwrap();
        type_text(&mut si, "abcdefghij");
        si.scroll_to_cursor(4);
        assert_eq!(si.disp_pos(), 7);
        si.set_cursor(2);
        si.scroll_to_cursor(4);
        assert_eq!(si.disp_pos(), 2);
        si.cursor_from_column(3);
        assert_eq!(si.cursor(), 5);
    }

    #[test]
    fn terminators_end_editing() {
        let mut si = StringInfo::try_new(4, 0).unwrap();
        assert_eq!(si.apply(EditKey::Return(b'\r'), CharFilter::Any), EditOutcome::Done(b'\r'));
        assert_eq!(si.apply(EditKey::Tab, CharFilter::Any), EditOutcome::Next);
        assert_eq!(si.apply(EditKey::BackTab, CharFilter::Any), EditOutcome::Prev);
    }
}
