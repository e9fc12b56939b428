mod common;

use common::{drain, rig, Rig};
use libgadget::editor::{BACKSPACE, CR, CSI, CTRL_A, CTRL_B, CTRL_E, CTRL_F, CTRL_K, CTRL_U, CTRL_W, CTRL_X, DEL, ESC};
use libgadget::qualifier::rawkey;
use libgadget::{Attr, AttrValue, Class, GadgetId, Kind, NewGadget, Session, Tag};
use romswitch::Firmware;

fn field(rig: &Rig, kind: Kind, tags: &[Tag]) -> (Session<Firmware<'static>>, GadgetId) {
    let mut s = rig.session();
    let ctx = s.create_context();
    let id = s
        .create_gadget(kind, Some(ctx), &NewGadget::new(90, 20, 140, 14).label("Name").id(9), tags)
        .unwrap();
    s.refresh_gadgets(ctx).unwrap();
    assert!(s.activate_gadget(id));
    (s, id)
}

fn assert_invariant(s: &Session<Firmware<'static>>, id: GadgetId) {
    let si = s.string_info(id).unwrap();
    assert!(si.cursor() <= si.len());
    assert!(si.len() <= si.max_chars());
    assert_eq!(si.raw()[si.len()], 0);
}

#[test]
fn typed_text_reads_back() {
    let rig = rig();
    let (mut s, id) = field(&rig, Kind::String, &[Tag::MaxChars(8)]);
    rig.type_bytes(b"abc");
    s.poll();
    let si = s.string_info(id).unwrap();
    assert_eq!(si.text(), "abc");
    assert_eq!(si.cursor(), 3);
    assert!(drain(&mut s).is_empty());
}

#[test]
fn editing_never_breaks_the_buffer() {
    let rig = rig();
    let (mut s, id) = field(&rig, Kind::String, &[Tag::MaxChars(6), Tag::String("seed")]);
    let script: &[&[u8]] = &[
        b"hello world",
        &[BACKSPACE, BACKSPACE],
        &[CTRL_A, DEL, DEL],
        b"xy",
        &[CTRL_E, CTRL_W],
        &[CTRL_B, CTRL_B, CTRL_K],
        &[CTRL_F, CTRL_F, CTRL_F, CTRL_F],
        b"123456789",
        &[CTRL_A, CTRL_F, CTRL_U],
        &[CTRL_X],
        &[BACKSPACE, DEL],
        b"q",
    ];
    for chunk in script {
        rig.type_bytes(chunk);
        s.poll();
        assert_invariant(&s, id);
    }
    assert_eq!(s.string_info(id).unwrap().text(), "q");
}

#[test]
fn full_field_beeps_and_keeps_contents() {
    let rig = rig();
    let (mut s, id) = field(&rig, Kind::String, &[Tag::MaxChars(3)]);
    rig.type_bytes(b"abc");
    s.poll();
    let before = s.string_info(id).unwrap().clone();

    rig.type_bytes(b"d");
    s.poll();
    assert_eq!(s.string_info(id).unwrap(), &before);
    assert_eq!(s.platform().beeps(), 1);
}

#[test]
fn escape_cursor_right_matches_control_f() {
    let rig = rig();
    let (mut a, a_id) = field(&rig, Kind::String, &[Tag::String("abcd")]);
    rig.type_bytes(&[CTRL_A, ESC, b'[', b'C', b'X']);
    a.poll();

    let rig_b = common::rig();
    let (mut b, b_id) = field(&rig_b, Kind::String, &[Tag::String("abcd")]);
    rig_b.type_bytes(&[CTRL_A, CTRL_F, b'X']);
    b.poll();

    assert_eq!(a.string_info(a_id).unwrap().text(), "aXbcd");
    assert_eq!(a.string_info(a_id).unwrap(), b.string_info(b_id).unwrap());
}

#[test]
fn control_cursor_right_goes_to_line_end() {
    let rig = rig();
    let (mut s, id) = field(&rig, Kind::String, &[Tag::String("abcd")]);
    rig.type_bytes(&[CTRL_A, ESC, b'[', b'1', b';', b'5', b'C', b'!']);
    s.poll();
    assert_eq!(s.string_info(id).unwrap().text(), "abcd!");

    rig.type_bytes(&[CSI, b'D', b'?']);
    s.poll();
    assert_eq!(s.string_info(id).unwrap().text(), "abcd?!");
}

#[test]
fn raw_cursor_keys_move_within_the_field() {
    let rig = rig();
    let (mut s, id) = field(&rig, Kind::String, &[Tag::String("abcd")]);
    rig.key(rawkey::CURSOR_LEFT, false);
    rig.key(rawkey::CURSOR_LEFT, true);
    s.poll();
    assert_eq!(s.string_info(id).unwrap().cursor(), 3);

    rig.key(rawkey::LEFT_SHIFT, false);
    rig.key(rawkey::CURSOR_LEFT, false);
    rig.key(rawkey::LEFT_SHIFT, true);
    s.poll();
    assert_eq!(s.string_info(id).unwrap().cursor(), 0);
}

#[test]
fn return_commits_with_the_terminator() {
    let rig = rig();
    let (mut s, id) = field(&rig, Kind::String, &[]);
    rig.type_bytes(b"ok");
    rig.type_bytes(&[CR]);
    s.poll();
    assert_eq!(s.active_gadget(), None);
    let events = drain(&mut s);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].class, Class::GadgetUp);
    assert_eq!(events[0].gadget, Some(id));
    assert_eq!(events[0].gadget_id, 9);
    assert_eq!(events[0].code, u16::from(CR));
}

#[test]
fn integer_field_filters_and_normalizes() {
    let rig = rig();
    let (mut s, id) = field(&rig, Kind::Integer, &[Tag::Number(0)]);
    rig.type_bytes(&[CTRL_X]);
    rig.type_bytes(b"-0x42");
    s.poll();
    assert_eq!(s.string_info(id).unwrap().text(), "-042");
    assert_eq!(s.platform().beeps(), 1);

    s.deactivate_gadget();
    assert_eq!(s.string_info(id).unwrap().text(), "-42");
    assert_eq!(s.get_attr(id, Attr::Number).unwrap(), Some(AttrValue::Int(-42)));
}
