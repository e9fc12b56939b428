mod common;

use common::{drain, rig};
use libgadget::{Attr, AttrValue, Class, Kind, NewGadget, Tag};

const OPTIONS: [&str; 5] = ["Bank 0", "Bank 1", "Bank 2", "Bank 3", "Bank 4"];

/// Middle row of option `i` for a group whose top is at y = 40.
fn option_y(i: i32) -> i32 {
    40 + i * 10 + 4
}

#[test]
fn radio_group_commits_on_release_only() {
    let rig = rig();
    let mut s = rig.session();
    let ctx = s.create_context();
    let mx = s
        .create_gadget(
            Kind::Mx,
            Some(ctx),
            &NewGadget::new(20, 40, 17, 9).id(4),
            &[Tag::Labels(&OPTIONS)],
        )
        .unwrap();
    s.refresh_gadgets(ctx).unwrap();

    rig.pointer(25, option_y(2), true);
    s.poll();
    assert_eq!(s.get_attr(mx, Attr::Displayed).unwrap(), Some(AttrValue::Int(2)));
    assert_eq!(s.get_attr(mx, Attr::Active).unwrap(), Some(AttrValue::Int(0)));

    rig.pointer(25, option_y(3), true);
    s.poll();
    rig.pointer(25, option_y(4), true);
    s.poll();
    assert_eq!(s.get_attr(mx, Attr::Displayed).unwrap(), Some(AttrValue::Int(4)));
    assert_eq!(s.get_attr(mx, Attr::Active).unwrap(), Some(AttrValue::Int(0)));
    assert_eq!(s.pending_events(), 0);

    rig.pointer(25, option_y(4), false);
    s.poll();
    let events = drain(&mut s);
    assert_eq!(events.len(), 1);
    assert_eq!(
        (events[0].class, events[0].code, events[0].gadget, events[0].gadget_id),
        (Class::GadgetUp, 4, Some(mx), 4)
    );
    assert_eq!(s.get_attr(mx, Attr::Active).unwrap(), Some(AttrValue::Int(4)));
}

#[test]
fn radio_release_outside_reverts() {
    let rig = rig();
    let mut s = rig.session();
    let ctx = s.create_context();
    let mx = s
        .create_gadget(Kind::Mx, Some(ctx), &NewGadget::new(20, 40, 17, 9), &[Tag::Labels(&OPTIONS), Tag::Active(1)])
        .unwrap();

    rig.pointer(25, option_y(3), true);
    s.poll();
    rig.pointer(200, 150, true);
    s.poll();
    rig.pointer(200, 150, false);
    s.poll();

    assert!(drain(&mut s).is_empty());
    assert_eq!(s.get_attr(mx, Attr::Active).unwrap(), Some(AttrValue::Int(1)));
    assert_eq!(s.get_attr(mx, Attr::Displayed).unwrap(), Some(AttrValue::Int(1)));
}

#[test]
fn checkbox_toggles_on_release() {
    let rig = rig();
    let mut s = rig.session();
    let ctx = s.create_context();
    let cb = s
        .create_gadget(Kind::Checkbox, Some(ctx), &NewGadget::new(20, 100, 26, 11).label("Write protect"), &[])
        .unwrap();

    for expected in [true, false] {
        rig.pointer(30, 105, true);
        s.poll();
        assert_eq!(s.pending_events(), 0);
        rig.pointer(30, 105, false);
        s.poll();
        let events = drain(&mut s);
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].class, events[0].code), (Class::GadgetUp, u16::from(expected)));
        assert_eq!(s.get_attr(cb, Attr::Checked).unwrap(), Some(AttrValue::Bool(expected)));
    }
}

#[test]
fn button_release_elsewhere_is_silent() {
    let rig = rig();
    let mut s = rig.session();
    let ctx = s.create_context();
    let b = s
        .create_gadget(Kind::Button, Some(ctx), &NewGadget::new(100, 150, 80, 14).label("Boot"), &[])
        .unwrap();

    rig.pointer(120, 155, true);
    s.poll();
    assert!(s.gadget(b).unwrap().flags.contains(libgadget::GadgetFlags::SELECTED));
    rig.pointer(10, 10, true);
    s.poll();
    assert!(!s.gadget(b).unwrap().flags.contains(libgadget::GadgetFlags::SELECTED));
    rig.pointer(10, 10, false);
    s.poll();
    assert!(drain(&mut s).is_empty());

    rig.pointer(120, 155, true);
    s.poll();
    rig.pointer(121, 156, false);
    s.poll();
    let events = drain(&mut s);
    assert_eq!(events.len(), 1);
    assert_eq!((events[0].class, events[0].gadget), (Class::GadgetUp, Some(b)));
}

#[test]
fn clicks_on_nothing_become_button_events() {
    let rig = rig();
    let mut s = rig.session();
    s.create_context();
    rig.pointer(300, 190, true);
    s.poll();
    rig.pointer(300, 190, false);
    s.poll();
    let events = drain(&mut s);
    let classes: Vec<_> = events.iter().map(|e| e.class).collect();
    assert_eq!(classes, [Class::ButtonDown, Class::ButtonUp]);
    assert_eq!((events[0].mouse_x, events[0].mouse_y), (300, 190));
}
