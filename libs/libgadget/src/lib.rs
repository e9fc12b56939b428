//! libgadget: bare-metal gadget toolkit
//!
//! Buttons, checkboxes, text and integer fields, radio groups, list views
//! and text labels drawn with libraster, configured through tag lists and
//! driven by a polling session that turns keyboard and pointer input into a
//! bounded event queue. No hardware access; the host supplies input and
//! time through [`InputSource`] and [`Clock`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod attrs;
pub mod config;
mod create;
pub mod editor;
pub mod error;
pub mod event;
mod focus;
pub mod gadget;
pub mod input;
mod keyboard;
pub mod layout;
pub mod mouse;
pub mod qualifier;
pub mod rect;
pub mod session;
pub mod strinfo;
pub mod tags;
pub mod text;
pub mod theme;
pub mod widget;

#[cfg(test)]
mod testing;

pub use attrs::{Attr, AttrQuery, AttrValue};
pub use config::{DropPolicy, SessionConfig};
pub use error::Error;
pub use event::{Class, Event, QueuedEvent};
pub use gadget::{Gadget, GadgetFlags, GadgetId, GadgetKind, Kind, NewGadget, Place};
pub use input::{Clock, InputSource, Platform, PointerState, Symbol, TimeVal};
pub use qualifier::Qualifier;
pub use rect::Rect;
pub use session::Session;
pub use strinfo::{EditError, StringInfo};
pub use tags::{Align, Tag};
pub use text::{IntuiText, TextRun};
pub use theme::Theme;
