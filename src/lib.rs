//! Firmware glue for the gadget toolkit.
//!
//! Interrupt handlers feed [`input::InputRing`], [`input::MouseLatch`] and
//! [`clock::VblankClock`]; [`platform::Firmware`] bundles them into the
//! `Platform` a `libgadget::Session` polls. [`logger`] routes the `log`
//! facade to a serial sink and [`heap`] brings up the global allocator on
//! bare-metal targets.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod clock;
pub mod display;
pub mod heap;
pub mod input;
pub mod logger;
pub mod platform;

pub use clock::VblankClock;
pub use input::{InputRing, MouseLatch};
pub use platform::Firmware;
