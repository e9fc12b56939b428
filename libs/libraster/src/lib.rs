//! libraster: planar raster primitives
//!
//! Pure drawing library over planar bitmaps. Lines, rectangle fills and
//! outlines, dithered ghosting fills, 8x8 text and batched polygon fills,
//! each available through a CPU engine and a word-oriented accelerator
//! engine with identical output. No hardware access; callers present the
//! bitmap themselves.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod area;
pub mod bitmap;
pub mod color;
pub mod engine;
pub mod font;
pub mod line;
pub mod rastport;

pub use area::{AreaError, AreaInfo, TmpRas};
pub use bitmap::BitMap;
pub use color::{Color, Palette, Pen};
pub use engine::{Backend, RasterEngine};
pub use rastport::{DrawMode, RastPort};
