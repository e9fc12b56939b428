//! Mirror the planar screen onto a linear framebuffer.

use libraster::{Palette, RastPort};

/// A chunky framebuffer as the boot firmware describes it.
pub struct FrameBuffer<'a> {
    pub buf: &'a mut [u8],
    /// Bytes per row.
    pub stride: usize,
    pub bytes_per_pixel: usize,
    pub is_bgr: bool,
}

/// Copy the screen to `fb` if anything was drawn since the last call.
/// Returns true when a copy happened.
pub fn present(rp: &mut RastPort, palette: &Palette, fb: &mut FrameBuffer<'_>) -> bool {
    if rp.bitmap_mut().take_dirty().is_none() {
        return false;
    }
    rp.bitmap()
        .write_chunky(palette, fb.buf, fb.stride, fb.bytes_per_pixel, fb.is_bgr);
    true
}
