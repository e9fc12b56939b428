//! Color types, pen indices and palettes.

use crate::bitmap::MAX_DEPTH;

/// A pen is an index into the palette. Bit `n` of the pen selects whether
/// plane `n` is set or cleared when the pen is drawn.
pub type Pen = u8;

/// An RGB color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Convert to pixel bytes based on pixel format (BGR or RGB).
    pub fn to_pixel_bytes(&self, bytes_per_pixel: usize, is_bgr: bool) -> [u8; 4] {
        let mut out = [0u8; 4];
        if bytes_per_pixel == 0 {
            return out;
        }

        let (c0, c1, c2) = if is_bgr {
            (self.b, self.g, self.r)
        } else {
            (self.r, self.g, self.b)
        };
        out[0] = c0;
        if bytes_per_pixel > 1 {
            out[1] = c1;
        }
        if bytes_per_pixel > 2 {
            out[2] = c2;
        }
        if bytes_per_pixel > 3 {
            out[3] = 0xFF;
        }
        out
    }
}

/// Color registers for a planar screen. Holds one entry per possible pen.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: [Color; 1 << MAX_DEPTH],
}

impl Palette {
    /// All registers black.
    pub const fn black() -> Self {
        Self {
            colors: [Color::BLACK; 1 << MAX_DEPTH],
        }
    }

    /// The classic four-color desktop palette: gray, black, white, blue.
    pub fn workbench() -> Self {
        let mut palette = Self::black();
        palette.set(0, Color::rgb(0xAA, 0xAA, 0xAA));
        palette.set(1, Color::BLACK);
        palette.set(2, Color::WHITE);
        palette.set(3, Color::rgb(0x66, 0x88, 0xBB));
        palette
    }

    pub fn set(&mut self, pen: Pen, color: Color) {
        self.colors[pen as usize] = color;
    }

    pub fn get(&self, pen: Pen) -> Color {
        self.colors[pen as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::workbench()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_to_pixel_bytes_rgb() {
        let color = Color::rgb(1, 2, 3);
        assert_eq!(color.to_pixel_bytes(3, false), [1, 2, 3, 0]);
        assert_eq!(color.to_pixel_bytes(4, false), [1, 2, 3, 0xFF]);
    }

    #[test]
    fn color_to_pixel_bytes_bgr() {
        let color = Color::rgb(1, 2, 3);
        assert_eq!(color.to_pixel_bytes(3, true), [3, 2, 1, 0]);
        assert_eq!(color.to_pixel_bytes(4, true), [3, 2, 1, 0xFF]);
    }

    #[test]
    fn workbench_palette_has_desktop_colors() {
        let palette = Palette::workbench();
        assert_eq!(palette.get(1), Color::BLACK);
        assert_eq!(palette.get(2), Color::WHITE);
        assert_eq!(palette.get(200), Color::BLACK);
    }
}
