/// Axis-aligned rectangle for layout and hit testing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns true if the point (px, py) is inside this rectangle.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Returns a new rectangle shrunk by `padding` on all sides.
    pub fn inset(&self, padding: i32) -> Self {
        Self {
            x: self.x + padding,
            y: self.y + padding,
            w: self.w - padding * 2,
            h: self.h - padding * 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// One past the rightmost column.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Inclusive corner coordinates, the form the raster calls take.
    pub fn corners(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.right() - 1, self.bottom() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(10, 10));
        assert!(r.contains(14, 14));
        assert!(!r.contains(15, 14));
        assert!(!r.contains(9, 12));
    }

    #[test]
    fn inset_can_empty_a_rect() {
        assert!(Rect::new(0, 0, 4, 4).inset(2).is_empty());
        assert_eq!(Rect::new(0, 0, 10, 6).inset(1).corners(), (1, 1, 8, 4));
    }
}
