//! The line stepping rule shared by every engine.
//!
//! Both engines walk exactly this sequence of points, which is what makes
//! their output pixel-identical in all eight octants.

/// Iterator over the pixels of a 1-pixel line, endpoints included.
///
/// The line is split into a major axis (the longer delta) and a minor axis.
/// Every step advances the major axis; the minor axis advances whenever the
/// error term is non-negative, exactly like the accelerator's sign flag.
#[derive(Clone, Debug)]
pub struct LineSteps {
    x: i32,
    y: i32,
    sx: i32,
    sy: i32,
    x_major: bool,
    err: i32,
    dmin2: i32,
    dmax2: i32,
    remaining: i32,
    done: bool,
}

impl LineSteps {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let x_major = dx >= dy;
        let (dmax, dmin) = if x_major { (dx, dy) } else { (dy, dx) };
        Self {
            x: x1,
            y: y1,
            sx: if x2 < x1 { -1 } else { 1 },
            sy: if y2 < y1 { -1 } else { 1 },
            x_major,
            err: 2 * dmin - dmax,
            dmin2: 2 * dmin,
            dmax2: 2 * dmax,
            remaining: dmax,
            done: false,
        }
    }

    /// Octant number 0..=7, in the accelerator's encoding order.
    pub fn octant(&self) -> u8 {
        let mut octant = 0;
        if !self.x_major {
            octant |= 1;
        }
        if self.sx < 0 {
            octant |= 2;
        }
        if self.sy < 0 {
            octant |= 4;
        }
        octant
    }
}

impl Iterator for LineSteps {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let point = (self.x, self.y);
        if self.remaining == 0 {
            self.done = true;
            return Some(point);
        }
        if self.err >= 0 {
            if self.x_major {
                self.y += self.sy;
            } else {
                self.x += self.sx;
            }
            self.err -= self.dmax2;
        }
        self.err += self.dmin2;
        if self.x_major {
            self.x += self.sx;
        } else {
            self.y += self.sy;
        }
        self.remaining -= 1;
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn single_point_line() {
        let points: Vec<_> = LineSteps::new(3, 4, 3, 4).collect();
        assert_eq!(points, [(3, 4)]);
    }

    #[test]
    fn every_octant_reaches_its_endpoint() {
        let ends = [
            (7, 3),
            (3, 7),
            (-7, 3),
            (-3, 7),
            (7, -3),
            (3, -7),
            (-7, -3),
            (-3, -7),
        ];
        let mut octants = Vec::new();
        for (ex, ey) in ends {
            let steps = LineSteps::new(0, 0, ex, ey);
            octants.push(steps.octant());
            let points: Vec<_> = steps.collect();
            assert_eq!(points.first(), Some(&(0, 0)));
            assert_eq!(points.last(), Some(&(ex, ey)));
            assert_eq!(points.len() as i32, ex.abs().max(ey.abs()) + 1);
            for pair in points.windows(2) {
                assert!((pair[1].0 - pair[0].0).abs() <= 1);
                assert!((pair[1].1 - pair[0].1).abs() <= 1);
            }
        }
        octants.sort_unstable();
        octants.dedup();
        assert_eq!(octants.len(), 8);
    }
}
