use alloc::vec::Vec;

use crate::rect::Rect;

/// Lay out `count` items vertically from the top of `container`.
///
/// Each item is `item_height` tall and the full width of the container,
/// spaced `spacing` pixels apart.
pub fn v_stack(container: &Rect, item_height: i32, count: usize, spacing: i32) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(count);
    let mut y = container.y;
    for _ in 0..count {
        rects.push(Rect::new(container.x, y, container.w, item_height));
        y += item_height + spacing;
    }
    rects
}

/// Index of the row of a `v_stack` that covers `py`, clamped to the stack.
pub fn v_stack_index(container: &Rect, item_height: i32, count: usize, spacing: i32, py: i32) -> usize {
    let pitch = (item_height + spacing).max(1);
    let row = (py - container.y).max(0) / pitch;
    (row as usize).min(count.saturating_sub(1))
}

/// Center a rectangle of size (`w`, `h`) within `container`.
pub fn center(container: &Rect, w: i32, h: i32) -> Rect {
    Rect::new(
        container.x + (container.w - w) / 2,
        container.y + (container.h - h) / 2,
        w,
        h,
    )
}

/// Right-align a rectangle of size (`w`, `h`) within `container` with a right margin.
pub fn align_right(container: &Rect, w: i32, h: i32, margin: i32) -> Rect {
    Rect::new(
        container.x + container.w - w - margin,
        container.y + (container.h - h) / 2,
        w,
        h,
    )
}

/// Left-align a rectangle of size (`w`, `h`) within `container` with a left margin.
pub fn align_left(container: &Rect, w: i32, h: i32, margin: i32) -> Rect {
    Rect::new(container.x + margin, container.y + (container.h - h) / 2, w, h)
}
