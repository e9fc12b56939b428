use libraster::Pen;

/// Pens used when rendering gadgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub background: Pen,
    pub text: Pen,
    /// Bright bevel edge.
    pub shine: Pen,
    /// Dark bevel edge.
    pub shadow: Pen,
    /// Selected interiors: pressed buttons, chosen radio boxes, list rows.
    pub fill: Pen,
    pub fill_text: Pen,
    /// Label text drawn over the window background.
    pub highlight_text: Pen,
    /// Horizontal gap between a gadget and its outside label.
    pub label_gap: i32,
    /// Left content inset of bordered text fields.
    pub field_inset: i32,
}

impl Theme {
    /// Four-colour layout matching [`libraster::Palette::workbench`]:
    /// 0 gray, 1 black, 2 white, 3 blue.
    pub fn workbench() -> Self {
        Self {
            background: 0,
            text: 1,
            shine: 2,
            shadow: 1,
            fill: 3,
            fill_text: 2,
            highlight_text: 2,
            label_gap: 8,
            field_inset: 4,
        }
    }

    /// Same layout with shine and shadow swapped, for dark palettes.
    pub fn inverted() -> Self {
        Self {
            shine: 1,
            shadow: 2,
            text: 2,
            highlight_text: 1,
            ..Self::workbench()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::workbench()
    }
}
