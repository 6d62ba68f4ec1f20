use ratatui::layout::Rect;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Maps the logical playfield onto a rectangle of terminal cells and back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    /// Logical units covered by one cell horizontally
    pub fn cell_width(&self) -> f32 {
        PLAYFIELD_WIDTH / self.area.width.max(1) as f32
    }

    /// Logical units covered by one cell vertically
    pub fn cell_height(&self) -> f32 {
        PLAYFIELD_HEIGHT / self.area.height.max(1) as f32
    }

    /// Centre of the given terminal cell in logical coordinates.
    /// Cells outside the area clamp to its edge.
    pub fn to_logical(&self, column: u16, row: u16) -> (f32, f32) {
        let col = column
            .saturating_sub(self.area.x)
            .min(self.area.width.saturating_sub(1));
        let row = row
            .saturating_sub(self.area.y)
            .min(self.area.height.saturating_sub(1));
        (
            (col as f32 + 0.5) * self.cell_width(),
            (row as f32 + 0.5) * self.cell_height(),
        )
    }

    /// Cell containing the logical point, or None when it is off the playfield
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..PLAYFIELD_WIDTH).contains(&x) || !(0.0..PLAYFIELD_HEIGHT).contains(&y) {
            return None;
        }
        let col = ((x / self.cell_width()) as u16).min(self.area.width.saturating_sub(1));
        let row = ((y / self.cell_height()) as u16).min(self.area.height.saturating_sub(1));
        Some((self.area.x + col, self.area.y + row))
    }

    /// Cell under a logical point, unclamped; may lie outside the area
    pub fn cell_origin(&self, x: f32, y: f32) -> (i32, i32) {
        (
            self.area.x as i32 + (x / self.cell_width()).floor() as i32,
            self.area.y as i32 + (y / self.cell_height()).floor() as i32,
        )
    }

    /// Cells spanned by a logical length along each axis, at least one
    pub fn span(&self, width: f32, height: f32) -> (u16, u16) {
        let cols = (width / self.cell_width()).round().max(1.0) as u16;
        let rows = (height / self.cell_height()).round().max(1.0) as u16;
        (cols, rows)
    }
}
