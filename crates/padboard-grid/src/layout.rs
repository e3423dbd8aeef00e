//! Pure grid ↔ pixel geometry.
//!
//! The pitch of a cell is `cell_size + spacing` on each axis. A placement at
//! `pos` with `size` occupies
//!
//! ```text
//! origin = insets + pos * pitch
//! extent = size * cell_size + (size - 1) * spacing
//! ```
//!
//! so two placements that share no cell are separated by at least one
//! `spacing` gap and their frames never intersect.

use crate::{
    geom::{Point, Rect, Size},
    grid::{Cell, GridSpec, Placement, Span},
};

/// Layout math for one grid spec. Holds no mutable state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEngine {
    /// Spec the math is derived from.
    spec: GridSpec,
}

impl LayoutEngine {
    /// Layout for `spec`. The spec is assumed valid (see [`GridSpec::validate`]).
    #[must_use]
    pub const fn new(spec: GridSpec) -> Self {
        Self { spec }
    }

    /// Spec this layout was built from.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Distance between the origins of neighbouring cells.
    #[inline]
    pub fn pitch(&self) -> Size {
        Size::new(
            self.spec.cell_size.width + self.spec.spacing,
            self.spec.cell_size.height + self.spec.spacing,
        )
    }

    /// Pixel extent of a span of cells.
    pub fn span_size(&self, span: Span) -> Size {
        let s = &self.spec;
        Size::new(
            extent(span.width, s.cell_size.width, s.spacing),
            extent(span.height, s.cell_size.height, s.spacing),
        )
    }

    /// Frame of a span anchored at `cell`.
    pub fn frame_at(&self, cell: Cell, span: Span) -> Rect {
        let pitch = self.pitch();
        let size = self.span_size(span);
        Rect::new(
            self.spec.insets.left + f64::from(cell.col) * pitch.width,
            self.spec.insets.top + f64::from(cell.row) * pitch.height,
            size.width,
            size.height,
        )
    }

    /// Frame of a placement on the render surface.
    pub fn frame_for(&self, placement: &Placement) -> Rect {
        self.frame_at(placement.pos, placement.size)
    }

    /// Cell under `point`, without clamping to the grid. Points left of or
    /// above the grid yield negative coordinates.
    pub fn project_cell(&self, point: Point) -> Cell {
        let pitch = self.pitch();
        let col = ((point.x - self.spec.insets.left) / pitch.width).floor();
        let row = ((point.y - self.spec.insets.top) / pitch.height).floor();
        Cell::new(row as i32, col as i32)
    }

    /// Cell under `point`, clamped to `[0, rows) × [0, columns)`.
    pub fn point_to_cell(&self, point: Point) -> Cell {
        self.clamp(self.project_cell(point))
    }

    /// Clamp a cell into the grid.
    pub fn clamp(&self, cell: Cell) -> Cell {
        let max_row = self.spec.rows.saturating_sub(1) as i32;
        let max_col = self.spec.columns.saturating_sub(1) as i32;
        Cell::new(cell.row.clamp(0, max_row), cell.col.clamp(0, max_col))
    }

    /// Candidate anchor cell for a card of `span` whose floating frame is
    /// centred on `pointer`.
    ///
    /// The floating frame's top-left is `pointer - span_size / 2`; that point
    /// is rounded to the nearest cell origin (`floor(offset / pitch + 0.5)`).
    /// The result is not clamped, so a card dragged past an edge produces an
    /// out-of-bounds candidate.
    pub fn drag_anchor(&self, pointer: Point, span: Span) -> Cell {
        let pitch = self.pitch();
        let size = self.span_size(span);
        let ox = pointer.x - size.width / 2.0 - self.spec.insets.left;
        let oy = pointer.y - size.height / 2.0 - self.spec.insets.top;
        let col = (ox / pitch.width + 0.5).floor();
        let row = (oy / pitch.height + 0.5).floor();
        Cell::new(row as i32, col as i32)
    }

    /// Floating frame of a card of `span` centred on `pointer`.
    pub fn floating_frame(&self, pointer: Point, span: Span) -> Rect {
        let size = self.span_size(span);
        Rect::new(
            pointer.x - size.width / 2.0,
            pointer.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Convert a pixel delta into whole cells as `(rows, cols)`.
    ///
    /// Only completed cell boundaries count: the fraction is truncated toward
    /// zero on each axis.
    pub fn cells_delta(&self, dx: f64, dy: f64) -> (i32, i32) {
        let pitch = self.pitch();
        ((dy / pitch.height).trunc() as i32, (dx / pitch.width).trunc() as i32)
    }

    /// Origin of the cell nearest to `point`, clamped to the grid.
    pub fn snap_point(&self, point: Point) -> Point {
        let pitch = self.pitch();
        let col = ((point.x - self.spec.insets.left) / pitch.width).round();
        let row = ((point.y - self.spec.insets.top) / pitch.height).round();
        let cell = self.clamp(Cell::new(row as i32, col as i32));
        let r = self.frame_at(cell, Span::UNIT);
        Point::new(r.x, r.y)
    }

    /// Total pixel size of the grid, insets included.
    pub fn content_size(&self) -> Size {
        let s = &self.spec;
        Size::new(
            s.insets.left + extent(s.columns, s.cell_size.width, s.spacing) + s.insets.right,
            s.insets.top + extent(s.rows, s.cell_size.height, s.spacing) + s.insets.bottom,
        )
    }
}

/// Pixel extent of `n` cells of size `cell` separated by `spacing`.
#[inline]
fn extent(n: u32, cell: f64, spacing: f64) -> f64 {
    let n = f64::from(n.max(1));
    n * cell + (n - 1.0) * spacing
}
