//! Grid-space value types: the grid description, cells, spans and placements.

use std::fmt;

use padboard_ids::CardId;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    geom::{Insets, Size},
};

/// Largest grid, in cells, a [`GridSpec`] may describe. The occupancy index
/// allocates one slot per cell.
pub const MAX_CELLS: u64 = 1 << 20;

/// Dimensions and pixel pitch of a dashboard grid. Immutable for the life of
/// a layout session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Pixel size of a single cell.
    pub cell_size: Size,
    /// Pixel gap between neighbouring cells.
    pub spacing: f64,
    /// Pixel insets around the whole grid.
    pub insets: Insets,
}

impl GridSpec {
    /// A grid with square cells and no insets.
    #[must_use]
    pub const fn square(columns: u32, rows: u32, cell: f64, spacing: f64) -> Self {
        Self {
            columns,
            rows,
            cell_size: Size::new(cell, cell),
            spacing,
            insets: Insets::uniform(0.0),
        }
    }

    /// Reject specs that cannot describe a usable grid.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(Error::InvalidGridSpec(format!(
                "grid must have at least one row and column, got {}x{}",
                self.columns, self.rows
            )));
        }
        let cells = u64::from(self.columns) * u64::from(self.rows);
        if i32::try_from(self.columns).is_err()
            || i32::try_from(self.rows).is_err()
            || cells > MAX_CELLS
        {
            return Err(Error::InvalidGridSpec(format!(
                "grid {}x{} exceeds the {MAX_CELLS} cell limit",
                self.columns, self.rows
            )));
        }
        let Size { width, height } = self.cell_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidGridSpec(format!(
                "cell size must be positive, got {width}x{height}"
            )));
        }
        if !(self.spacing.is_finite() && self.spacing >= 0.0) {
            return Err(Error::InvalidGridSpec(format!(
                "spacing must be non-negative, got {}",
                self.spacing
            )));
        }
        let Insets {
            top,
            left,
            bottom,
            right,
        } = self.insets;
        if [top, left, bottom, right]
            .iter()
            .any(|v| !(v.is_finite() && *v >= 0.0))
        {
            return Err(Error::InvalidGridSpec(format!(
                "insets must be non-negative, got {:?}",
                self.insets
            )));
        }
        Ok(())
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// True when `cell` addresses a cell inside the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && i64::from(cell.row) < i64::from(self.rows)
            && i64::from(cell.col) < i64::from(self.columns)
    }

    /// True when the whole rectangle `pos .. pos + size` lies inside the grid.
    pub fn contains_span(&self, pos: Cell, size: Span) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && i64::from(pos.row) + i64::from(size.height) <= i64::from(self.rows)
            && i64::from(pos.col) + i64::from(size.width) <= i64::from(self.columns)
    }

    /// Row-major index of an in-bounds cell.
    #[inline]
    pub(crate) fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.row as usize * self.columns as usize + cell.col as usize)
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (rows, cols) = (self.rows as i32, self.columns as i32);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }
}

/// A grid cell addressed by zero-based `(row, col)`.
///
/// Coordinates are signed: committed placements always use in-bounds cells,
/// but a drag or resize candidate may point past an edge so that it can be
/// reported as invalid instead of silently clamped.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Cell {
    /// Zero-based row.
    pub row: i32,
    /// Zero-based column.
    pub col: i32,
}

impl Cell {
    /// Construct a cell.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offset by whole cells.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row.saturating_add(d_row),
            col: self.col.saturating_add(d_col),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Size of a placement in whole cells. Both axes are at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Span {
    /// Columns covered.
    pub width: u32,
    /// Rows covered.
    pub height: u32,
}

impl Span {
    /// The smallest placement size.
    pub const UNIT: Self = Self {
        width: 1,
        height: 1,
    };

    /// Construct a span, clamping each axis to at least one cell.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Number of cells covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::UNIT
    }
}

impl From<(u32, u32)> for Span {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl From<Span> for (u32, u32) {
    fn from(s: Span) -> Self {
        (s.width, s.height)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A card's claim on a rectangle of cells.
///
/// This is also the `(card, position, size)` tuple handed to the persistence
/// collaborator; the storage encoding is the collaborator's business.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Owning card.
    pub card: CardId,
    /// Top-left cell.
    pub pos: Cell,
    /// Size in cells.
    pub size: Span,
}

impl Placement {
    /// Construct a placement.
    #[must_use]
    pub fn new(card: impl Into<CardId>, pos: Cell, size: Span) -> Self {
        Self {
            card: card.into(),
            pos,
            size,
        }
    }

    /// The same card and size at another position.
    #[must_use]
    pub fn moved_to(&self, pos: Cell) -> Self {
        Self {
            card: self.card.clone(),
            pos,
            size: self.size,
        }
    }

    /// Bottom-right cell covered by the placement (inclusive).
    #[inline]
    pub fn last_cell(&self) -> Cell {
        self.pos.offset(
            self.size.height as i32 - 1,
            self.size.width as i32 - 1,
        )
    }

    /// Cells covered, row-major: `pos .. pos + size - 1` on each axis.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let Cell { row, col } = self.pos;
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        (row..row.saturating_add(h))
            .flat_map(move |r| (col..col.saturating_add(w)).map(move |c| Cell::new(r, c)))
    }

    /// True when the two placements share at least one cell.
    pub fn overlaps(&self, other: &Self) -> bool {
        let a = self.last_cell();
        let b = other.last_cell();
        self.pos.row <= b.row
            && other.pos.row <= a.row
            && self.pos.col <= b.col
            && other.pos.col <= a.col
    }
}
