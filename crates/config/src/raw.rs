//! Deserialization shapes for the configuration file. Every field is
//! optional; [`RawConfig::resolve`] fills defaults and validates.

use std::collections::BTreeMap;

use padboard_grid::{BoardOptions, GridModel, GridSpec, Insets, Placement, Size, Span};
use serde::Deserialize;

use crate::{Config, Error, SizeTable, defaults};

/// Cell size: a single number for square cells, or `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    /// Square cells.
    Square(f64),
    /// Rectangular cells.
    Rect(f64, f64),
}

impl RawCell {
    /// Pixel size of one cell.
    fn size(self) -> Size {
        match self {
            Self::Square(v) => Size::new(v, v),
            Self::Rect(w, h) => Size::new(w, h),
        }
    }
}

/// Insets: a single number for all edges, or a per-edge record.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawInsets {
    /// Same inset on every edge.
    Uniform(f64),
    /// Explicit edges; omitted edges are zero.
    Edges(RawEdges),
}

/// Per-edge insets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawEdges {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Right edge.
    pub right: f64,
}

impl RawInsets {
    /// Resolved insets.
    fn insets(self) -> Insets {
        match self {
            Self::Uniform(v) => Insets::uniform(v),
            Self::Edges(e) => Insets {
                top: e.top,
                left: e.left,
                bottom: e.bottom,
                right: e.right,
            },
        }
    }
}

/// Grid geometry section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawGrid {
    /// Column count.
    pub columns: Option<u32>,
    /// Row count.
    pub rows: Option<u32>,
    /// Cell size in pixels.
    pub cell: Option<RawCell>,
    /// Gap between cells in pixels.
    pub spacing: Option<f64>,
    /// Insets around the grid.
    pub insets: Option<RawInsets>,
}

impl RawGrid {
    /// Grid spec with defaults applied. Not yet validated.
    fn spec(&self) -> GridSpec {
        GridSpec {
            columns: self.columns.unwrap_or(defaults::COLUMNS),
            rows: self.rows.unwrap_or(defaults::ROWS),
            cell_size: self
                .cell
                .map_or(Size::new(defaults::CELL, defaults::CELL), RawCell::size),
            spacing: self.spacing.unwrap_or(defaults::SPACING),
            insets: self
                .insets
                .map_or(Insets::uniform(0.0), RawInsets::insets),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Grid geometry.
    pub grid: RawGrid,
    /// Editing and empty-slot switches.
    pub board: BoardOptions,
    /// Size for domains without an entry in `sizes`.
    pub default_size: Option<Span>,
    /// Default size per entity domain, e.g. `"climate": (2, 2)`.
    pub sizes: BTreeMap<String, Span>,
    /// Cards to seed the board with.
    pub cards: Vec<Placement>,
}

impl RawConfig {
    /// Apply defaults and check the result describes a usable board.
    pub fn resolve(self) -> Result<Config, Error> {
        let grid = self.grid.spec();
        grid.validate()
            .map_err(|e| Error::invalid("grid", e.to_string()))?;

        let fallback = self.default_size.unwrap_or(Span::UNIT);
        check_fits(&grid, "default_size", fallback)?;
        for (domain, size) in &self.sizes {
            check_fits(&grid, &format!("sizes.{domain}"), *size)?;
        }

        // Seed cards must form a consistent board on their own.
        let mut model =
            GridModel::new(grid).map_err(|e| Error::invalid("grid", e.to_string()))?;
        model
            .rebuild_occupancy(self.cards.clone())
            .map_err(|e| Error::invalid("cards", e.to_string()))?;

        Ok(Config {
            grid,
            board: self.board,
            sizes: SizeTable::new(fallback, self.sizes),
            cards: self.cards,
        })
    }
}

/// A default size larger than the grid could never be placed.
fn check_fits(grid: &GridSpec, field: &str, size: Span) -> Result<(), Error> {
    if size.width > grid.columns || size.height > grid.rows {
        return Err(Error::invalid(
            field,
            format!(
                "size {size} does not fit a {}x{} grid",
                grid.columns, grid.rows
            ),
        ));
    }
    Ok(())
}
