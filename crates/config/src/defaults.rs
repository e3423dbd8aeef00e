//! Values used when the configuration omits a field.

/// Grid columns.
pub const COLUMNS: u32 = 4;
/// Grid rows.
pub const ROWS: u32 = 4;
/// Square cell size in pixels.
pub const CELL: f64 = 100.0;
/// Gap between cells in pixels.
pub const SPACING: f64 = 8.0;
