//! padboard-grid: placement engine for a dashboard of cards on a fixed grid.
//!
//! - [`GridModel`] owns placements and the occupancy derived from them.
//! - [`LayoutEngine`] converts between grid cells and pixels.
//! - [`validate`] decides whether a candidate placement is legal.
//! - [`EmptySlotTracker`] lists the free cells.
//! - [`DragController`] and [`ResizeController`] turn pointer input into
//!   validated commits.
//! - [`Board`] wires all of the above to the collaborators in [`collab`].
//!
//! Everything is synchronous and single-threaded; the caller drives the
//! engine with ordered gesture events.

mod board;
pub mod collab;
mod error;
pub mod geom;
mod grid;
mod layout;
mod model;
pub mod session;
mod slots;
pub mod test_support;
pub mod validate;

#[cfg(test)]
mod property_tests;

pub use board::{Board, BoardOptions};
pub use collab::{DefaultSizer, FixedSizer, Handlers, Overlay, PlacementStore, domain_of};
pub use error::{Error, Result};
pub use geom::{Insets, Point, Rect, Size};
pub use grid::{Cell, GridSpec, MAX_CELLS, Placement, Span};
pub use layout::LayoutEngine;
pub use model::{GridModel, OccupancyGrid};
pub use padboard_ids::CardId;
pub use session::{
    Corner, DragController, DragOutcome, DragState, Feedback, ResizeController, ResizeOutcome,
    ResizeState, SessionKind,
};
pub use slots::EmptySlotTracker;
