//! Interactive gesture sessions.
//!
//! Each session is an explicit state machine that ends in exactly one
//! terminal outcome:
//!
//! ```text
//! Idle -> Dragging -> Committed | Cancelled
//! Idle -> Resizing -> Committed | Cancelled
//! ```
//!
//! Sessions read the [`GridModel`](crate::GridModel) on every update but only
//! write it once, through [`GridModel::commit`](crate::GridModel::commit), when
//! the gesture ends. Cancelling therefore never needs to undo anything.

mod drag;
mod resize;

pub use drag::{DragController, DragOutcome, DragSession, DragState};
pub use resize::{Corner, ResizeController, ResizeOutcome, ResizeSession, ResizeState};

use crate::{
    geom::Rect,
    grid::{Cell, Placement},
};

/// Feedback for one pointer update: what to highlight and where to draw the
/// card while it floats.
#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    /// Candidate evaluated for this update.
    pub candidate: Placement,
    /// Cells the candidate covers, row-major.
    pub cells: Vec<Cell>,
    /// Whether the candidate passed validation.
    pub valid: bool,
    /// Pixel frame of the floating or interpolated card.
    pub frame: Rect,
}

impl Feedback {
    /// Build feedback for `candidate`.
    fn new(candidate: Placement, valid: bool, frame: Rect) -> Self {
        Self {
            cells: candidate.cells().collect(),
            candidate,
            valid,
            frame,
        }
    }
}

/// Kind of session, for logging and conflict reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    /// Reposition gesture.
    Drag,
    /// Four-corner resize gesture.
    Resize,
}

impl SessionKind {
    /// Short lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Resize => "resize",
        }
    }
}
