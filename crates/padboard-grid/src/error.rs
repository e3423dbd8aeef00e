use std::result::Result as StdResult;

use padboard_ids::CardId;
use thiserror::Error;

use crate::grid::{Cell, Span};

/// Convenient result type for the grid engine.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced by the grid engine.
///
/// Interactive rejections during a gesture never surface here: a session
/// keeps its last valid candidate and reports an invalid highlight instead.
/// These errors are returned by explicit calls (commit, insert, load, session
/// begin) so the caller can decide what to do.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The candidate overlaps another card.
    #[error("invalid placement for {card}: cell ({row}, {col}) is occupied by {occupant}", row = .cell.row, col = .cell.col)]
    InvalidPlacement {
        /// Card whose candidate was rejected.
        card: CardId,
        /// First conflicting cell in row-major order.
        cell: Cell,
        /// Card that already owns the cell.
        occupant: CardId,
    },

    /// The candidate lies partly or wholly outside the grid.
    #[error(
        "placement for {card} at ({row}, {col}) size {w}x{h} exceeds a {columns}x{rows} grid",
        row = .pos.row, col = .pos.col, w = .size.width, h = .size.height
    )]
    GridBoundsExceeded {
        /// Card whose candidate was rejected.
        card: CardId,
        /// Candidate top-left cell.
        pos: Cell,
        /// Candidate span.
        size: Span,
        /// Grid column count.
        columns: u32,
        /// Grid row count.
        rows: u32,
    },

    /// A session was requested for a card that already has one.
    #[error("card {card} already has an active {active} session")]
    ConcurrentSessionConflict {
        /// Card with the active session.
        card: CardId,
        /// Kind of the session that keeps running.
        active: &'static str,
    },

    /// A supplied placement set already violates the no-overlap invariant.
    #[error("overlap at ({row}, {col}) between {first} and {second}", row = .cell.row, col = .cell.col)]
    OverlapDetected {
        /// Shared cell.
        cell: Cell,
        /// Card that claimed the cell first.
        first: CardId,
        /// Card that claimed it second.
        second: CardId,
    },

    /// A supplied placement set lists the same card twice.
    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),

    /// No placement exists for the card.
    #[error("unknown card {0}")]
    UnknownCard(CardId),

    /// The card has no session of the requested kind.
    #[error("card {0} has no active session")]
    NoActiveSession(CardId),

    /// The grid configuration cannot describe a usable grid.
    #[error("invalid grid spec: {0}")]
    InvalidGridSpec(String),

    /// Drag and resize are disabled while the board is not in editing mode.
    #[error("editing is disabled")]
    EditingDisabled,

    /// The persistence collaborator failed to load or save.
    #[error("placement store error: {0}")]
    Store(String),
}
