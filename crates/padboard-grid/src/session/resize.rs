use padboard_ids::CardId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::{Feedback, SessionKind};
use crate::{
    Error, Result,
    geom::{Point, Rect},
    grid::{Cell, Placement, Span},
    layout::LayoutEngine,
    model::GridModel,
    validate,
};

/// Corner handle of a card. Dragging a handle moves that corner; the
/// opposite corner stays fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// Top-left handle.
    TopLeft,
    /// Top-right handle.
    TopRight,
    /// Bottom-left handle.
    BottomLeft,
    /// Bottom-right handle.
    BottomRight,
}

impl Corner {
    /// Corner that stays fixed while this handle moves.
    pub const fn anchor(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// True when the handle moves the left edge.
    const fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    /// True when the handle moves the top edge.
    const fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

/// Live state of an active resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeSession {
    /// Card being resized.
    pub card: CardId,
    /// Handle under the pointer.
    pub handle: Corner,
    /// Placement when the resize began.
    pub start: Placement,
    /// Whole-cell delta `(rows, cols)` of the current candidate.
    pub step: (i32, i32),
    /// Current candidate.
    pub candidate: Placement,
    /// Whether `candidate` passed validation.
    pub candidate_valid: bool,
    /// Most recent candidate that passed validation.
    pub last_valid: Option<Placement>,
}

/// Resize lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResizeState {
    /// No resize has started.
    #[default]
    Idle,
    /// Pointer is down on a handle.
    Resizing {
        /// Session data.
        session: ResizeSession,
        /// Pointer position when the handle was grabbed.
        origin: Point,
    },
    /// The resize ended with this placement.
    Committed(Placement),
    /// The resize was abandoned; the card kept this placement.
    Cancelled(Placement),
}

/// Terminal result of a resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The final placement, either the last valid candidate or the start
    /// placement when no candidate ever validated.
    Committed(Placement),
    /// The gesture was abandoned.
    Cancelled(Placement),
}

/// Four-corner resize state machine for a single card.
#[derive(Clone, Debug, Default)]
pub struct ResizeController {
    /// Current lifecycle state.
    state: ResizeState,
}

impl ResizeController {
    /// An idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    /// True while a handle is held.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&ResizeSession> {
        match &self.state {
            ResizeState::Resizing { session, .. } => Some(session),
            _ => None,
        }
    }

    /// Grab `handle` of `card` with the pointer at `pointer`.
    pub fn begin(
        &mut self,
        model: &GridModel,
        card: &CardId,
        handle: Corner,
        pointer: Point,
    ) -> Result<()> {
        if self.is_active() {
            return Err(Error::ConcurrentSessionConflict {
                card: card.clone(),
                active: SessionKind::Resize.as_str(),
            });
        }
        let start = model
            .placement(card)
            .cloned()
            .ok_or_else(|| Error::UnknownCard(card.clone()))?;
        debug!(card = %card, ?handle, pos = %start.pos, size = %start.size, "resize begin");
        self.state = ResizeState::Resizing {
            session: ResizeSession {
                card: card.clone(),
                handle,
                candidate: start.clone(),
                candidate_valid: true,
                start,
                step: (0, 0),
                last_valid: None,
            },
            origin: pointer,
        };
        Ok(())
    }

    /// Follow the pointer. Returns `None` when no resize is active.
    ///
    /// The candidate is recomputed and validated only when the pointer has
    /// crossed a whole-cell boundary since the last evaluation; in between,
    /// only the interpolated frame changes.
    pub fn update(
        &mut self,
        model: &GridModel,
        layout: &LayoutEngine,
        pointer: Point,
    ) -> Option<Feedback> {
        let ResizeState::Resizing { session, origin } = &mut self.state else {
            return None;
        };
        let (dx, dy) = (pointer.x - origin.x, pointer.y - origin.y);
        let step = layout.cells_delta(dx, dy);
        let fresh = session.last_valid.is_none() && step == (0, 0);
        if step != session.step || fresh {
            let candidate = reshape(&session.start, session.handle, step);
            let valid = validate::can_place(model, &candidate, Some(&session.card));
            trace!(
                card = %session.card,
                d_rows = step.0,
                d_cols = step.1,
                size = %candidate.size,
                pos = %candidate.pos,
                valid,
                "resize step"
            );
            if valid {
                session.last_valid = Some(candidate.clone());
            }
            session.step = step;
            session.candidate = candidate;
            session.candidate_valid = valid;
        }
        let frame = interpolate(layout, &session.start, session.handle, dx, dy);
        Some(Feedback::new(
            session.candidate.clone(),
            session.candidate_valid,
            frame,
        ))
    }

    /// Release the handle: commit the last valid candidate, or keep the start
    /// placement if none ever validated. Returns `None` when no resize is
    /// active.
    pub fn end(&mut self, model: &mut GridModel) -> Option<ResizeOutcome> {
        let ResizeState::Resizing { session, .. } = &self.state else {
            return None;
        };
        let ResizeSession {
            card,
            start,
            last_valid,
            ..
        } = session.clone();
        let fin = match last_valid {
            Some(candidate) => match model.commit(candidate.clone()) {
                Ok(()) => candidate,
                Err(err) => {
                    warn!(card = %card, %err, "resize commit rejected");
                    start
                }
            },
            None => start,
        };
        info!(card = %card, size = %fin.size, pos = %fin.pos, "resize committed");
        self.state = ResizeState::Committed(fin.clone());
        Some(ResizeOutcome::Committed(fin))
    }

    /// Abandon the resize. Idempotent in the same way as
    /// [`DragController::cancel`](super::DragController::cancel).
    pub fn cancel(&mut self) -> Option<ResizeOutcome> {
        match &self.state {
            ResizeState::Resizing { session, .. } => {
                debug!(card = %session.card, "resize cancelled");
                let start = session.start.clone();
                self.state = ResizeState::Cancelled(start.clone());
                Some(ResizeOutcome::Cancelled(start))
            }
            ResizeState::Cancelled(start) => Some(ResizeOutcome::Cancelled(start.clone())),
            ResizeState::Idle | ResizeState::Committed(_) => None,
        }
    }
}

/// Apply a whole-cell handle delta to `start`, keeping the anchored corner
/// fixed and the size at least 1x1.
pub(crate) fn reshape(start: &Placement, handle: Corner, (d_rows, d_cols): (i32, i32)) -> Placement {
    let (col, width) = edge(
        start.pos.col,
        start.size.width,
        d_cols,
        handle.moves_left(),
    );
    let (row, height) = edge(
        start.pos.row,
        start.size.height,
        d_rows,
        handle.moves_top(),
    );
    Placement {
        card: start.card.clone(),
        pos: Cell::new(row, col),
        size: Span::new(width, height),
    }
}

/// Move one edge of the span `[pos, pos + len)` by `delta` cells. A leading
/// edge moves the position and shrinks the length; a trailing edge only
/// changes the length. The length never drops below one.
fn edge(pos: i32, len: u32, delta: i32, leading: bool) -> (i32, u32) {
    let (pos, len, delta) = (i64::from(pos), i64::from(len), i64::from(delta));
    let (new_pos, new_len) = if leading {
        let d = delta.min(len - 1);
        (pos + d, len - d)
    } else {
        (pos, (len + delta).max(1))
    };
    (
        new_pos.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
        new_len.clamp(1, i64::from(u32::MAX)) as u32,
    )
}

/// Start frame stretched by the raw pointer delta on the handle's edges,
/// never smaller than one cell.
fn interpolate(layout: &LayoutEngine, start: &Placement, handle: Corner, dx: f64, dy: f64) -> Rect {
    let r = layout.frame_for(start);
    let cell = layout.spec().cell_size;
    let (x, w) = stretch(r.x, r.w, dx, cell.width, handle.moves_left());
    let (y, h) = stretch(r.y, r.h, dy, cell.height, handle.moves_top());
    Rect::new(x, y, w, h)
}

/// Pixel analogue of [`edge`].
fn stretch(pos: f64, len: f64, delta: f64, min: f64, leading: bool) -> (f64, f64) {
    if leading {
        let d = delta.min(len - min);
        (pos + d, len - d)
    } else {
        (pos, (len + delta).max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    fn setup(placements: Vec<Placement>) -> (GridModel, LayoutEngine) {
        let spec = GridSpec::square(4, 4, 100.0, 8.0);
        let mut m = GridModel::new(spec).unwrap();
        m.rebuild_occupancy(placements).unwrap();
        (m, LayoutEngine::new(spec))
    }

    #[test]
    fn anchors_are_opposite() {
        for c in [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ] {
            assert_ne!(c, c.anchor());
            assert_eq!(c.anchor().anchor(), c);
        }
    }

    #[test]
    fn reshape_keeps_anchor_fixed() {
        let p = Placement::new("a", Cell::new(1, 1), Span::new(2, 2));
        let br = reshape(&p, Corner::BottomRight, (1, 1));
        assert_eq!((br.pos, br.size), (Cell::new(1, 1), Span::new(3, 3)));
        let tl = reshape(&p, Corner::TopLeft, (-1, -1));
        assert_eq!((tl.pos, tl.size), (Cell::new(0, 0), Span::new(3, 3)));
        assert_eq!(tl.last_cell(), p.last_cell());
        let tr = reshape(&p, Corner::TopRight, (1, -1));
        assert_eq!((tr.pos, tr.size), (Cell::new(2, 1), Span::new(1, 1)));
        let bl = reshape(&p, Corner::BottomLeft, (0, 5));
        assert_eq!((bl.pos, bl.size), (Cell::new(1, 2), Span::new(1, 2)));
    }

    #[test]
    fn reshape_clamps_to_one_cell() {
        let p = Placement::new("a", Cell::new(0, 0), Span::new(2, 2));
        let s = reshape(&p, Corner::BottomRight, (-9, -9));
        assert_eq!(s.size, Span::UNIT);
        assert_eq!(s.pos, Cell::new(0, 0));
    }

    #[test]
    fn fractional_motion_is_not_evaluated() {
        let (m, l) = setup(vec![Placement::new("a", Cell::new(0, 0), Span::UNIT)]);
        let a = CardId::new("a");
        let mut r = ResizeController::new();
        r.begin(&m, &a, Corner::BottomRight, Point::new(100.0, 100.0))
            .unwrap();
        let fb = r.update(&m, &l, Point::new(150.0, 150.0)).unwrap();
        assert_eq!(fb.candidate.size, Span::UNIT);
        assert_eq!(fb.frame, Rect::new(0.0, 0.0, 150.0, 150.0));
        let fb = r.update(&m, &l, Point::new(208.0, 150.0)).unwrap();
        assert_eq!(fb.candidate.size, Span::new(2, 1));
        assert!(fb.valid);
    }

    #[test]
    fn invalid_step_keeps_previous_candidate() {
        let (mut m, l) = setup(vec![
            Placement::new("a", Cell::new(0, 0), Span::UNIT),
            Placement::new("b", Cell::new(0, 2), Span::UNIT),
        ]);
        let a = CardId::new("a");
        let mut r = ResizeController::new();
        r.begin(&m, &a, Corner::BottomRight, Point::new(100.0, 100.0))
            .unwrap();
        assert!(r.update(&m, &l, Point::new(210.0, 100.0)).unwrap().valid);
        assert!(!r.update(&m, &l, Point::new(320.0, 100.0)).unwrap().valid);
        let out = r.end(&mut m).unwrap();
        assert_eq!(
            out,
            ResizeOutcome::Committed(Placement::new("a", Cell::new(0, 0), Span::new(2, 1)))
        );
    }

    #[test]
    fn end_without_valid_keeps_start() {
        let (mut m, l) = setup(vec![
            Placement::new("a", Cell::new(0, 0), Span::UNIT),
            Placement::new("b", Cell::new(0, 1), Span::UNIT),
        ]);
        let a = CardId::new("a");
        let mut r = ResizeController::new();
        r.begin(&m, &a, Corner::TopRight, Point::new(100.0, 0.0))
            .unwrap();
        assert!(!r.update(&m, &l, Point::new(220.0, 0.0)).unwrap().valid);
        let out = r.end(&mut m).unwrap();
        assert_eq!(
            out,
            ResizeOutcome::Committed(Placement::new("a", Cell::new(0, 0), Span::UNIT))
        );
    }

    #[test]
    fn cancel_after_valid_step_keeps_start() {
        let start = Placement::new("a", Cell::new(0, 0), Span::UNIT);
        let (mut m, l) = setup(vec![start.clone()]);
        let a = CardId::new("a");
        let mut r = ResizeController::new();
        r.begin(&m, &a, Corner::BottomRight, Point::new(100.0, 100.0))
            .unwrap();
        let fb = r.update(&m, &l, Point::new(210.0, 215.0)).unwrap();
        assert!(fb.valid);
        assert_eq!(fb.candidate.size, Span::new(2, 2));
        let revision = m.revision();

        let out = r.cancel();
        assert_eq!(out, Some(ResizeOutcome::Cancelled(start.clone())));
        assert_eq!(r.cancel(), out);
        assert_eq!(r.end(&mut m), None);
        assert_eq!(m.placement(&a), Some(&start));
        assert_eq!(m.revision(), revision);
        assert_eq!(m.occupant_at(Cell::new(1, 1)), None);
    }

    #[test]
    fn top_left_handle_moves_origin() {
        let (mut m, l) = setup(vec![Placement::new("a", Cell::new(2, 2), Span::UNIT)]);
        let a = CardId::new("a");
        let mut r = ResizeController::new();
        r.begin(&m, &a, Corner::TopLeft, Point::new(216.0, 216.0))
            .unwrap();
        let fb = r.update(&m, &l, Point::new(0.0, 100.0)).unwrap();
        assert_eq!(fb.candidate.pos, Cell::new(1, 0));
        assert_eq!(fb.candidate.size, Span::new(3, 2));
        r.end(&mut m).unwrap();
        for cell in [Cell::new(1, 0), Cell::new(2, 2), Cell::new(1, 2)] {
            assert_eq!(m.occupant_at(cell), Some(&a));
        }
    }

    #[test]
    fn second_begin_conflicts() {
        let (m, _) = setup(vec![Placement::new("a", Cell::new(0, 0), Span::UNIT)]);
        let a = CardId::new("a");
        let mut r = ResizeController::new();
        r.begin(&m, &a, Corner::BottomRight, Point::default())
            .unwrap();
        let err = r
            .begin(&m, &a, Corner::TopLeft, Point::default())
            .unwrap_err();
        assert!(matches!(err, Error::ConcurrentSessionConflict { .. }));
        assert_eq!(r.session().unwrap().handle, Corner::BottomRight);
    }
}
