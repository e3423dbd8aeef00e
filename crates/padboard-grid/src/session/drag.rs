use padboard_ids::CardId;
use tracing::{debug, info, trace, warn};

use super::{Feedback, SessionKind};
use crate::{
    Error, Result,
    geom::Point,
    grid::Placement,
    layout::LayoutEngine,
    model::GridModel,
    validate,
};

/// Live state of an active drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    /// Card being dragged.
    pub card: CardId,
    /// Placement when the drag began.
    pub start: Placement,
    /// Most recent candidate, valid or not.
    pub candidate: Option<Placement>,
    /// Most recent candidate that passed validation.
    pub last_valid: Option<Placement>,
}

/// Drag lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag has started.
    #[default]
    Idle,
    /// Pointer is down and moving.
    Dragging(DragSession),
    /// The drag committed this placement.
    Committed(Placement),
    /// The drag ended without a change; the card kept this placement.
    Cancelled(Placement),
}

/// Terminal result of a drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// The last valid candidate was committed.
    Committed(Placement),
    /// Nothing was committed; the card is back at its start placement.
    Cancelled(Placement),
}

/// Reposition state machine for a single card.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    /// Current lifecycle state.
    state: DragState,
}

impl DragController {
    /// An idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// True while the pointer is down.
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(s) => Some(s),
            _ => None,
        }
    }

    /// Start dragging `card` from its current placement.
    pub fn begin(&mut self, model: &GridModel, card: &CardId) -> Result<()> {
        if self.is_active() {
            return Err(Error::ConcurrentSessionConflict {
                card: card.clone(),
                active: SessionKind::Drag.as_str(),
            });
        }
        let start = model
            .placement(card)
            .cloned()
            .ok_or_else(|| Error::UnknownCard(card.clone()))?;
        debug!(card = %card, pos = %start.pos, size = %start.size, "drag begin");
        self.state = DragState::Dragging(DragSession {
            card: card.clone(),
            start,
            candidate: None,
            last_valid: None,
        });
        Ok(())
    }

    /// Evaluate the candidate under `pointer`. Returns `None` when no drag is
    /// active.
    ///
    /// A valid candidate becomes the new last valid candidate; an invalid one
    /// is reported but leaves the last valid candidate alone.
    pub fn update(
        &mut self,
        model: &GridModel,
        layout: &LayoutEngine,
        pointer: Point,
    ) -> Option<Feedback> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        let size = session.start.size;
        let candidate = session
            .start
            .moved_to(layout.drag_anchor(pointer, size));
        let valid = validate::can_place(model, &candidate, Some(&session.card));
        trace!(
            card = %session.card,
            row = candidate.pos.row,
            col = candidate.pos.col,
            valid,
            "drag update"
        );
        if valid {
            session.last_valid = Some(candidate.clone());
        }
        session.candidate = Some(candidate.clone());
        Some(Feedback::new(
            candidate,
            valid,
            layout.floating_frame(pointer, size),
        ))
    }

    /// Pointer released: commit the last valid candidate, if there is one.
    /// Returns `None` when no drag is active.
    ///
    /// The commit re-runs validation against the current model; if the grid
    /// changed underneath the drag and the candidate no longer fits, the drag
    /// ends cancelled.
    pub fn end(&mut self, model: &mut GridModel) -> Option<DragOutcome> {
        let DragState::Dragging(session) = &self.state else {
            return None;
        };
        let DragSession {
            card,
            start,
            last_valid,
            ..
        } = session.clone();
        let outcome = match last_valid {
            Some(candidate) => match model.commit(candidate.clone()) {
                Ok(()) => {
                    info!(card = %card, from = %start.pos, to = %candidate.pos, "drag committed");
                    DragOutcome::Committed(candidate)
                }
                Err(err) => {
                    warn!(card = %card, %err, "drag commit rejected");
                    DragOutcome::Cancelled(start)
                }
            },
            None => {
                debug!(card = %card, "drag ended without a valid candidate");
                DragOutcome::Cancelled(start)
            }
        };
        self.state = match &outcome {
            DragOutcome::Committed(p) => DragState::Committed(p.clone()),
            DragOutcome::Cancelled(p) => DragState::Cancelled(p.clone()),
        };
        Some(outcome)
    }

    /// Abandon the drag. The model was never touched, so the card simply
    /// keeps its start placement. Cancelling an already cancelled drag
    /// returns the same outcome again; cancelling an idle or committed
    /// controller returns `None`.
    pub fn cancel(&mut self) -> Option<DragOutcome> {
        match &self.state {
            DragState::Dragging(session) => {
                debug!(card = %session.card, "drag cancelled");
                let start = session.start.clone();
                self.state = DragState::Cancelled(start.clone());
                Some(DragOutcome::Cancelled(start))
            }
            DragState::Cancelled(start) => Some(DragOutcome::Cancelled(start.clone())),
            DragState::Idle | DragState::Committed(_) => None,
        }
    }
}
