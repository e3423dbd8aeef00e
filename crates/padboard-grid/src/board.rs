//! The hosting screen's view of the grid: model, layout, sessions and
//! collaborators in one owner.

use std::{collections::HashMap, fmt};

use padboard_ids::CardId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    collab::{DefaultSizer, Handlers, PlacementStore},
    geom::{Point, Rect, Size, point_in_rect},
    grid::{Cell, GridSpec, Placement, Span},
    layout::LayoutEngine,
    model::GridModel,
    session::{
        Corner, DragController, DragOutcome, Feedback, ResizeController, ResizeOutcome,
        SessionKind,
    },
    slots::EmptySlotTracker,
    validate,
};

/// Behaviour switches for a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    /// Allow drag and resize sessions.
    pub editing: bool,
    /// Expose free cells and forward taps on them.
    pub show_empty_slots: bool,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            editing: true,
            show_empty_slots: true,
        }
    }
}

/// The controller driving one card's active gesture.
#[derive(Debug)]
enum Controller {
    /// Reposition gesture.
    Drag(DragController),
    /// Resize gesture.
    Resize(ResizeController),
}

impl Controller {
    /// Kind of gesture.
    fn kind(&self) -> SessionKind {
        match self {
            Self::Drag(_) => SessionKind::Drag,
            Self::Resize(_) => SessionKind::Resize,
        }
    }

    /// Abandon the gesture.
    fn cancel(&mut self) {
        match self {
            Self::Drag(d) => {
                d.cancel();
            }
            Self::Resize(r) => {
                r.cancel();
            }
        }
    }
}

/// An active gesture plus the last validity signal it emitted.
#[derive(Debug)]
struct ActiveSession {
    /// Gesture state machine.
    controller: Controller,
    /// Cells and validity last reported through `on_validity_changed`.
    last_signal: Option<(Vec<Cell>, bool)>,
}

/// A dashboard grid and everything that mutates it.
///
/// Cards are referred to only by [`CardId`]. The board owns the model and all
/// sessions; at most one session exists per card, and different cards may
/// have sessions at the same time.
pub struct Board {
    /// Placements and occupancy.
    model: GridModel,
    /// Geometry for the model's spec.
    layout: LayoutEngine,
    /// Free cells, refreshed after each committed mutation.
    slots: EmptySlotTracker,
    /// Seeds the size of new cards.
    sizer: Box<dyn DefaultSizer>,
    /// Optional callbacks and overlay.
    handlers: Handlers,
    /// Behaviour switches.
    options: BoardOptions,
    /// Active gestures keyed by card.
    sessions: HashMap<CardId, ActiveSession>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("model", &self.model)
            .field("options", &self.options)
            .field("handlers", &self.handlers)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Wire a new, empty board.
    pub fn new(
        spec: GridSpec,
        options: BoardOptions,
        sizer: impl DefaultSizer + 'static,
        handlers: Handlers,
    ) -> Result<Self> {
        let model = GridModel::new(spec)?;
        let slots = EmptySlotTracker::for_model(&model);
        debug!(?options, ?handlers, "board wired");
        Ok(Self {
            layout: LayoutEngine::new(spec),
            model,
            slots,
            sizer: Box::new(sizer),
            handlers,
            options,
            sessions: HashMap::new(),
        })
    }

    /// Grid model (read-only).
    pub fn model(&self) -> &GridModel {
        &self.model
    }

    /// Layout math.
    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Current options.
    pub fn options(&self) -> BoardOptions {
        self.options
    }

    /// Current placements, in insertion order.
    pub fn placements(&self) -> &[Placement] {
        self.model.placements()
    }

    /// Placement of `card`.
    pub fn placement(&self, card: &CardId) -> Option<&Placement> {
        self.model.placement(card)
    }

    /// Replace every placement, e.g. on initial load. Active sessions are
    /// cancelled first. On error the board is unchanged apart from the
    /// cancelled sessions.
    pub fn load_placements(&mut self, placements: Vec<Placement>) -> Result<()> {
        self.cancel_all();
        self.model.rebuild_occupancy(placements)?;
        self.after_commit();
        info!(cards = self.model.placements().len(), "placements loaded");
        Ok(())
    }

    /// Load placements from the persistence collaborator.
    pub fn load(&mut self, store: &mut dyn PlacementStore) -> Result<()> {
        let placements = store.load()?;
        self.load_placements(placements)
    }

    /// Write the current placements to the persistence collaborator.
    pub fn save(&self, store: &mut dyn PlacementStore) -> Result<()> {
        store.save(self.model.placements())
    }

    /// Create a card at `at`, sized by the [`DefaultSizer`] for
    /// `domain_hint`. Falls back to a single cell when the default size does
    /// not fit there.
    pub fn add_card(&mut self, card: CardId, domain_hint: &str, at: Cell) -> Result<Placement> {
        let preferred = self.sizer.default_grid_size(domain_hint);
        let mut placement = Placement {
            card,
            pos: at,
            size: preferred,
        };
        if preferred != Span::UNIT
            && validate::check(&self.model, &placement, None).is_err()
        {
            debug!(
                card = %placement.card,
                preferred = %preferred,
                "default size does not fit, using one cell"
            );
            placement.size = Span::UNIT;
        }
        self.model.insert(placement.clone())?;
        self.after_commit();
        Ok(placement)
    }

    /// Remove a card, cancelling any session it has.
    pub fn remove_card(&mut self, card: &CardId) -> Result<Placement> {
        if let Some(mut s) = self.sessions.remove(card) {
            s.controller.cancel();
            self.clear_overlay();
        }
        let removed = self.model.remove(card)?;
        self.after_commit();
        Ok(removed)
    }

    /// Turn editing on or off. Turning it off cancels every active session.
    pub fn set_editing(&mut self, editing: bool) {
        if !editing {
            self.cancel_all();
        }
        self.options.editing = editing;
    }

    /// Show or hide empty-slot affordances.
    pub fn set_show_empty_slots(&mut self, show: bool) {
        self.options.show_empty_slots = show;
    }

    /// Free cells available for new cards. Empty when slots are hidden.
    pub fn empty_slots(&self) -> &[Cell] {
        if self.options.show_empty_slots {
            self.slots.slots()
        } else {
            &[]
        }
    }

    /// Resolve a tap at a pixel position.
    pub fn tap(&mut self, point: Point) -> Option<Cell> {
        let cell = self.layout.project_cell(point);
        self.tap_cell(cell)
    }

    /// Resolve a tap on a cell. Free cells are forwarded unchanged to
    /// `on_tap_empty_slot` and returned.
    pub fn tap_cell(&mut self, cell: Cell) -> Option<Cell> {
        if !self.options.show_empty_slots {
            return None;
        }
        let slot = self.slots.tap(cell)?;
        debug!(row = slot.row, col = slot.col, "empty slot tapped");
        if let Some(f) = self.handlers.on_tap_empty_slot.as_mut() {
            f(slot);
        }
        Some(slot)
    }

    /// Card whose frame contains `point`. Points in the spacing between
    /// cards hit nothing.
    pub fn card_at(&self, point: Point) -> Option<&CardId> {
        self.model
            .placements()
            .iter()
            .find(|p| point_in_rect(point.x, point.y, &self.layout.frame_for(p)))
            .map(|p| &p.card)
    }

    /// Frame of every card, for one layout pass of the render surface.
    pub fn frames(&self) -> Vec<(CardId, Rect)> {
        self.model
            .placements()
            .iter()
            .map(|p| (p.card.clone(), self.layout.frame_for(p)))
            .collect()
    }

    /// Frame of one card.
    pub fn frame_for(&self, card: &CardId) -> Option<Rect> {
        self.model.placement(card).map(|p| self.layout.frame_for(p))
    }

    /// Pixel size of the whole grid.
    pub fn content_size(&self) -> Size {
        self.layout.content_size()
    }

    /// Kind of the session `card` has, if any.
    pub fn active_session(&self, card: &CardId) -> Option<SessionKind> {
        self.sessions.get(card).map(|s| s.controller.kind())
    }

    /// Number of active sessions.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Start dragging `card`.
    pub fn begin_drag(&mut self, card: &CardId) -> Result<()> {
        self.ensure_can_begin(card)?;
        let mut d = DragController::new();
        d.begin(&self.model, card)?;
        self.sessions.insert(
            card.clone(),
            ActiveSession {
                controller: Controller::Drag(d),
                last_signal: None,
            },
        );
        Ok(())
    }

    /// Feed a pointer position to `card`'s drag.
    pub fn drag_to(&mut self, card: &CardId, pointer: Point) -> Result<Feedback> {
        let session = self
            .sessions
            .get_mut(card)
            .ok_or_else(|| Error::NoActiveSession(card.clone()))?;
        let Controller::Drag(d) = &mut session.controller else {
            return Err(Error::NoActiveSession(card.clone()));
        };
        let fb = d
            .update(&self.model, &self.layout, pointer)
            .ok_or_else(|| Error::NoActiveSession(card.clone()))?;
        signal(&mut self.handlers, &mut session.last_signal, &fb);
        Ok(fb)
    }

    /// Release `card`'s drag. A committed drag fires `on_move`.
    pub fn end_drag(&mut self, card: &CardId) -> Result<DragOutcome> {
        let mut d = match self.sessions.remove(card) {
            Some(ActiveSession {
                controller: Controller::Drag(d),
                ..
            }) => d,
            Some(other) => {
                self.sessions.insert(card.clone(), other);
                return Err(Error::NoActiveSession(card.clone()));
            }
            None => return Err(Error::NoActiveSession(card.clone())),
        };
        let outcome = d
            .end(&mut self.model)
            .ok_or_else(|| Error::NoActiveSession(card.clone()))?;
        self.clear_overlay();
        if let DragOutcome::Committed(p) = &outcome {
            self.after_commit();
            if let Some(f) = self.handlers.on_move.as_mut() {
                f(&p.card, p.pos);
            }
        }
        Ok(outcome)
    }

    /// Grab `handle` of `card` with the pointer at `pointer`.
    pub fn begin_resize(&mut self, card: &CardId, handle: Corner, pointer: Point) -> Result<()> {
        self.ensure_can_begin(card)?;
        let mut r = ResizeController::new();
        r.begin(&self.model, card, handle, pointer)?;
        self.sessions.insert(
            card.clone(),
            ActiveSession {
                controller: Controller::Resize(r),
                last_signal: None,
            },
        );
        Ok(())
    }

    /// Feed a pointer position to `card`'s resize.
    pub fn resize_to(&mut self, card: &CardId, pointer: Point) -> Result<Feedback> {
        let session = self
            .sessions
            .get_mut(card)
            .ok_or_else(|| Error::NoActiveSession(card.clone()))?;
        let Controller::Resize(r) = &mut session.controller else {
            return Err(Error::NoActiveSession(card.clone()));
        };
        let fb = r
            .update(&self.model, &self.layout, pointer)
            .ok_or_else(|| Error::NoActiveSession(card.clone()))?;
        signal(&mut self.handlers, &mut session.last_signal, &fb);
        Ok(fb)
    }

    /// Release `card`'s resize handle and fire `on_resize` with the final
    /// size and position.
    pub fn end_resize(&mut self, card: &CardId) -> Result<ResizeOutcome> {
        let mut r = match self.sessions.remove(card) {
            Some(ActiveSession {
                controller: Controller::Resize(r),
                ..
            }) => r,
            Some(other) => {
                self.sessions.insert(card.clone(), other);
                return Err(Error::NoActiveSession(card.clone()));
            }
            None => return Err(Error::NoActiveSession(card.clone())),
        };
        let outcome = r
            .end(&mut self.model)
            .ok_or_else(|| Error::NoActiveSession(card.clone()))?;
        self.clear_overlay();
        if let ResizeOutcome::Committed(p) = &outcome {
            self.after_commit();
            if let Some(f) = self.handlers.on_resize.as_mut() {
                f(&p.card, p.size, p.pos);
            }
        }
        Ok(outcome)
    }

    /// Cancel whatever session `card` has. Cancelling a card without a
    /// session is a no-op.
    pub fn cancel(&mut self, card: &CardId) {
        if let Some(mut s) = self.sessions.remove(card) {
            debug!(card = %card, kind = s.controller.kind().as_str(), "session cancelled");
            s.controller.cancel();
            self.clear_overlay();
        }
    }

    /// Cancel every active session.
    pub fn cancel_all(&mut self) {
        if self.sessions.is_empty() {
            return;
        }
        for (_, mut s) in self.sessions.drain() {
            s.controller.cancel();
        }
        self.clear_overlay();
    }

    /// Session-begin preconditions shared by drag and resize.
    fn ensure_can_begin(&self, card: &CardId) -> Result<()> {
        if !self.options.editing {
            return Err(Error::EditingDisabled);
        }
        if let Some(s) = self.sessions.get(card) {
            let active = s.controller.kind().as_str();
            warn!(card = %card, active, "session already active");
            return Err(Error::ConcurrentSessionConflict {
                card: card.clone(),
                active,
            });
        }
        if !self.model.contains(card) {
            return Err(Error::UnknownCard(card.clone()));
        }
        Ok(())
    }

    /// Bring derived state up to date after the model changed.
    fn after_commit(&mut self) {
        self.slots.refresh(&self.model);
    }

    /// Remove the overlay highlight once the last session has ended. The
    /// overlay is shared, so a session still running keeps it and repaints
    /// it on its next update.
    fn clear_overlay(&mut self) {
        if !self.sessions.is_empty() {
            return;
        }
        if let Some(o) = self.handlers.overlay.as_mut() {
            o.clear_highlight();
        }
    }
}

/// Push one update's feedback to the overlay, and to `on_validity_changed`
/// when the candidate's cells or validity differ from the last signal.
fn signal(handlers: &mut Handlers, last: &mut Option<(Vec<Cell>, bool)>, fb: &Feedback) {
    if let Some(o) = handlers.overlay.as_mut() {
        o.highlight(&fb.cells, fb.valid);
    }
    let changed = last
        .as_ref()
        .is_none_or(|(cells, valid)| *valid != fb.valid || *cells != fb.cells);
    if changed {
        if let Some(f) = handlers.on_validity_changed.as_mut() {
            f(&fb.cells, fb.valid);
        }
        *last = Some((fb.cells.clone(), fb.valid));
    }
}
