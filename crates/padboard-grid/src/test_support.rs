//! Recording collaborators for tests of `padboard-grid` consumers.

use std::{cell::RefCell, rc::Rc};

use padboard_ids::CardId;

use crate::{
    Error, Result,
    collab::{Handlers, Overlay, PlacementStore},
    grid::{Cell, Placement, Span},
};

/// One observable call out of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// `on_move`
    Move(CardId, Cell),
    /// `on_resize`
    Resize(CardId, Span, Cell),
    /// `on_tap_empty_slot`
    TapEmptySlot(Cell),
    /// `on_validity_changed`
    ValidityChanged(Vec<Cell>, bool),
    /// `Overlay::highlight`
    Highlight(Vec<Cell>, bool),
    /// `Overlay::clear_highlight`
    ClearHighlight,
}

/// Shared event log that can be wired in as every handler and the overlay.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// Events in call order.
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers that record into this recorder, overlay included.
    pub fn handlers(&self) -> Handlers {
        let (mv, rs, tap, val) = (
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        );
        Handlers::new()
            .on_move(move |card, pos| mv.push(Event::Move(card.clone(), pos)))
            .on_resize(move |card, size, pos| rs.push(Event::Resize(card.clone(), size, pos)))
            .on_tap_empty_slot(move |cell| tap.push(Event::TapEmptySlot(cell)))
            .on_validity_changed(move |cells, valid| {
                val.push(Event::ValidityChanged(cells.to_vec(), valid));
            })
            .overlay(self.clone())
    }

    /// Append an event.
    fn push(&self, ev: Event) {
        self.events.borrow_mut().push(ev);
    }

    /// Snapshot of all events so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Drain all events so far.
    pub fn take(&self) -> Vec<Event> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Number of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

impl Overlay for Recorder {
    fn highlight(&mut self, cells: &[Cell], valid: bool) {
        self.push(Event::Highlight(cells.to_vec(), valid));
    }

    fn clear_highlight(&mut self) {
        self.push(Event::ClearHighlight);
    }
}

/// In-memory persistence collaborator.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    /// Stored placements.
    pub placements: Vec<Placement>,
    /// Number of successful saves.
    pub saves: usize,
    /// Make `load` fail.
    pub fail_load: bool,
}

impl MemoryStore {
    /// A store pre-filled with `placements`.
    pub fn with(placements: Vec<Placement>) -> Self {
        Self {
            placements,
            ..Self::default()
        }
    }
}

impl PlacementStore for MemoryStore {
    fn load(&mut self) -> Result<Vec<Placement>> {
        if self.fail_load {
            return Err(Error::Store("load failed".into()));
        }
        Ok(self.placements.clone())
    }

    fn save(&mut self, placements: &[Placement]) -> Result<()> {
        self.placements = placements.to_vec();
        self.saves += 1;
        Ok(())
    }
}
