//! Free-cell tracking for "add card" affordances.

use tracing::trace;

use crate::{grid::Cell, model::GridModel};

/// Set of unoccupied cells, recomputed once per committed mutation.
#[derive(Clone, Debug, Default)]
pub struct EmptySlotTracker {
    /// Free cells, row-major.
    free: Vec<Cell>,
    /// Model revision the set was computed for.
    revision: Option<u64>,
}

impl EmptySlotTracker {
    /// An empty tracker; call [`refresh`](Self::refresh) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker already synchronised with `model`.
    pub fn for_model(model: &GridModel) -> Self {
        let mut t = Self::new();
        t.refresh(model);
        t
    }

    /// Recompute the free set if the model changed since the last refresh.
    /// Returns true when a recomputation happened.
    pub fn refresh(&mut self, model: &GridModel) -> bool {
        if self.revision == Some(model.revision()) {
            return false;
        }
        self.free = model
            .occupancy()
            .iter()
            .filter_map(|(cell, occ)| occ.is_none().then_some(cell))
            .collect();
        self.revision = Some(model.revision());
        trace!(free = self.free.len(), revision = model.revision(), "empty slots refreshed");
        true
    }

    /// Free cells in row-major order.
    pub fn slots(&self) -> &[Cell] {
        &self.free
    }

    /// Number of free cells.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// True when the grid is full.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// True when `cell` is free.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.free.binary_search(&cell).is_ok()
    }

    /// Resolve a tap: free cells are passed through unchanged, anything else
    /// yields `None`.
    pub fn tap(&self, cell: Cell) -> Option<Cell> {
        self.is_free(cell).then_some(cell)
    }
}
