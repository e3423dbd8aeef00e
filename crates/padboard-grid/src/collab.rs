//! Capability interfaces for the collaborators around the engine.
//!
//! Required capabilities are traits the board is constructed with; optional
//! ones are handler slots that are either present or absent from the moment
//! the board is wired. Nothing is probed at call time.

use std::fmt;

use padboard_ids::CardId;

use crate::{
    Result,
    grid::{Cell, Placement, Span},
};

/// Seeds the initial size of a newly created card from its domain hint.
pub trait DefaultSizer {
    /// Default size in cells for cards of `domain_hint`.
    fn default_grid_size(&self, domain_hint: &str) -> Span;
}

/// Sizer that gives every card the same size.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSizer(pub Span);

impl DefaultSizer for FixedSizer {
    fn default_grid_size(&self, _domain_hint: &str) -> Span {
        self.0
    }
}

/// Domain part of an entity id such as `light.kitchen`. Ids without a
/// separator are their own domain.
pub fn domain_of(entity_id: &str) -> &str {
    entity_id
        .split_once('.')
        .map_or(entity_id, |(domain, _)| domain)
}

/// Visual highlight surface driven by the active session.
pub trait Overlay {
    /// Highlight `cells`, marked valid or invalid.
    fn highlight(&mut self, cells: &[Cell], valid: bool);
    /// Remove any highlight.
    fn clear_highlight(&mut self);
}

/// Persistence collaborator. Only the placement tuple shape is defined here;
/// the encoding belongs to the implementation.
pub trait PlacementStore {
    /// Read the full placement list.
    fn load(&mut self) -> Result<Vec<Placement>>;
    /// Write the full placement list.
    fn save(&mut self, placements: &[Placement]) -> Result<()>;
}

/// Handler for committed moves.
pub type MoveHandler = Box<dyn FnMut(&CardId, Cell)>;
/// Handler for committed resizes: card, new size, new position.
pub type ResizeHandler = Box<dyn FnMut(&CardId, Span, Cell)>;
/// Handler for taps on free cells.
pub type TapHandler = Box<dyn FnMut(Cell)>;
/// Handler for changes in live candidate validity.
pub type ValidityHandler = Box<dyn FnMut(&[Cell], bool)>;

/// Optional callbacks emitted at the engine's commit points.
#[derive(Default)]
pub struct Handlers {
    /// Fired after a drag commits.
    pub on_move: Option<MoveHandler>,
    /// Fired after a resize commits.
    pub on_resize: Option<ResizeHandler>,
    /// Fired when a free cell is tapped.
    pub on_tap_empty_slot: Option<TapHandler>,
    /// Fired when the live candidate's cells or validity change.
    pub on_validity_changed: Option<ValidityHandler>,
    /// Highlight surface, if one is attached.
    pub overlay: Option<Box<dyn Overlay>>,
}

impl Handlers {
    /// No handlers attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a move handler.
    #[must_use]
    pub fn on_move(mut self, f: impl FnMut(&CardId, Cell) + 'static) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }

    /// Attach a resize handler.
    #[must_use]
    pub fn on_resize(mut self, f: impl FnMut(&CardId, Span, Cell) + 'static) -> Self {
        self.on_resize = Some(Box::new(f));
        self
    }

    /// Attach an empty-slot tap handler.
    #[must_use]
    pub fn on_tap_empty_slot(mut self, f: impl FnMut(Cell) + 'static) -> Self {
        self.on_tap_empty_slot = Some(Box::new(f));
        self
    }

    /// Attach a validity-change handler.
    #[must_use]
    pub fn on_validity_changed(mut self, f: impl FnMut(&[Cell], bool) + 'static) -> Self {
        self.on_validity_changed = Some(Box::new(f));
        self
    }

    /// Attach a highlight overlay.
    #[must_use]
    pub fn overlay(mut self, overlay: impl Overlay + 'static) -> Self {
        self.overlay = Some(Box::new(overlay));
        self
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("on_move", &self.on_move.is_some())
            .field("on_resize", &self.on_resize.is_some())
            .field("on_tap_empty_slot", &self.on_tap_empty_slot.is_some())
            .field("on_validity_changed", &self.on_validity_changed.is_some())
            .field("overlay", &self.overlay.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_split() {
        assert_eq!(domain_of("light.kitchen"), "light");
        assert_eq!(domain_of("sensor.outdoor.temp"), "sensor");
        assert_eq!(domain_of("weird"), "weird");
    }

    #[test]
    fn fixed_sizer_ignores_hint() {
        let s = FixedSizer(Span::new(2, 1));
        assert_eq!(s.default_grid_size("climate"), Span::new(2, 1));
    }

    #[test]
    fn debug_reports_presence() {
        let h = Handlers::new().on_move(|_, _| {});
        let text = format!("{h:?}");
        assert!(text.contains("on_move: true"));
        assert!(text.contains("on_resize: false"));
    }
}
