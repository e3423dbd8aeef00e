//! Logging collaborators and board summaries.

use padboard_grid::{Board, Cell, Handlers, Overlay};
use tracing::{debug, info};

/// Overlay that logs what a render surface would draw.
#[derive(Debug, Default)]
pub struct LogOverlay;

impl Overlay for LogOverlay {
    fn highlight(&mut self, cells: &[Cell], valid: bool) {
        debug!(cells = %cell_list(cells), valid = bool_label(valid), "highlight");
    }

    fn clear_highlight(&mut self) {
        debug!("highlight cleared");
    }
}

/// Handlers that log every callback the board emits.
pub fn log_handlers() -> Handlers {
    Handlers::new()
        .on_move(|card, pos| info!(card = %card, pos = %pos, "moved"))
        .on_resize(|card, size, pos| info!(card = %card, size = %size, pos = %pos, "resized"))
        .on_tap_empty_slot(|cell| info!(cell = %cell, "empty slot tapped"))
        .on_validity_changed(|cells, valid| {
            info!(cells = %cell_list(cells), valid = bool_label(valid), "candidate changed");
        })
        .overlay(LogOverlay)
}

/// Log every card's frame and the free cells with a contextual label.
pub fn log_board(label: &str, board: &Board) {
    let size = board.content_size();
    let spec = board.model().spec();
    info!(
        label,
        columns = spec.columns,
        rows = spec.rows,
        width = size.width,
        height = size.height,
        cards = board.placements().len(),
        free = board.empty_slots().len(),
        editing = bool_label(board.options().editing),
        "Board"
    );
    for p in board.placements() {
        let r = board.layout().frame_for(p);
        info!(
            label,
            card = %p.card,
            pos = %p.pos,
            size = %p.size,
            x = r.x,
            y = r.y,
            w = r.w,
            h = r.h,
            "Card"
        );
    }
    if !board.empty_slots().is_empty() {
        debug!(label, slots = %cell_list(board.empty_slots()), "Free cells");
    }
}

/// `(r, c) (r, c) ...`
fn cell_list(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human-friendly label for a boolean flag.
fn bool_label(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render_compactly() {
        assert_eq!(cell_list(&[Cell::new(0, 1), Cell::new(2, 3)]), "(0, 1) (2, 3)");
        assert_eq!(cell_list(&[]), "");
    }
}
