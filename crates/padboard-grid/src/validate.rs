//! Placement validity: bounds and overlap checks against the occupancy grid.
//!
//! Live drag/resize feedback and the final commit both call [`check`], so a
//! candidate that was highlighted as valid is exactly one that will commit.

use padboard_ids::CardId;

use crate::{
    grid::{Cell, Placement},
    model::GridModel,
};

/// Why a candidate cannot be placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Part of the candidate lies outside the grid, or it is larger than the
    /// grid.
    OutOfBounds,
    /// A covered cell belongs to another card.
    Overlaps {
        /// First conflicting cell, row-major.
        cell: Cell,
        /// Card that owns it.
        occupant: CardId,
    },
}

/// Check `candidate` against `model`. Cells owned by `excluding` count as
/// free, so a card never conflicts with its own current placement.
///
/// Work is bounded by the number of cells the candidate covers.
pub fn check(
    model: &GridModel,
    candidate: &Placement,
    excluding: Option<&CardId>,
) -> Result<(), Rejection> {
    if !model.spec().contains_span(candidate.pos, candidate.size) {
        return Err(Rejection::OutOfBounds);
    }
    for cell in candidate.cells() {
        match model.occupant_at(cell) {
            Some(occupant) if Some(occupant) != excluding => {
                return Err(Rejection::Overlaps {
                    cell,
                    occupant: occupant.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// True when `candidate` can be placed, ignoring cells owned by `excluding`.
#[inline]
pub fn can_place(model: &GridModel, candidate: &Placement, excluding: Option<&CardId>) -> bool {
    check(model, candidate, excluding).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridSpec, Span};

    fn model_ab() -> GridModel {
        let mut m = GridModel::new(GridSpec::square(4, 4, 100.0, 8.0)).unwrap();
        m.rebuild_occupancy(vec![
            Placement::new("a", Cell::new(0, 0), Span::UNIT),
            Placement::new("b", Cell::new(1, 0), Span::UNIT),
        ])
        .unwrap();
        m
    }

    #[test]
    fn own_placement_is_always_valid() {
        let m = model_ab();
        for p in m.placements() {
            assert!(can_place(&m, p, Some(&p.card)));
        }
    }

    #[test]
    fn overlap_reports_first_conflict() {
        let m = model_ab();
        let c = Placement::new("c", Cell::new(0, 0), Span::new(2, 1));
        assert_eq!(
            check(&m, &c, Some(&c.card)),
            Err(Rejection::Overlaps {
                cell: Cell::new(0, 0),
                occupant: CardId::new("a"),
            })
        );
    }

    #[test]
    fn growing_into_neighbour_is_rejected() {
        let m = model_ab();
        let a = CardId::new("a");
        let tall = Placement::new("a", Cell::new(0, 0), Span::new(1, 2));
        let wide = Placement::new("a", Cell::new(0, 0), Span::new(2, 1));
        assert!(!can_place(&m, &tall, Some(&a)));
        assert!(can_place(&m, &wide, Some(&a)));
    }

    #[test]
    fn bounds_checked_before_cells() {
        let m = model_ab();
        for (pos, size) in [
            (Cell::new(0, 4), Span::UNIT),
            (Cell::new(0, -1), Span::UNIT),
            (Cell::new(3, 3), Span::new(1, 2)),
            (Cell::new(0, 0), Span::new(5, 1)),
        ] {
            let p = Placement::new("c", pos, size);
            assert_eq!(check(&m, &p, None), Err(Rejection::OutOfBounds), "{pos} {size}");
        }
    }

    #[test]
    fn without_exclusion_own_cells_conflict() {
        let m = model_ab();
        let a = m.placements()[0].clone();
        assert!(!can_place(&m, &a, None));
    }
}
