//! Grid model: the placement set and the occupancy derived from it.

use std::collections::HashSet;

use padboard_ids::CardId;
use tracing::{debug, info, trace};

use crate::{
    Error, Result,
    grid::{Cell, GridSpec, Placement},
    validate::{self, Rejection},
};

/// Cell → occupant map for a fixed-size grid, stored row-major.
///
/// Built only from scratch by [`GridModel`]; never patched in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// Column count; row stride of `cells`.
    columns: u32,
    /// One slot per cell.
    cells: Vec<Option<CardId>>,
}

impl OccupancyGrid {
    /// An empty grid for `spec`.
    fn empty(spec: &GridSpec) -> Self {
        Self {
            columns: spec.columns,
            cells: vec![None; spec.cell_count()],
        }
    }

    /// Build occupancy for `placements`, failing on the first inconsistency.
    fn build(spec: &GridSpec, placements: &[Placement]) -> Result<Self> {
        let mut grid = Self::empty(spec);
        let mut seen = HashSet::with_capacity(placements.len());
        for p in placements {
            if !seen.insert(&p.card) {
                return Err(Error::DuplicateCard(p.card.clone()));
            }
            if !spec.contains_span(p.pos, p.size) {
                return Err(Error::GridBoundsExceeded {
                    card: p.card.clone(),
                    pos: p.pos,
                    size: p.size,
                    columns: spec.columns,
                    rows: spec.rows,
                });
            }
            for cell in p.cells() {
                let Some(idx) = spec.index_of(cell) else {
                    continue;
                };
                match &grid.cells[idx] {
                    Some(first) => {
                        return Err(Error::OverlapDetected {
                            cell,
                            first: first.clone(),
                            second: p.card.clone(),
                        });
                    }
                    None => grid.cells[idx] = Some(p.card.clone()),
                }
            }
        }
        Ok(grid)
    }

    /// Occupant of the cell at row-major `idx`.
    fn get(&self, idx: usize) -> Option<&CardId> {
        self.cells.get(idx).and_then(Option::as_ref)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate `(cell, occupant)` for every cell, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Option<&CardId>)> {
        let cols = self.columns.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, c)| {
            (Cell::new((i / cols) as i32, (i % cols) as i32), c.as_ref())
        })
    }
}

/// Owner of the placement set and its occupancy grid.
///
/// All mutation goes through [`GridModel::insert`], [`GridModel::remove`],
/// [`GridModel::commit`] or [`GridModel::rebuild_occupancy`]; each either
/// replaces the placement list and occupancy together or leaves both
/// untouched.
#[derive(Clone, Debug)]
pub struct GridModel {
    /// Grid dimensions and pitch.
    spec: GridSpec,
    /// Current placements, in insertion order.
    placements: Vec<Placement>,
    /// Occupancy derived from `placements`.
    occupancy: OccupancyGrid,
    /// Incremented on every successful mutation.
    revision: u64,
}

impl GridModel {
    /// Start an empty model for `spec`.
    pub fn new(spec: GridSpec) -> Result<Self> {
        spec.validate()?;
        debug!(columns = spec.columns, rows = spec.rows, "grid model initialized");
        Ok(Self {
            occupancy: OccupancyGrid::empty(&spec),
            spec,
            placements: Vec::new(),
            revision: 0,
        })
    }

    /// Grid dimensions and pitch.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Current placements in insertion order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Current occupancy.
    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    /// Mutation counter; changes whenever the placement set changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Placement for `card`, if present.
    pub fn placement(&self, card: &CardId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.card == *card)
    }

    /// True when `card` has a placement.
    pub fn contains(&self, card: &CardId) -> bool {
        self.placement(card).is_some()
    }

    /// Card occupying `cell`. Off-grid cells are never occupied.
    pub fn occupant_at(&self, cell: Cell) -> Option<&CardId> {
        self.spec.index_of(cell).and_then(|i| self.occupancy.get(i))
    }

    /// Cells covered by `placement`, row-major.
    pub fn cells_covered(placement: &Placement) -> impl Iterator<Item = Cell> + use<> {
        placement.cells()
    }

    /// Replace the placement set and rebuild occupancy from scratch.
    ///
    /// On error the previous placements and occupancy are kept.
    pub fn rebuild_occupancy(&mut self, placements: Vec<Placement>) -> Result<()> {
        let occupancy = OccupancyGrid::build(&self.spec, &placements)?;
        self.swap_in(placements, occupancy);
        Ok(())
    }

    /// Add a new card. The placement must be valid against the current grid.
    pub fn insert(&mut self, placement: Placement) -> Result<()> {
        if self.contains(&placement.card) {
            return Err(Error::DuplicateCard(placement.card));
        }
        self.check(&placement)?;
        let (card, pos, size) = (placement.card.clone(), placement.pos, placement.size);
        let mut next = self.placements.clone();
        next.push(placement);
        self.rebuild_occupancy(next)?;
        info!(card = %card, pos = %pos, size = %size, "card placed");
        Ok(())
    }

    /// Remove a card, returning its last placement.
    pub fn remove(&mut self, card: &CardId) -> Result<Placement> {
        let idx = self
            .placements
            .iter()
            .position(|p| p.card == *card)
            .ok_or_else(|| Error::UnknownCard(card.clone()))?;
        let mut next = self.placements.clone();
        let removed = next.remove(idx);
        self.rebuild_occupancy(next)?;
        info!(card = %card, "card removed");
        Ok(removed)
    }

    /// Replace an existing card's placement with a validated candidate.
    ///
    /// This is the only path drag and resize sessions use to mutate the grid.
    pub fn commit(&mut self, candidate: Placement) -> Result<()> {
        let idx = self
            .placements
            .iter()
            .position(|p| p.card == candidate.card)
            .ok_or_else(|| Error::UnknownCard(candidate.card.clone()))?;
        self.check(&candidate)?;
        if self.placements[idx] == candidate {
            trace!(card = %candidate.card, "commit is a no-op");
            return Ok(());
        }
        let mut next = self.placements.clone();
        next[idx] = candidate;
        self.rebuild_occupancy(next)
    }

    /// Run the validator for `candidate`, excluding the candidate's own card.
    fn check(&self, candidate: &Placement) -> Result<()> {
        validate::check(self, candidate, Some(&candidate.card)).map_err(|r| match r {
            Rejection::OutOfBounds => Error::GridBoundsExceeded {
                card: candidate.card.clone(),
                pos: candidate.pos,
                size: candidate.size,
                columns: self.spec.columns,
                rows: self.spec.rows,
            },
            Rejection::Overlaps { cell, occupant } => Error::InvalidPlacement {
                card: candidate.card.clone(),
                cell,
                occupant,
            },
        })
    }

    /// Install a consistent placement list and occupancy pair.
    fn swap_in(&mut self, placements: Vec<Placement>, occupancy: OccupancyGrid) {
        self.placements = placements;
        self.occupancy = occupancy;
        self.revision = self.revision.wrapping_add(1);
        trace!(
            revision = self.revision,
            cards = self.placements.len(),
            occupied = self.occupancy.occupied(),
            "occupancy rebuilt"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Span;

    fn model() -> GridModel {
        GridModel::new(GridSpec::square(4, 4, 100.0, 8.0)).unwrap()
    }

    #[test]
    fn oversized_spec_is_an_error_not_an_allocation() {
        let err = GridModel::new(GridSpec::square(u32::MAX, u32::MAX, 10.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidGridSpec(_)));
    }

    #[test]
    fn starts_empty() {
        let m = model();
        assert!(m.placements().is_empty());
        assert_eq!(m.occupancy().occupied(), 0);
        assert!(m.occupant_at(Cell::new(0, 0)).is_none());
    }

    #[test]
    fn rebuild_maps_every_covered_cell() {
        let mut m = model();
        m.rebuild_occupancy(vec![
            Placement::new("a", Cell::new(0, 0), Span::new(2, 2)),
            Placement::new("b", Cell::new(3, 3), Span::UNIT),
        ])
        .unwrap();
        for (cell, occ) in m.occupancy().iter() {
            let expect = if cell.row < 2 && cell.col < 2 {
                Some("a")
            } else if cell == Cell::new(3, 3) {
                Some("b")
            } else {
                None
            };
            assert_eq!(occ.map(CardId::as_str), expect, "cell {cell}");
        }
        assert_eq!(m.occupancy().occupied(), 5);
    }

    #[test]
    fn rebuild_rejects_overlap_and_keeps_state() {
        let mut m = model();
        m.rebuild_occupancy(vec![Placement::new("a", Cell::new(0, 0), Span::UNIT)])
            .unwrap();
        let rev = m.revision();
        let err = m
            .rebuild_occupancy(vec![
                Placement::new("a", Cell::new(0, 0), Span::new(2, 1)),
                Placement::new("b", Cell::new(0, 1), Span::UNIT),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            Error::OverlapDetected {
                cell: Cell::new(0, 1),
                first: CardId::new("a"),
                second: CardId::new("b"),
            }
        );
        assert_eq!(m.revision(), rev);
        assert_eq!(m.placements().len(), 1);
        assert!(m.occupant_at(Cell::new(0, 1)).is_none());
    }

    #[test]
    fn rebuild_rejects_out_of_bounds_and_duplicates() {
        let mut m = model();
        let err = m
            .rebuild_occupancy(vec![Placement::new("a", Cell::new(3, 3), Span::new(2, 1))])
            .unwrap_err();
        assert!(matches!(err, Error::GridBoundsExceeded { .. }));
        let err = m
            .rebuild_occupancy(vec![
                Placement::new("a", Cell::new(0, 0), Span::UNIT),
                Placement::new("a", Cell::new(0, 0), Span::UNIT),
            ])
            .unwrap_err();
        assert_eq!(err, Error::DuplicateCard(CardId::new("a")));
    }

    #[test]
    fn commit_replaces_and_rebuilds() {
        let mut m = model();
        m.insert(Placement::new("a", Cell::new(0, 0), Span::UNIT)).unwrap();
        m.commit(Placement::new("a", Cell::new(2, 2), Span::new(2, 2)))
            .unwrap();
        assert!(m.occupant_at(Cell::new(0, 0)).is_none());
        assert_eq!(m.occupant_at(Cell::new(3, 3)).map(CardId::as_str), Some("a"));
    }

    #[test]
    fn commit_rejects_overlap() {
        let mut m = model();
        m.insert(Placement::new("a", Cell::new(0, 0), Span::UNIT)).unwrap();
        m.insert(Placement::new("b", Cell::new(1, 0), Span::UNIT)).unwrap();
        let err = m
            .commit(Placement::new("a", Cell::new(0, 0), Span::new(1, 2)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPlacement { .. }));
        assert_eq!(
            m.placement(&CardId::new("a")).unwrap().size,
            Span::UNIT
        );
    }

    #[test]
    fn remove_clears_cells() {
        let mut m = model();
        m.insert(Placement::new("a", Cell::new(1, 1), Span::new(2, 1)))
            .unwrap();
        let p = m.remove(&CardId::new("a")).unwrap();
        assert_eq!(p.pos, Cell::new(1, 1));
        assert_eq!(m.occupancy().occupied(), 0);
        assert!(matches!(
            m.remove(&CardId::new("a")),
            Err(Error::UnknownCard(_))
        ));
    }
}
