use proptest::prelude::*;

use crate::{
    CardId, Cell, Corner, DragController, DragOutcome, GridModel, GridSpec, LayoutEngine,
    Placement, Point, ResizeController, ResizeOutcome, Span, validate,
};

/// 6x5 grid, 40px cells, 6px gaps, small insets.
fn spec() -> GridSpec {
    let mut s = GridSpec::square(6, 5, 40.0, 6.0);
    s.insets.left = 3.0;
    s.insets.top = 7.0;
    s
}

/// Random rectangles, filtered down to a disjoint in-bounds set.
fn placements_strategy() -> impl Strategy<Value = Vec<Placement>> {
    prop::collection::vec((0i32..6, 0i32..5, 1u32..4, 1u32..4), 0..12).prop_map(|raw| {
        let spec = spec();
        let mut out: Vec<Placement> = Vec::new();
        for (i, (col, row, w, h)) in raw.into_iter().enumerate() {
            let p = Placement::new(format!("card{i}"), Cell::new(row, col), Span::new(w, h));
            if spec.contains_span(p.pos, p.size) && !out.iter().any(|q| q.overlaps(&p)) {
                out.push(p);
            }
        }
        out
    })
}

fn model_with(placements: Vec<Placement>) -> GridModel {
    let mut m = GridModel::new(spec()).unwrap();
    m.rebuild_occupancy(placements).unwrap();
    m
}

fn pointer_strategy() -> impl Strategy<Value = Point> {
    (-80.0f64..400.0, -80.0f64..360.0).prop_map(|(x, y)| Point::new(x, y))
}

fn corner_strategy() -> impl Strategy<Value = Corner> {
    prop_oneof![
        Just(Corner::TopLeft),
        Just(Corner::TopRight),
        Just(Corner::BottomLeft),
        Just(Corner::BottomRight),
    ]
}

proptest! {
    #[test]
    fn occupancy_reflects_placements(placements in placements_strategy()) {
        let m = model_with(placements.clone());
        for cell in spec().cells() {
            let expected = placements
                .iter()
                .find(|p| p.cells().any(|c| c == cell))
                .map(|p| &p.card);
            prop_assert_eq!(m.occupant_at(cell), expected);
        }
    }

    #[test]
    fn own_placement_never_invalid(placements in placements_strategy()) {
        let m = model_with(placements);
        for p in m.placements() {
            prop_assert!(validate::can_place(&m, p, Some(&p.card)));
        }
    }

    #[test]
    fn disjoint_frames_never_intersect(placements in placements_strategy()) {
        let layout = LayoutEngine::new(spec());
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                prop_assert!(!layout.frame_for(a).intersects(&layout.frame_for(b)));
            }
        }
    }

    #[test]
    fn point_to_cell_stays_in_bounds(p in pointer_strategy()) {
        let layout = LayoutEngine::new(spec());
        prop_assert!(spec().contains(layout.point_to_cell(p)));
    }

    #[test]
    fn drag_commits_last_valid_or_nothing(
        placements in placements_strategy(),
        pick in any::<prop::sample::Index>(),
        path in prop::collection::vec(pointer_strategy(), 1..20),
    ) {
        prop_assume!(!placements.is_empty());
        let card: CardId = placements[pick.index(placements.len())].card.clone();
        let mut m = model_with(placements);
        let layout = LayoutEngine::new(spec());
        let start = m.placement(&card).unwrap().clone();

        let mut d = DragController::new();
        d.begin(&m, &card).unwrap();
        for p in path {
            d.update(&m, &layout, p);
        }
        let last_valid = d.session().unwrap().last_valid.clone();
        match d.end(&mut m).unwrap() {
            DragOutcome::Committed(p) => {
                prop_assert_eq!(Some(&p), last_valid.as_ref());
                prop_assert_eq!(m.placement(&card), Some(&p));
            }
            DragOutcome::Cancelled(p) => {
                prop_assert!(last_valid.is_none());
                prop_assert_eq!(&p, &start);
                prop_assert_eq!(m.placement(&card), Some(&start));
            }
        }
        let mut fresh = GridModel::new(spec()).unwrap();
        prop_assert!(fresh.rebuild_occupancy(m.placements().to_vec()).is_ok());
    }

    #[test]
    fn resize_commits_whole_cells_with_fixed_anchor(
        placements in placements_strategy(),
        pick in any::<prop::sample::Index>(),
        handle in corner_strategy(),
        deltas in prop::collection::vec((-150.0f64..150.0, -150.0f64..150.0), 1..20),
    ) {
        prop_assume!(!placements.is_empty());
        let card: CardId = placements[pick.index(placements.len())].card.clone();
        let mut m = model_with(placements);
        let layout = LayoutEngine::new(spec());
        let start = m.placement(&card).unwrap().clone();
        let origin = Point::new(100.0, 100.0);

        let mut r = ResizeController::new();
        r.begin(&m, &card, handle, origin).unwrap();
        for (dx, dy) in deltas {
            let fb = r.update(&m, &layout, Point::new(origin.x + dx, origin.y + dy)).unwrap();
            prop_assert!(fb.frame.w >= spec().cell_size.width);
            prop_assert!(fb.frame.h >= spec().cell_size.height);
        }
        let ResizeOutcome::Committed(fin) = r.end(&mut m).unwrap() else {
            return Err(TestCaseError::fail("resize end must commit"));
        };
        prop_assert_eq!(m.placement(&card), Some(&fin));
        prop_assert!(fin.size.width >= 1 && fin.size.height >= 1);
        prop_assert!(spec().contains_span(fin.pos, fin.size));
        let (s_last, f_last) = (start.last_cell(), fin.last_cell());
        match handle {
            Corner::BottomRight => {
                prop_assert_eq!(fin.pos, start.pos);
            }
            Corner::TopLeft => {
                prop_assert_eq!(f_last, s_last);
            }
            Corner::TopRight => {
                prop_assert_eq!(fin.pos.col, start.pos.col);
                prop_assert_eq!(f_last.row, s_last.row);
            }
            Corner::BottomLeft => {
                prop_assert_eq!(fin.pos.row, start.pos.row);
                prop_assert_eq!(f_last.col, s_last.col);
            }
        }
    }
}
