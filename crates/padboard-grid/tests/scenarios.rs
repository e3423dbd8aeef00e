use padboard_grid::{
    Board, BoardOptions, CardId, Cell, Corner, DragOutcome, FixedSizer, GridSpec, Placement,
    Point, Rect, ResizeOutcome, Span,
    test_support::{Event, Recorder},
    validate,
};

/// 4x4 grid, 100px cells, 8px spacing, no insets.
fn grid() -> GridSpec {
    GridSpec::square(4, 4, 100.0, 8.0)
}

fn board(placements: Vec<Placement>) -> (Board, Recorder) {
    let rec = Recorder::new();
    let mut b = Board::new(
        grid(),
        BoardOptions::default(),
        FixedSizer::default(),
        rec.handlers(),
    )
    .unwrap();
    b.load_placements(placements).unwrap();
    (b, rec)
}

/// Pointer at the centre of `cell` for a 1x1 card.
fn centre(b: &Board, row: i32, col: i32) -> Point {
    let r = b.layout().frame_at(Cell::new(row, col), Span::UNIT);
    Point::new(r.cx(), r.cy())
}

#[test]
fn scenario_a_reject_overlap_then_move() {
    let (mut b, rec) = board(vec![
        Placement::new("A", Cell::new(0, 0), Span::UNIT),
        Placement::new("B", Cell::new(1, 0), Span::UNIT),
    ]);
    let c = Placement::new("C", Cell::new(0, 0), Span::new(2, 1));
    assert!(!validate::can_place(b.model(), &c, Some(&c.card)));

    let a = CardId::new("A");
    b.begin_drag(&a).unwrap();
    let fb = b.drag_to(&a, centre(&b, 2, 2)).unwrap();
    assert!(fb.valid);
    let out = b.end_drag(&a).unwrap();
    assert_eq!(
        out,
        DragOutcome::Committed(Placement::new("A", Cell::new(2, 2), Span::UNIT))
    );
    assert_eq!(b.frame_for(&a), Some(Rect::new(216.0, 216.0, 100.0, 100.0)));
    assert!(rec.events().contains(&Event::Move(a, Cell::new(2, 2))));
}

#[test]
fn scenario_b_resize_to_two_by_two() {
    let (mut b, rec) = board(vec![Placement::new("A", Cell::new(0, 0), Span::UNIT)]);
    let a = CardId::new("A");
    let grab = Point::new(100.0, 100.0);
    b.begin_resize(&a, Corner::BottomRight, grab).unwrap();
    let fb = b.resize_to(&a, Point::new(210.0, 215.0)).unwrap();
    assert!(fb.valid);
    assert_eq!(fb.candidate.size, Span::new(2, 2));
    let out = b.end_resize(&a).unwrap();
    assert_eq!(
        out,
        ResizeOutcome::Committed(Placement::new("A", Cell::new(0, 0), Span::new(2, 2)))
    );
    for cell in [
        Cell::new(0, 0),
        Cell::new(0, 1),
        Cell::new(1, 0),
        Cell::new(1, 1),
    ] {
        assert_eq!(b.model().occupant_at(cell), Some(&a), "cell {cell}");
    }
    assert!(
        rec.events()
            .contains(&Event::Resize(a, Span::new(2, 2), Cell::new(0, 0)))
    );
}

#[test]
fn scenario_c_drag_off_the_right_edge() {
    let (mut b, rec) = board(vec![Placement::new("A", Cell::new(0, 0), Span::UNIT)]);
    let a = CardId::new("A");
    b.begin_drag(&a).unwrap();
    for col in [4, 5] {
        let fb = b.drag_to(&a, centre(&b, 0, col)).unwrap();
        assert!(fb.candidate.pos.col >= 4);
        assert!(!fb.valid, "column {col} must be invalid");
    }
    let out = b.end_drag(&a).unwrap();
    assert_eq!(
        out,
        DragOutcome::Cancelled(Placement::new("A", Cell::new(0, 0), Span::UNIT))
    );
    assert_eq!(b.placement(&a).unwrap().pos, Cell::new(0, 0));
    assert_eq!(rec.count(|e| matches!(e, Event::Move(..))), 0);
}
