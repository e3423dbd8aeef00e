//! Implementation for the `replay` and `show` subcommands.

use config::{Config, RonStore};
use padboard_grid::{
    Board, CardId, Cell, Corner, DragOutcome, Feedback, PlacementStore, Point, ResizeOutcome,
    domain_of,
};
use ron::{Options, extensions::Extensions};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    cli::{BoardArgs, ReplayArgs},
    diagnostics,
    error::{Error, Result},
};

/// Pointer position as written in directives.
type Pt = (f64, f64);

/// One scripted gesture or board operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Directive {
    /// Press on a card, move through `path`, release.
    Drag(String, Vec<Pt>),
    /// Like `drag`, but the gesture is cancelled instead of released.
    DragCancel(String, Vec<Pt>),
    /// Grab a card's corner at `grab`, move through `path`, release.
    Resize(String, Corner, Pt, Vec<Pt>),
    /// Tap a pixel position.
    Tap(Pt),
    /// Add a card at `(row, col)`, sized by its entity domain.
    Add(String, i32, i32),
    /// Remove a card.
    Remove(String),
    /// Turn editing on or off.
    Editing(bool),
}

/// What a directive did, for the step log and for tests.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    /// A drag or resize committed.
    Committed,
    /// A gesture ended without changing the board.
    Cancelled,
    /// A tap hit a free cell.
    Tapped(Cell),
    /// A tap hit a card or fell outside the grid.
    Ignored,
    /// The board changed outside a gesture.
    Changed,
}

/// Run the replay workflow.
pub fn run(args: &ReplayArgs) -> Result<()> {
    let directives: Vec<(String, Directive)> = args
        .specs
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            parse_directive(raw)
                .map(|d| (raw.clone(), d))
                .map_err(|err| Error::parse(format!("directive {} ('{}'): {}", idx + 1, raw, err)))
        })
        .collect::<Result<_>>()?;

    if directives.is_empty() {
        return Err(Error::NoDirectives);
    }
    info!(steps = directives.len(), "Directives queued");

    let mut board = open_board(&args.board)?;
    diagnostics::log_board("initial", &board);

    for (idx, (raw, directive)) in directives.iter().enumerate() {
        let step = idx + 1;
        info!(step, directive = %raw, "Step");
        match execute(&mut board, directive) {
            Ok(outcome) => info!(step, ?outcome, "Step done"),
            Err(err) if !args.strict => warn!(step, %err, "Step failed"),
            Err(err) => return Err(err),
        }
    }

    diagnostics::log_board("final", &board);
    if args.save
        && let Some(path) = &args.board.layout
    {
        board.save(&mut RonStore::new(path))?;
    }
    info!("Replay complete");
    Ok(())
}

/// Run the `show` subcommand.
pub fn show(args: &BoardArgs) -> Result<()> {
    let board = open_board(args)?;
    diagnostics::log_board("current", &board);
    Ok(())
}

/// Build the board from configuration, then apply the saved layout if one
/// exists.
fn open_board(args: &BoardArgs) -> Result<Board> {
    let config = match config::resolve_config_path(args.config.as_deref()) {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            config::load_from_path(&path)?
        }
        None => {
            debug!("No config file; using defaults");
            Config::default()
        }
    };
    let mut board = config.build_board(diagnostics::log_handlers())?;
    if let Some(path) = &args.layout {
        let mut store = RonStore::new(path);
        let saved = store.load()?;
        if saved.is_empty() {
            debug!(path = %path.display(), "Saved layout empty; keeping seed cards");
        } else {
            board.load_placements(saved)?;
        }
    }
    Ok(board)
}

/// Apply one directive to `board`.
fn execute(board: &mut Board, directive: &Directive) -> Result<Step> {
    let step = match directive {
        Directive::Drag(card, path) => {
            let card = CardId::new(card.as_str());
            drag(board, &card, path)?;
            match board.end_drag(&card)? {
                DragOutcome::Committed(_) => Step::Committed,
                DragOutcome::Cancelled(_) => Step::Cancelled,
            }
        }
        Directive::DragCancel(card, path) => {
            let card = CardId::new(card.as_str());
            drag(board, &card, path)?;
            board.cancel(&card);
            Step::Cancelled
        }
        Directive::Resize(card, corner, grab, path) => {
            let card = CardId::new(card.as_str());
            board.begin_resize(&card, *corner, point(*grab))?;
            for p in path {
                trace_feedback(&card, &board.resize_to(&card, point(*p))?);
            }
            match board.end_resize(&card)? {
                ResizeOutcome::Committed(_) => Step::Committed,
                ResizeOutcome::Cancelled(_) => Step::Cancelled,
            }
        }
        Directive::Tap(p) => {
            let origin = board.layout().snap_point(point(*p));
            debug!(x = origin.x, y = origin.y, "tap nearest cell origin");
            board.tap(point(*p)).map_or(Step::Ignored, Step::Tapped)
        }
        Directive::Add(card, row, col) => {
            board.add_card(CardId::new(card.as_str()), domain_of(card), Cell::new(*row, *col))?;
            Step::Changed
        }
        Directive::Remove(card) => {
            board.remove_card(&CardId::new(card.as_str()))?;
            Step::Changed
        }
        Directive::Editing(on) => {
            board.set_editing(*on);
            Step::Changed
        }
    };
    Ok(step)
}

/// Begin a drag of `card` and feed it every point of `path`.
fn drag(board: &mut Board, card: &CardId, path: &[Pt]) -> Result<()> {
    board.begin_drag(card)?;
    for p in path {
        trace_feedback(card, &board.drag_to(card, point(*p))?);
    }
    Ok(())
}

/// Log one update's feedback.
fn trace_feedback(card: &CardId, fb: &Feedback) {
    debug!(
        card = %card,
        pos = %fb.candidate.pos,
        size = %fb.candidate.size,
        valid = fb.valid,
        "candidate"
    );
}

/// Convert a directive coordinate pair.
fn point((x, y): Pt) -> Point {
    Point::new(x, y)
}

/// Parse a RON directive.
fn parse_directive(spec: &str) -> Result<Directive> {
    let options = Options::default().with_default_extension(Extensions::UNWRAP_NEWTYPES);
    options
        .from_str(spec)
        .map_err(|e| Error::parse(e.to_string()))
}
