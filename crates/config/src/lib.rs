//! RON configuration for a padboard grid: geometry, board switches,
//! per-domain default card sizes, and seed cards.
//!
//! ```ron
//! (
//!     grid: (columns: 6, rows: 4, cell: 120, spacing: 8, insets: 16),
//!     board: (editing: true, show_empty_slots: true),
//!     default_size: (1, 1),
//!     sizes: { "climate": (2, 2), "camera": (2, 1) },
//!     cards: [
//!         (card: "light.kitchen", pos: (row: 0, col: 0), size: (1, 1)),
//!     ],
//! )
//! ```

use std::{
    env,
    path::{Path, PathBuf},
};

use padboard_grid::{Board, BoardOptions, GridSpec, Handlers, Placement};

/// Fallback values for omitted fields.
mod defaults;
mod error;
mod loader;
mod raw;
/// Per-domain default sizes.
mod sizes;
mod store;

pub use error::Error;
pub use loader::{from_str, load_from_path};
pub use raw::{RawCell, RawConfig, RawEdges, RawGrid, RawInsets};
pub use sizes::SizeTable;
pub use store::RonStore;

/// A validated board configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Grid geometry.
    pub grid: GridSpec,
    /// Board switches.
    pub board: BoardOptions,
    /// Default size for new cards by domain.
    pub sizes: SizeTable,
    /// Cards present when the board is first built.
    pub cards: Vec<Placement>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridSpec::square(
                defaults::COLUMNS,
                defaults::ROWS,
                defaults::CELL,
                defaults::SPACING,
            ),
            board: BoardOptions::default(),
            sizes: SizeTable::default(),
            cards: Vec::new(),
        }
    }
}

impl Config {
    /// Wire a board from this configuration with the seed cards loaded.
    pub fn build_board(&self, handlers: Handlers) -> padboard_grid::Result<Board> {
        let mut board = Board::new(self.grid, self.board, self.sizes.clone(), handlers)?;
        board.load_placements(self.cards.clone())?;
        Ok(board)
    }
}

/// Determine the preferred user config path (`~/.padboard/config.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".padboard");
    p.push("config.ron");
    p
}

/// Resolve the effective config path.
///
/// Uses `explicit` when provided, else `~/.padboard/config.ron` when it
/// exists. Returns `None` when neither applies and the built-in defaults
/// should be used.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let preferred = default_config_path();
    preferred.exists().then_some(preferred)
}
