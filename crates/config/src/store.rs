//! File-backed placement persistence.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use padboard_grid::{Error as GridError, Placement, PlacementStore, Result as GridResult};
use ron::ser::PrettyConfig;
use tracing::{debug, info};

/// Stores the placement list as a RON sequence in a single file.
///
/// A missing file loads as an empty board.
#[derive(Debug, Clone)]
pub struct RonStore {
    /// Backing file.
    path: PathBuf,
}

impl RonStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wrap a failure with the backing path.
    fn fail(&self, what: &str, err: impl ToString) -> GridError {
        GridError::Store(format!(
            "{what} {}: {}",
            self.path.display(),
            err.to_string()
        ))
    }
}

impl PlacementStore for RonStore {
    fn load(&mut self) -> GridResult<Vec<Placement>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved layout");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.fail("reading", e)),
        };
        ron::from_str(&text).map_err(|e| self.fail("parsing", e))
    }

    fn save(&mut self, placements: &[Placement]) -> GridResult<()> {
        let text = ron::ser::to_string_pretty(&placements, PrettyConfig::default())
            .map_err(|e| self.fail("encoding", e))?;
        fs::write(&self.path, text).map_err(|e| self.fail("writing", e))?;
        info!(path = %self.path.display(), cards = placements.len(), "layout saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use padboard_grid::{Cell, Span};

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        env::temp_dir().join(format!("padboard-{}-{name}.ron", process::id()))
    }

    #[test]
    fn missing_file_is_empty() {
        let mut s = RonStore::new(scratch("missing"));
        assert!(s.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let path = scratch("roundtrip");
        let mut s = RonStore::new(&path);
        let cards = vec![
            Placement::new("light.kitchen", Cell::new(0, 0), Span::UNIT),
            Placement::new("climate.hall", Cell::new(1, 2), Span::new(2, 2)),
        ];
        s.save(&cards).unwrap();
        assert_eq!(s.load().unwrap(), cards);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn garbage_is_a_store_error() {
        let path = scratch("garbage");
        fs::write(&path, "not ron [").unwrap();
        let err = RonStore::new(&path).load().unwrap_err();
        assert!(matches!(err, GridError::Store(ref m) if m.starts_with("parsing")));
        fs::remove_file(&path).unwrap();
    }
}
