//! Parse and load user configuration.

use std::{ffi::OsStr, fs, path::Path};

use ron::{Options, error::SpannedError, extensions::Extensions};
use tracing::debug;

use crate::{
    Config, Error,
    error::excerpt_at,
    raw::RawConfig,
};

/// Load a fully resolved `Config` from a RON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .ron file)".to_string(),
        });
    }
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let config = from_str(&source).map_err(|e| e.at(path))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Parse and resolve a configuration held in memory.
pub fn from_str(source: &str) -> Result<Config, Error> {
    parse(source)?.resolve()
}

/// Deserialize `source` without applying defaults. Optional fields take
/// bare values; `Some(..)` is not required.
pub(crate) fn parse(source: &str) -> Result<RawConfig, Error> {
    let opts = Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME | Extensions::UNWRAP_NEWTYPES);
    opts.from_str(source).map_err(|e| {
        let (line, col) = span_start(&e);
        Error::Parse {
            path: None,
            line,
            col,
            excerpt: excerpt_at(source, line, col),
            message: e.code.to_string(),
        }
    })
}

/// 1-based `(line, col)` where the error's span begins.
fn span_start(err: &SpannedError) -> (usize, usize) {
    let start = &err.span.start;
    (start.line.max(1), start.col.max(1))
}
