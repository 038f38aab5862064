//! Output document writing.

use cinerank_core::{CinerankError, RankedMovie, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write the ranked movies as a JSON array of records.
///
/// The document is written to a temporary file next to `path` and moved into
/// place, so `path` either keeps its previous content or holds the full output.
pub fn write_movies(path: &Path, movies: &[RankedMovie], pretty: bool) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    let written = if pretty {
        serde_json::to_writer_pretty(&mut file, movies)
    } else {
        serde_json::to_writer(&mut file, movies)
    };
    written.map_err(|e| {
        CinerankError::Output(format!("failed to serialize movies for {}: {e}", path.display()))
    })?;
    file.write_all(b"\n")?;

    file.persist(path).map_err(|e| {
        CinerankError::Output(format!("failed to write {}: {}", path.display(), e.error))
    })?;

    tracing::debug!("Persisted {} records to {}", movies.len(), path.display());
    Ok(())
}
