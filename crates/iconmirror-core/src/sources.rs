//! The static list of sources, one CSV record per source:
//!
//! ```text
//! # label, manifest url, output path
//! Alice's TV icons, https://example.com/alice.json, icons/alice_tv.json
//! ```
//!
//! Blank lines, lines starting with `#`, and records with fewer
//! than three fields are skipped.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::SourceDefinition;

/// Load the source list at `path`. A missing file is a prerequisite failure.
pub fn load_sources(path: &Path) -> Result<Vec<SourceDefinition>> {
    if !path.is_file() {
        return Err(Error::SourceListMissing(path.to_path_buf()));
    }
    let file = std::fs::File::open(path).map_err(|e| Error::SourceList {
        path:   path.to_path_buf(),
        source: e.into(),
    })?;
    parse_sources(file).map_err(|source| Error::SourceList {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse source records from `reader`.
///
/// Blank and `#` lines are dropped before CSV parsing, so a stray quote in a
/// disabled record cannot swallow the records after it.
pub fn parse_sources(mut reader: impl Read) -> std::result::Result<Vec<SourceDefinition>, csv::Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let enabled: String = text
        .lines()
        .filter(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .flat_map(|line| [line, "\n"])
        .collect();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(enabled.as_bytes());

    let mut sources = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < 3 {
            debug!(label = record.get(0).unwrap_or_default(), "skipping short source record");
            continue;
        }
        sources.push(SourceDefinition::new(&record[0], &record[1], &record[2]));
    }
    Ok(sources)
}
