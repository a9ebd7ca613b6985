use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::StringRecord;
use thiserror::Error;

use super::model::{
    non_empty, Dataset, Record, AI_SUMMARY_COLUMN, META_DESCRIPTION_COLUMN, TITLE_COLUMN,
    URL_COLUMN,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a load produced no dataset.
///
/// A load is all-or-nothing: any of these discards every row read so far.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {origin}: {err}")]
    Io {
        origin: String,
        #[source]
        err: std::io::Error,
    },

    #[error("malformed CSV in {origin}{}: {err}", line_suffix(.line))]
    Csv {
        origin: String,
        line: Option<u64>,
        #[source]
        err: csv::Error,
    },

    #[error("{origin} has no header row")]
    MissingHeader { origin: String },

    #[error("{origin} has none of the expected columns (url, title, meta_description, ai_summary); found {found:?}")]
    UnrecognizedHeader { origin: String, found: Vec<String> },
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl LoadError {
    fn csv(origin: &str, err: csv::Error) -> Self {
        // The csv crate wraps reader failures; surface them as I/O errors.
        if err.is_io_error() {
            return LoadError::Io {
                origin: origin.to_string(),
                err: std::io::Error::from(err),
            };
        }
        LoadError::Csv {
            origin: origin.to_string(),
            line: err.position().map(|p| p.line()),
            err,
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Where the tabular bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A CSV file on disk.
    Path(PathBuf),
    /// A CSV document already held in memory; `name` is used in diagnostics.
    Bytes { name: String, data: Arc<[u8]> },
}

impl Source {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        Source::Bytes {
            name: name.into(),
            data: Arc::from(data),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Bytes { name, .. } => write!(f, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from `source`, re-reading it from scratch.
pub fn load(source: &Source) -> Result<Dataset, LoadError> {
    let origin = source.to_string();
    match source {
        Source::Path(path) => load_file(path),
        Source::Bytes { data, .. } => load_reader(&data[..], &origin),
    }
}

/// Load a dataset from a CSV file.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let origin = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|err| LoadError::Io {
        origin: origin.clone(),
        err,
    })?;
    load_reader(file, &origin)
}

/// Parse CSV text from any reader.
///
/// Layout: a header row naming the columns, then one record per row.
/// * Columns are matched by exact header name; unknown columns are ignored.
/// * Known columns missing from the header are absent in every record.
/// * Short rows are padded with absent values; empty cells are absent.
/// * A row of empty cells (`,,,`) is kept as an all-absent record; only
///   truly blank lines are skipped.
pub fn load_reader<R: Read>(reader: R, origin: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::csv(origin, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader {
            origin: origin.to_string(),
        });
    }

    let layout = ColumnLayout::from_headers(&headers);
    if layout.is_unrecognized() {
        return Err(LoadError::UnrecognizedHeader {
            origin: origin.to_string(),
            found: headers,
        });
    }
    if layout.url.is_none() {
        log::warn!("{origin}: no '{URL_COLUMN}' column, links will be empty");
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| LoadError::csv(origin, e))?;
        let record = layout.record(&row);
        if record.url.is_empty() && layout.url.is_some() {
            log::warn!(
                "{origin}: row at line {} has an empty url",
                row.position().map(|p| p.line()).unwrap_or_default()
            );
        }
        records.push(record);
    }

    log::debug!("{origin}: parsed {} records", records.len());
    Ok(Dataset {
        records,
        column_names: headers,
    })
}

// ---------------------------------------------------------------------------
// Header → field mapping
// ---------------------------------------------------------------------------

/// Position of each known column in the header, if present.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    url: Option<usize>,
    title: Option<usize>,
    meta_description: Option<usize>,
    ai_summary: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        ColumnLayout {
            url: find(URL_COLUMN),
            title: find(TITLE_COLUMN),
            meta_description: find(META_DESCRIPTION_COLUMN),
            ai_summary: find(AI_SUMMARY_COLUMN),
        }
    }

    fn is_unrecognized(&self) -> bool {
        *self == ColumnLayout::default()
    }

    fn record(&self, row: &StringRecord) -> Record {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .and_then(|s| non_empty(s.to_string()))
        };
        Record {
            url: cell(self.url).unwrap_or_default(),
            title: cell(self.title),
            meta_description: cell(self.meta_description),
            ai_summary: cell(self.ai_summary),
        }
    }
}
