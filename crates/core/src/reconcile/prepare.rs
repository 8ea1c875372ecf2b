//! Secondary-source preprocessing: projection, key normalization, dedup.

use std::collections::HashSet;

use polars::prelude::*;
use tracing::debug;

/// Natural key of the secondary source.
pub const SECONDARY_KEY_COLUMN: &str = "imdb_id";

/// The six secondary columns carried through the merge.
pub const SECONDARY_COLUMNS: [&str; 6] = [
    SECONDARY_KEY_COLUMN,
    "poster_path",
    "budget",
    "release_date",
    "revenue",
    "title",
];

/// Project the secondary source onto its six named columns, normalize
/// `imdb_id` (coerce to text, trim whitespace), and drop every row whose
/// key duplicates an earlier one. First occurrence wins, original order is
/// preserved, so the result is idempotent under re-application.
pub fn prepare_secondary(frame: &DataFrame) -> PolarsResult<DataFrame> {
    let projected = frame.select(SECONDARY_COLUMNS)?;

    let ids = projected
        .column(SECONDARY_KEY_COLUMN)?
        .cast(&DataType::String)?;
    let ids = ids.str()?;
    let normalized: Vec<Option<&str>> = ids.into_iter().map(|cell| cell.map(str::trim)).collect();

    let mut seen: HashSet<Option<&str>> = HashSet::with_capacity(normalized.len());
    let first_occurrence: Vec<bool> = normalized.iter().map(|id| seen.insert(*id)).collect();
    let keep = BooleanChunked::from_slice("keep_first".into(), &first_occurrence);

    let mut out = projected.clone();
    out.with_column(Series::new(SECONDARY_KEY_COLUMN.into(), normalized))?;
    let out = out.filter(&keep)?;

    debug!(
        input_rows = frame.height(),
        kept_rows = out.height(),
        "prepared secondary source"
    );
    Ok(out)
}
