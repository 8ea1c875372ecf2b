//! Left-join execution and poster URL derivation.

use polars::prelude::*;
use tracing::debug;

use super::key::JOIN_KEY_COLUMN;
use super::prepare::SECONDARY_KEY_COLUMN;

/// Name of the derived display-ready poster URL column.
pub const POSTER_URL_COLUMN: &str = "poster_full_url";

/// Left outer equi-join of the primary rows against the prepared secondary
/// set on `join_key == imdb_id`.
///
/// Every primary row survives exactly once: unmatched rows keep nulls in all
/// secondary columns, and the secondary set is pre-deduplicated so no fan-out
/// can occur. Output preserves primary input order. Both key columns are kept
/// so the unmatched partition can be detected downstream.
pub fn merge(primary: &DataFrame, secondary: &DataFrame) -> PolarsResult<DataFrame> {
    let mut args = JoinArgs::new(JoinType::Left);
    args.coalesce = JoinCoalesce::KeepColumns;
    args.maintain_order = MaintainOrderJoin::Left;

    let merged = primary
        .clone()
        .lazy()
        .join(
            secondary.clone().lazy(),
            [col(JOIN_KEY_COLUMN)],
            [col(SECONDARY_KEY_COLUMN)],
            args,
        )
        .collect()?;

    debug!(rows = merged.height(), "merged primary and secondary sources");
    Ok(merged)
}

/// Scalar contract for the poster URL: base URL plus path, or absent.
pub fn derive_poster_url(base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path.map(|path| format!("{base_url}{path}"))
}

/// Append the `poster_full_url` column: `base_url ++ poster_path` where the
/// path is present, null otherwise.
pub fn attach_poster_urls(frame: &DataFrame, base_url: &str) -> PolarsResult<DataFrame> {
    frame
        .clone()
        .lazy()
        .with_column(
            // null propagation: a null poster_path yields a null URL
            concat_str([lit(base_url), col("poster_path")], "", false)
                .alias(POSTER_URL_COLUMN),
        )
        .collect()
}
