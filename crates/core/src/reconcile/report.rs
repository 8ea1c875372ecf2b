//! Output partitioning, persistence, and the unmatched-row diagnostic.

use std::fmt;

use polars::prelude::*;
use tracing::{debug, warn};

use super::key::JOIN_KEY_COLUMN;
use super::prepare::SECONDARY_KEY_COLUMN;
use super::{ReconcileError, PRIMARY_TITLE_COLUMN};
use crate::config::ReconcileConfig;
use crate::io::write_csv;

/// Internal/redundant columns stripped from the primary output.
const DROPPED_COLUMNS: [&str; 3] = [JOIN_KEY_COLUMN, SECONDARY_KEY_COLUMN, "poster_path"];

/// Outcome of one reconciliation run.
#[derive(Debug)]
pub struct ReconcileReport {
    pub total_rows: usize,
    pub unmatched_rows: usize,
    /// First N unmatched rows as (name, key) pairs, when they could be built.
    pub preview: Option<DataFrame>,
    pub warnings: Vec<ReconcileWarning>,
}

/// Non-fatal degradations surfaced to the caller instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileWarning {
    /// The best-effort unmatched preview could not be assembled; the
    /// persisted outputs are unaffected.
    PreviewUnavailable { detail: String },
}

impl fmt::Display for ReconcileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreviewUnavailable { detail } => write!(
                f,
                "Could not print specific names ({detail}); check the unmatched report file"
            ),
        }
    }
}

/// Persist the full merged set, then the unmatched subset when non-empty.
///
/// The primary output always contains every merged row, matched or not,
/// minus the internal join key and the now-redundant `imdb_id` and
/// `poster_path` columns. The diagnostic file is only written when at least
/// one row failed to match. Preview construction is best-effort: failure is
/// captured as a warning, never propagated.
pub fn partition_and_persist(
    merged: &DataFrame,
    config: &ReconcileConfig,
) -> Result<ReconcileReport, ReconcileError> {
    let unmatched_mask = merged.column(SECONDARY_KEY_COLUMN)?.is_null();
    let unmatched = merged.filter(&unmatched_mask)?;

    let mut output = merged.clone();
    for column in DROPPED_COLUMNS {
        output = output.drop(column)?;
    }
    write_csv(&mut output, &config.output_path)?;
    debug!(
        rows = merged.height(),
        path = %config.output_path.display(),
        "wrote merged catalog"
    );

    let mut warnings = Vec::new();
    let mut preview = None;
    if unmatched.height() > 0 {
        let mut diagnostic = unmatched.clone();
        write_csv(&mut diagnostic, &config.report_path)?;

        match unmatched.select([PRIMARY_TITLE_COLUMN, JOIN_KEY_COLUMN]) {
            Ok(sample) => preview = Some(sample.head(Some(config.preview_rows))),
            Err(error) => {
                warn!(error = %error, "unmatched preview unavailable");
                warnings.push(ReconcileWarning::PreviewUnavailable {
                    detail: error.to_string(),
                });
            }
        }
    }

    Ok(ReconcileReport {
        total_rows: merged.height(),
        unmatched_rows: unmatched.height(),
        preview,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn merged_fixture() -> DataFrame {
        df!(
            "Link" => &["https://imdb.com/title/tt1/", "plain-text"],
            "Movie Name" => &["Matched", "Unmatched"],
            "join_key" => &[Some("tt1"), None],
            "imdb_id" => &[Some("tt1"), None],
            "poster_path" => &[Some("/p.jpg"), None],
            "budget" => &[Some(10i64), None],
            "release_date" => &[Some("2001-01-01"), None],
            "revenue" => &[Some(20i64), None],
            "title" => &[Some("Matched"), None],
            "poster_full_url" => &[Some("https://image.tmdb.org/t/p/w500/p.jpg"), None]
        )
        .unwrap()
    }

    fn config_in(dir: &TempDir) -> ReconcileConfig {
        ReconcileConfig::default().rooted_at(dir.path())
    }

    #[test]
    fn writes_full_output_without_internal_columns() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let report = partition_and_persist(&merged_fixture(), &config).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.unmatched_rows, 1);

        let output = crate::io::load_csv(&config.output_path).unwrap();
        assert_eq!(output.height(), 2);
        for dropped in DROPPED_COLUMNS {
            assert!(output.column(dropped).is_err(), "{dropped} should be gone");
        }
        assert!(output.column("poster_full_url").is_ok());
    }

    #[test]
    fn writes_diagnostic_only_when_unmatched_exists() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let report = partition_and_persist(&merged_fixture(), &config).unwrap();
        assert_eq!(report.unmatched_rows, 1);
        assert!(config.report_path.is_file());

        let diagnostic = crate::io::load_csv(&config.report_path).unwrap();
        assert_eq!(diagnostic.height(), 1);
    }

    #[test]
    fn skips_diagnostic_when_everything_matched() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let merged = merged_fixture();
        let matched_only = merged
            .filter(&merged.column("imdb_id").unwrap().is_not_null())
            .unwrap();

        let report = partition_and_persist(&matched_only, &config).unwrap();
        assert_eq!(report.unmatched_rows, 0);
        assert!(report.preview.is_none());
        assert!(!config.report_path.exists());
    }

    #[test]
    fn preview_is_bounded_and_named() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.preview_rows = 1;

        let report = partition_and_persist(&merged_fixture(), &config).unwrap();
        let preview = report.preview.expect("preview present");
        assert_eq!(preview.height(), 1);
        let names: Vec<String> = preview
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["Movie Name", "join_key"]);
    }

    #[test]
    fn preview_failure_degrades_to_warning() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        // a merged frame whose primary title column has an unexpected name
        let mut merged = merged_fixture();
        merged.rename("Movie Name", "movie_name".into()).unwrap();

        let report = partition_and_persist(&merged, &config).unwrap();
        assert!(report.preview.is_none());
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0],
            ReconcileWarning::PreviewUnavailable { .. }
        ));
        // persisted outputs unaffected
        assert!(config.output_path.is_file());
        assert!(config.report_path.is_file());
    }
}
