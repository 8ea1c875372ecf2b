//! Dataset reconciler: merge the IMDb top-10k catalog with the TMDB dump.
//!
//! One pass over two fully-loaded tabular sources:
//! load -> validate -> derive join key -> dedup secondary -> left join ->
//! derive poster URL -> partition -> persist. Single-threaded, no partial
//! output: persistence only starts after the merge has completed.

mod key;
mod merge;
mod prepare;
mod report;

use polars::prelude::*;
use thiserror::Error;
use tracing::info;

pub use key::{attach_join_key, extract_join_key, JOIN_KEY_COLUMN};
pub use merge::{attach_poster_urls, derive_poster_url, merge, POSTER_URL_COLUMN};
pub use prepare::{prepare_secondary, SECONDARY_COLUMNS, SECONDARY_KEY_COLUMN};
pub use report::{partition_and_persist, ReconcileReport, ReconcileWarning};

use crate::config::ReconcileConfig;
use crate::io::{load_csv, require_columns, TableIoError};

/// Free-text link column of the primary source.
pub const PRIMARY_LINK_COLUMN: &str = "Link";

/// Display-name column of the primary source, used for the unmatched preview.
pub const PRIMARY_TITLE_COLUMN: &str = "Movie Name";

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Io(#[from] TableIoError),

    #[error("Dataframe operation failed: {0}")]
    Frame(#[from] PolarsError),
}

/// Single-run reconciler over two tabular sources.
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Execute the full load -> transform -> join -> persist pass.
    ///
    /// A missing required column aborts before any output is written.
    /// Rows without an extractable key or without a secondary match are
    /// expected outcomes and only surface in the returned report.
    pub fn run(&self) -> Result<ReconcileReport, ReconcileError> {
        info!(
            primary = %self.config.primary_path.display(),
            secondary = %self.config.secondary_path.display(),
            "loading datasets"
        );
        let primary = load_csv(&self.config.primary_path)?;
        let secondary = load_csv(&self.config.secondary_path)?;

        require_columns(&primary, "primary", &[PRIMARY_LINK_COLUMN])?;
        require_columns(&secondary, "secondary", &SECONDARY_COLUMNS)?;

        let primary = attach_join_key(&primary, PRIMARY_LINK_COLUMN)?;
        let secondary = prepare_secondary(&secondary)?;

        let merged = merge(&primary, &secondary)?;
        let merged = attach_poster_urls(&merged, &self.config.poster_base_url)?;

        partition_and_persist(&merged, &self.config)
    }
}
