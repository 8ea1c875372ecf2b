use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Base URL prepended to TMDB poster paths to form a display-ready image URL.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Configuration for one reconciliation run.
///
/// The defaults are the fixed production file names; tests and the CLI's
/// `--data-dir` flag re-root them without touching the names themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// First source: the IMDb top-10k export (columns `Link`, `Movie Name`, ...).
    pub primary_path: PathBuf,
    /// Second source: the TMDB dump keyed by `imdb_id`.
    pub secondary_path: PathBuf,
    /// Primary output: the full merged catalog.
    pub output_path: PathBuf,
    /// Diagnostic output: unmatched rows only, written only when non-empty.
    pub report_path: PathBuf,
    pub poster_base_url: String,
    /// Number of unmatched rows shown in the console preview.
    pub preview_rows: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            primary_path: PathBuf::from("Top_10000_Movies_IMDb.csv"),
            secondary_path: PathBuf::from("TMDB_all_movies.csv"),
            output_path: PathBuf::from("AITUCAP_Final_Database.csv"),
            report_path: PathBuf::from("missing_movies_report.csv"),
            poster_base_url: POSTER_BASE_URL.to_string(),
            preview_rows: 10,
        }
    }
}

impl ReconcileConfig {
    /// Resolve every file name against `dir`, keeping the names themselves.
    pub fn rooted_at(self, dir: &Path) -> Self {
        Self {
            primary_path: dir.join(self.primary_path),
            secondary_path: dir.join(self.secondary_path),
            output_path: dir.join(self.output_path),
            report_path: dir.join(self.report_path),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_fixed_names() {
        let config = ReconcileConfig::default();
        assert_eq!(config.primary_path, Path::new("Top_10000_Movies_IMDb.csv"));
        assert_eq!(config.output_path, Path::new("AITUCAP_Final_Database.csv"));
        assert_eq!(config.poster_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.preview_rows, 10);
    }

    #[test]
    fn rooted_at_preserves_file_names() {
        let config = ReconcileConfig::default().rooted_at(Path::new("/data"));
        assert_eq!(
            config.secondary_path,
            Path::new("/data/TMDB_all_movies.csv")
        );
        assert_eq!(
            config.report_path,
            Path::new("/data/missing_movies_report.csv")
        );
    }
}
