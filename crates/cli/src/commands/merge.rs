use std::path::PathBuf;

use aitucap_core::{ReconcileConfig, Reconciler};
use anyhow::Result;
use clap::Parser;

/// Merge the IMDb top-10k catalog with the TMDB dump
#[derive(Debug, Parser)]
pub struct MergeCommand {
    /// Directory holding the input CSVs and receiving the outputs
    /// (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl MergeCommand {
    pub fn execute(&self) -> Result<i32> {
        let config = match &self.data_dir {
            Some(dir) => ReconcileConfig::default().rooted_at(dir),
            None => ReconcileConfig::default(),
        };

        println!("Loading datasets...");
        let report = Reconciler::new(config.clone()).run()?;

        println!("{}", "-".repeat(40));
        println!("Total movies processed: {}", report.total_rows);
        println!("Movies with no match:   {}", report.unmatched_rows);
        println!("{}", "-".repeat(40));

        if let Some(preview) = &report.preview {
            println!("Sample of movies that didn't match:");
            println!("{preview}");
        }
        for warning in &report.warnings {
            println!("{warning}");
        }
        if report.unmatched_rows > 0 {
            println!(
                "Unmatched rows written to '{}'",
                config.report_path.display()
            );
        }

        println!(
            "Done. Merged catalog written to '{}'",
            config.output_path.display()
        );
        Ok(0)
    }
}
