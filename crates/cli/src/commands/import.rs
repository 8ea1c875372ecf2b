use std::path::PathBuf;

use aitucap_core::library::{
    import_library, preview_rows, DEFAULT_LIBRARY_DB, DEFAULT_LIBRARY_SOURCE, LIBRARY_TABLE,
};
use anyhow::Result;
use clap::Parser;
use rusqlite::Connection;

const PREVIEW_LIMIT: usize = 3;

/// Convert the Kazakh movie spreadsheet into its own SQLite database
#[derive(Debug, Parser)]
pub struct ImportLibraryCommand {
    /// Source spreadsheet
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LIBRARY_SOURCE)]
    pub source: PathBuf,

    /// Target database file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LIBRARY_DB)]
    pub db: PathBuf,
}

impl ImportLibraryCommand {
    pub fn execute(&self) -> Result<i32> {
        println!("Reading '{}'...", self.source.display());
        let summary = import_library(&self.source, &self.db)?;

        println!(
            "Imported {} movies into '{}' (table '{}')",
            summary.rows,
            self.db.display(),
            LIBRARY_TABLE
        );
        println!("Columns: {:?}", summary.columns);

        // read back a few stored rows to prove the import landed
        let conn = Connection::open(&self.db)?;
        let preview = preview_rows(&conn, PREVIEW_LIMIT)?;
        if !preview.is_empty() {
            println!();
            println!("Preview of saved data:");
            for row in preview {
                println!("  {}", row.join(" | "));
            }
        }

        Ok(0)
    }
}
