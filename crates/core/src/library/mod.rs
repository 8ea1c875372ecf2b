//! Kazakh movie library import: one xlsx worksheet into a SQLite table.

mod import;

pub use import::{
    import_library, load_library_sheet, normalize_header, preview_rows, write_library_table,
    ImportSummary, LibraryError, LibrarySheet, DEFAULT_LIBRARY_DB, DEFAULT_LIBRARY_SOURCE,
    LIBRARY_TABLE,
};
