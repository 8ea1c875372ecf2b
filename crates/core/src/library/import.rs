use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use thiserror::Error;
use tracing::info;

/// Fixed source spreadsheet name.
pub const DEFAULT_LIBRARY_SOURCE: &str = "kazData.xlsx";

/// The separate library database created by the import.
pub const DEFAULT_LIBRARY_DB: &str = "kazakh_library.db";

/// Table name inside the library database.
pub const LIBRARY_TABLE: &str = "kaz_movies";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Could not find source spreadsheet '{}'", path.display())]
    SourceMissing { path: PathBuf },

    #[error("Failed to read workbook '{}'", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook '{}' contains no data", path.display())]
    EmptySheet { path: PathBuf },

    #[error("Database operation failed")]
    Database(#[from] rusqlite::Error),
}

/// One worksheet, split into normalized headers and raw cell rows.
#[derive(Debug, Clone)]
pub struct LibrarySheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Clean a spreadsheet header for SQL use: `Movie Name` -> `movie_name`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().replace(' ', "_").to_lowercase()
}

/// SQLite column affinity inferred from the first non-empty cell.
fn column_affinity(rows: &[Vec<Data>], index: usize) -> &'static str {
    for row in rows {
        match row.get(index) {
            Some(Data::Int(_)) | Some(Data::Bool(_)) => return "INTEGER",
            Some(Data::Float(_)) => return "REAL",
            Some(Data::Empty) | None => continue,
            Some(_) => return "TEXT",
        }
    }
    "TEXT"
}

fn sql_value(cell: Option<&Data>) -> SqlValue {
    match cell {
        None | Some(Data::Empty) => SqlValue::Null,
        Some(Data::Int(value)) => SqlValue::Integer(*value),
        Some(Data::Float(value)) => SqlValue::Real(*value),
        Some(Data::Bool(value)) => SqlValue::Integer(i64::from(*value)),
        Some(Data::String(value)) => SqlValue::Text(value.clone()),
        Some(other) => SqlValue::Text(other.to_string()),
    }
}

/// Read the first worksheet of an xlsx file into headers plus rows.
pub fn load_library_sheet(path: &Path) -> Result<LibrarySheet, LibraryError> {
    if !path.exists() {
        return Err(LibraryError::SourceMissing {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|source| LibraryError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names.first().ok_or_else(|| LibraryError::EmptySheet {
        path: path.to_path_buf(),
    })?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|source| LibraryError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| LibraryError::EmptySheet {
        path: path.to_path_buf(),
    })?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell.to_string()))
        .collect();
    let rows: Vec<Vec<Data>> = rows.map(<[Data]>::to_vec).collect();

    Ok(LibrarySheet { headers, rows })
}

/// Drop and recreate the library table, then insert every row in one
/// transaction. Re-running the import replaces the prior contents.
pub fn write_library_table(
    conn: &mut Connection,
    sheet: &LibrarySheet,
) -> Result<usize, LibraryError> {
    let declarations: Vec<String> = sheet
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| format!("\"{}\" {}", header, column_affinity(&sheet.rows, index)))
        .collect();
    let placeholders: Vec<String> = (1..=sheet.headers.len())
        .map(|index| format!("?{index}"))
        .collect();

    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {LIBRARY_TABLE}; CREATE TABLE {LIBRARY_TABLE} ({});",
        declarations.join(", ")
    ))?;

    {
        let mut statement = tx.prepare(&format!(
            "INSERT INTO {LIBRARY_TABLE} (\"{}\") VALUES ({})",
            sheet.headers.join("\", \""),
            placeholders.join(", ")
        ))?;
        for row in &sheet.rows {
            statement.execute(rusqlite::params_from_iter(
                (0..sheet.headers.len()).map(|index| sql_value(row.get(index))),
            ))?;
        }
    }
    tx.commit()?;

    Ok(sheet.rows.len())
}

/// Convert the library spreadsheet into its own SQLite database.
pub fn import_library(xlsx_path: &Path, db_path: &Path) -> Result<ImportSummary, LibraryError> {
    let sheet = load_library_sheet(xlsx_path)?;
    info!(
        rows = sheet.rows.len(),
        columns = ?sheet.headers,
        "loaded library spreadsheet"
    );

    let mut conn = Connection::open(db_path)?;
    let rows = write_library_table(&mut conn, &sheet)?;

    Ok(ImportSummary {
        rows,
        columns: sheet.headers,
    })
}

/// Fetch the first `limit` stored rows, stringified, for console preview.
pub fn preview_rows(conn: &Connection, limit: usize) -> Result<Vec<Vec<String>>, LibraryError> {
    let mut statement = conn.prepare(&format!("SELECT * FROM {LIBRARY_TABLE} LIMIT ?1"))?;
    let column_count = statement.column_count();

    let rows = statement.query_map([limit as i64], |row| {
        let mut cells = Vec::with_capacity(column_count);
        for index in 0..column_count {
            let cell = match row.get_ref(index)? {
                rusqlite::types::ValueRef::Null => String::from(""),
                rusqlite::types::ValueRef::Integer(value) => value.to_string(),
                rusqlite::types::ValueRef::Real(value) => value.to_string(),
                rusqlite::types::ValueRef::Text(value) => {
                    String::from_utf8_lossy(value).into_owned()
                }
                rusqlite::types::ValueRef::Blob(value) => format!("<{} bytes>", value.len()),
            };
            cells.push(cell);
        }
        Ok(cells)
    })?;

    let mut collected = Vec::new();
    for row in rows {
        collected.push(row?);
    }
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_fixture() -> LibrarySheet {
        LibrarySheet {
            headers: vec![
                normalize_header("Movie Name"),
                normalize_header(" Year "),
                normalize_header("Rating"),
            ],
            rows: vec![
                vec![
                    Data::String("Menin atym Qoja".to_string()),
                    Data::Int(1963),
                    Data::Float(8.2),
                ],
                vec![
                    Data::String("Kyz-Zhibek".to_string()),
                    Data::Int(1970),
                    Data::Empty,
                ],
            ],
        }
    }

    #[test]
    fn headers_are_normalized() {
        assert_eq!(normalize_header("Movie Name"), "movie_name");
        assert_eq!(normalize_header("  Release Year "), "release_year");
        assert_eq!(normalize_header("rating"), "rating");
    }

    #[test]
    fn affinity_comes_from_first_non_empty_cell() {
        let rows = vec![
            vec![Data::Empty, Data::Empty],
            vec![Data::Int(5), Data::String("x".to_string())],
        ];
        assert_eq!(column_affinity(&rows, 0), "INTEGER");
        assert_eq!(column_affinity(&rows, 1), "TEXT");
        // all-empty column defaults to TEXT
        assert_eq!(column_affinity(&[vec![Data::Empty]], 0), "TEXT");
    }

    #[test]
    fn writes_all_rows_into_sqlite() {
        let mut conn = Connection::open_in_memory().unwrap();
        let inserted = write_library_table(&mut conn, &sheet_fixture()).unwrap();
        assert_eq!(inserted, 2);

        let preview = preview_rows(&conn, 3).unwrap();
        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0][0], "Menin atym Qoja");
        assert_eq!(preview[0][1], "1963");
        // empty cell stored as NULL, previewed as empty string
        assert_eq!(preview[1][2], "");
    }

    #[test]
    fn rerun_replaces_prior_contents() {
        let mut conn = Connection::open_in_memory().unwrap();
        write_library_table(&mut conn, &sheet_fixture()).unwrap();

        let mut smaller = sheet_fixture();
        smaller.rows.truncate(1);
        write_library_table(&mut conn, &smaller).unwrap();

        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {LIBRARY_TABLE}"), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn missing_source_is_a_named_error() {
        let result = load_library_sheet(Path::new("nowhere/kazData.xlsx"));
        assert!(matches!(result, Err(LibraryError::SourceMissing { .. })));
    }
}
