//! Join-key derivation from the primary source's free-text `Link` field.

use std::sync::LazyLock;

use polars::prelude::*;
use regex::Regex;

/// Name of the derived join-key column.
pub const JOIN_KEY_COLUMN: &str = "join_key";

/// IMDb title identifiers embedded in catalog links: `tt` followed by digits.
static IMDB_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tt\d+").expect("invalid imdb id regex"));

/// Extract the leftmost IMDb identifier from a free-text link.
///
/// Pure and total: absence of a match is an expected outcome, not an error.
pub fn extract_join_key(link: &str) -> Option<&str> {
    IMDB_ID_PATTERN.find(link).map(|found| found.as_str())
}

/// Append a `join_key` column derived from `link_column`.
///
/// The link column itself is never mutated. Cells that are null or carry no
/// identifier yield a null key. Non-string link columns are cast to text
/// first, which degrades to "no key" rather than failing the run.
pub fn attach_join_key(frame: &DataFrame, link_column: &str) -> PolarsResult<DataFrame> {
    let links = frame.column(link_column)?.cast(&DataType::String)?;
    let links = links.str()?;

    let keys: Vec<Option<&str>> = links
        .into_iter()
        .map(|cell| cell.and_then(extract_join_key))
        .collect();

    let mut out = frame.clone();
    out.with_column(Series::new(JOIN_KEY_COLUMN.into(), keys))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_imdb_url() {
        assert_eq!(
            extract_join_key("https://imdb.com/title/tt0111161/"),
            Some("tt0111161")
        );
    }

    #[test]
    fn returns_leftmost_match_when_several_present() {
        assert_eq!(
            extract_join_key("tt123 then tt456"),
            Some("tt123")
        );
    }

    #[test]
    fn no_match_yields_none() {
        assert_eq!(extract_join_key("not-a-url"), None);
        assert_eq!(extract_join_key(""), None);
        assert_eq!(extract_join_key("tt"), None);
    }

    #[test]
    fn match_can_sit_anywhere_in_the_text() {
        assert_eq!(extract_join_key("see tt42 for details"), Some("tt42"));
    }

    #[test]
    fn attach_join_key_keeps_link_untouched() {
        let frame = df!(
            "Link" => &[
                Some("https://imdb.com/title/tt0111161/"),
                Some("not-a-url"),
                None,
            ],
            "Movie Name" => &["Shawshank", "Mystery", "Ghost"]
        )
        .unwrap();

        let out = attach_join_key(&frame, "Link").unwrap();

        let keys: Vec<Option<&str>> = out
            .column(JOIN_KEY_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(keys, vec![Some("tt0111161"), None, None]);

        // original column survives unchanged
        let links = out.column("Link").unwrap().str().unwrap();
        assert_eq!(links.get(0), Some("https://imdb.com/title/tt0111161/"));
    }

    #[test]
    fn attach_join_key_tolerates_numeric_link_column() {
        let frame = df!("Link" => &[1i64, 2, 3]).unwrap();
        let out = attach_join_key(&frame, "Link").unwrap();
        assert_eq!(out.column(JOIN_KEY_COLUMN).unwrap().null_count(), 3);
    }
}
