//! Row codec - the line-oriented on-disk form of a [`Page`].
//!
//! # File Format
//! ```text
//! row 0:  1;11;;;;;2;12;20;;;;      <- root
//! row 1:  ...
//! row n:  k0;..;k5;v0;..;v6
//! ```
//! Rows are separated by `\n`. A row is exactly 13 fields separated by `;`,
//! the first six are keys and the last seven values. An empty field is the
//! sentinel `0`; any other field is an unsigned decimal integer.
//!
//! There is no header, checksum or free list. A page's identity is its row
//! position.

use crate::common::config::{
    FIELDS_PER_ROW, FIELD_SEPARATOR, KEYS_PER_PAGE, ROW_SEPARATOR, SENTINEL, VALUES_PER_PAGE,
};
use crate::common::{Error, Result, RowId};

use super::page::Page;

/// Select one row of a file's content.
///
/// # Errors
/// Returns `Error::RowNotFound` if the content has fewer rows.
pub fn read_row<'a>(file: &str, content: &'a str, row: RowId) -> Result<&'a str> {
    row.line()
        .and_then(|index| content.split(ROW_SEPARATOR).nth(index))
        .ok_or_else(|| Error::RowNotFound {
            file: file.to_string(),
            row,
            rows: content.split(ROW_SEPARATOR).count(),
        })
}

/// Decode one row into a page owned by `file`.
///
/// # Errors
/// - `Error::FieldCount` if the row is not exactly 13 fields
/// - `Error::InvalidField` if a non-empty field is not a `u64`
pub fn decode_row(file: &str, row: RowId, line: &str) -> Result<Page> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELDS_PER_ROW {
        return Err(Error::FieldCount {
            row,
            found: fields.len(),
            expected: FIELDS_PER_ROW,
        });
    }

    let mut keys = [SENTINEL; KEYS_PER_PAGE];
    let mut values = [SENTINEL; VALUES_PER_PAGE];

    for (index, field) in fields.iter().enumerate() {
        let number = parse_field(row, index, field)?;
        if index < KEYS_PER_PAGE {
            keys[index] = number;
        } else {
            values[index - KEYS_PER_PAGE] = number;
        }
    }

    Ok(Page::from_parts(file, row, keys, values))
}

fn parse_field(row: RowId, index: usize, field: &str) -> Result<u64> {
    if field.is_empty() {
        return Ok(SENTINEL);
    }
    field.parse::<u64>().map_err(|_| Error::InvalidField {
        row,
        index,
        field: field.to_string(),
    })
}

/// Encode a page as one row (without the trailing row separator).
pub fn encode_row(page: &Page) -> String {
    let fields: Vec<String> = page
        .keys()
        .iter()
        .chain(page.values().iter())
        .map(|&n| match n {
            SENTINEL => String::new(),
            n => n.to_string(),
        })
        .collect();

    fields.join(FIELD_SEPARATOR.to_string().as_str())
}

/// Rebuild a file's content with one row replaced.
///
/// Every other row, and a trailing row separator if present, is kept
/// byte-for-byte.
///
/// # Errors
/// Returns `Error::RowNotFound` if the content has fewer rows.
pub fn replace_row(file: &str, content: &str, row: RowId, line: &str) -> Result<String> {
    let mut rows: Vec<&str> = content.split(ROW_SEPARATOR).collect();
    let count = rows.len();

    let slot = match row.line() {
        Some(index) if index < count => &mut rows[index],
        _ => {
            return Err(Error::RowNotFound {
                file: file.to_string(),
                row,
                rows: count,
            })
        }
    };
    *slot = line;

    Ok(rows.join(ROW_SEPARATOR.to_string().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "1;11;;;;;2;12;;;;;";

    #[test]
    fn test_decode_root_row() {
        let page = decode_row("tree", RowId::ROOT, ROOT).unwrap();
        assert_eq!(page.keys(), &[1, 11, 0, 0, 0, 0]);
        assert_eq!(page.values(), &[2, 12, 0, 0, 0, 0, 0]);
        assert_eq!(page.file(), "tree");
    }

    #[test]
    fn test_encode_matches_source_row() {
        let page = decode_row("tree", RowId::ROOT, ROOT).unwrap();
        assert_eq!(encode_row(&page), ROOT);
    }

    #[test]
    fn test_empty_row_is_empty_page() {
        let page = decode_row("tree", RowId::new(3), ";;;;;;;;;;;;").unwrap();
        assert!(page.is_empty());
        assert_eq!(encode_row(&page), ";;;;;;;;;;;;");
    }

    #[test]
    fn test_wrong_field_count() {
        let err = decode_row("tree", RowId::ROOT, "1;2;3").unwrap_err();
        assert!(matches!(err, Error::FieldCount { found: 3, .. }));

        let err = decode_row("tree", RowId::ROOT, "").unwrap_err();
        assert!(matches!(err, Error::FieldCount { found: 1, .. }));

        let err = decode_row("tree", RowId::ROOT, "1;11;;;;;2;12;;;;;;").unwrap_err();
        assert!(matches!(err, Error::FieldCount { found: 14, .. }));
    }

    #[test]
    fn test_non_numeric_field() {
        let err = decode_row("tree", RowId::ROOT, "1;2;3;4;5;6;a;b;c;d;e;f;g").unwrap_err();
        match err {
            Error::InvalidField { index, field, .. } => {
                assert_eq!(index, 6);
                assert_eq!(field, "a");
            }
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_read_row() {
        let content = format!("{ROOT}\n;;;;;;;;;;;;\n");
        assert_eq!(read_row("tree", &content, RowId::new(0)).unwrap(), ROOT);
        assert_eq!(read_row("tree", &content, RowId::new(1)).unwrap(), ";;;;;;;;;;;;");
        // Trailing separator yields an empty last row.
        assert_eq!(read_row("tree", &content, RowId::new(2)).unwrap(), "");

        let err = read_row("tree", &content, RowId::new(3)).unwrap_err();
        assert!(matches!(err, Error::RowNotFound { rows: 3, .. }));
    }

    #[test]
    fn test_replace_row_keeps_other_rows() {
        let content = "a\nb\nc\n";
        let rebuilt = replace_row("tree", content, RowId::new(1), "x").unwrap();
        assert_eq!(rebuilt, "a\nx\nc\n");

        let content = "a\nb";
        let rebuilt = replace_row("tree", content, RowId::new(0), "x").unwrap();
        assert_eq!(rebuilt, "x\nb");
    }

    #[test]
    fn test_replace_missing_row() {
        let err = replace_row("tree", "a\nb", RowId::new(5), "x").unwrap_err();
        assert!(matches!(err, Error::RowNotFound { rows: 2, .. }));
    }

    #[test]
    fn test_huge_row_is_not_found() {
        let content = format!("{ROOT}\n");
        let row = RowId::new(u64::MAX);

        let err = read_row("tree", &content, row).unwrap_err();
        assert!(matches!(err, Error::RowNotFound { rows: 2, .. }));

        let err = replace_row("tree", &content, row, "x").unwrap_err();
        assert!(matches!(err, Error::RowNotFound { rows: 2, .. }));
    }
}
