//! CSV tokenizer for coordinate files.
//!
//! Turns already-loaded file text into rows of string fields:
//! - fields are separated by commas, rows by `\n`, `\r\n` or `\r`
//! - double-quoted fields may contain commas and line breaks
//! - `""` inside a quoted field is a literal quote
//! - unquoted fields are kept verbatim, whitespace included
//! - blank lines produce no row
//!
//! Input that ends inside a quoted field is not an error: the last row
//! keeps whatever was read up to the end of the text.

use csv::{ReaderBuilder, StringRecord};

/// Parse `text` into fully materialized rows.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let offset = reader.position().byte();
        match reader.read_record(&mut record) {
            Ok(true) => rows.push(record.iter().map(str::to_owned).collect()),
            Ok(false) => break,
            Err(err) => {
                tracing::warn!("Skipping unreadable CSV row at byte {}: {}", offset, err);
                // Stop if the reader cannot make progress past the bad row.
                if err.is_io_error() || reader.position().byte() <= offset {
                    break;
                }
            }
        }
    }

    tracing::trace!("Parsed {} CSV rows from {} bytes", rows.len(), text.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(expected: &[&[&str]]) -> Vec<Vec<String>> {
        expected
            .iter()
            .map(|row| row.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_plain_rows() {
        assert_eq!(parse_csv("a,b\nc,d"), rows(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn test_quoted_separator() {
        assert_eq!(parse_csv("\"a,b\",c"), rows(&[&["a,b", "c"]]));
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(parse_csv("\"a\"\"b\",c"), rows(&[&["a\"b", "c"]]));
    }

    #[test]
    fn test_quoted_line_break() {
        assert_eq!(
            parse_csv("\"first\nsecond\",x\ny,z"),
            rows(&[&["first\nsecond", "x"], &["y", "z"]])
        );
    }

    #[test]
    fn test_whitespace_is_preserved() {
        assert_eq!(parse_csv(" a , b "), rows(&[&[" a ", " b "]]));
    }

    #[test]
    fn test_crlf_and_trailing_newline() {
        assert_eq!(parse_csv("1,2\r\n3,4\r\n"), rows(&[&["1", "2"], &["3", "4"]]));
    }

    #[test]
    fn test_ragged_rows() {
        assert_eq!(
            parse_csv("1\n2,3,4\n5,6"),
            rows(&[&["1"], &["2", "3", "4"], &["5", "6"]])
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(parse_csv("1,2\n\n3,4"), rows(&[&["1", "2"], &["3", "4"]]));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(parse_csv("a,,c"), rows(&[&["a", "", "c"]]));
    }

    #[test]
    fn test_unterminated_quote_keeps_partial_row() {
        let parsed = parse_csv("1,2\n\"open,3\n4");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], vec!["1", "2"]);
        assert_eq!(parsed[1], vec!["open,3\n4"]);
    }
}
