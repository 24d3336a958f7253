use anyhow::{bail, Result};
use tracing::debug;

use super::{Dataset, Record};

/// Parse delimited text into a `Dataset`.
///
/// The first non-blank line is the header; every later non-blank line is a
/// data row whose field *i* is stored under header key *i*. Rows shorter
/// than the header leave the trailing keys absent; extra fields are
/// dropped. Only a missing header row is an error.
pub fn parse_csv(text: &str) -> Result<Dataset> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header_line = match lines.next() {
        Some(l) => l,
        None => bail!("no header row"),
    };
    let headers: Vec<String> = split_fields(header_line);

    let mut records = Vec::new();
    for line in lines {
        let fields = split_fields(line);
        let mut record = Record::new();
        for (key, value) in headers.iter().zip(fields) {
            record.insert(key.clone(), value);
        }
        records.push(record);
    }

    debug!(columns = headers.len(), rows = records.len(), "parsed csv");
    Ok(Dataset { headers, records })
}

/// Split one CSV line into fields, honouring double-quoted fields with
/// embedded delimiters and `""` escapes. Each field is cleaned via
/// `clean_field`.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(clean_field(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(clean_field(&current));
    fields
}

/// Trim whitespace from a raw field value.
fn clean_field(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_excludes_header_and_blanks() -> Result<()> {
        let text = "game_date,events\n\n2024-01-01,single\n   \n2024-01-02,\n";
        let ds = parse_csv(text)?;
        assert_eq!(ds.headers, vec!["game_date", "events"]);
        assert_eq!(ds.len(), 2);
        Ok(())
    }

    #[test]
    fn values_keyed_by_header() -> Result<()> {
        let ds = parse_csv("game_date,events\n2024-01-01,single\n")?;
        let rec = &ds.records[0];
        assert_eq!(rec.get("game_date").map(String::as_str), Some("2024-01-01"));
        assert_eq!(rec.get("events").map(String::as_str), Some("single"));
        Ok(())
    }

    #[test]
    fn ragged_row_leaves_trailing_fields_absent() -> Result<()> {
        let ds = parse_csv("a,b,c\n1,2\n")?;
        let rec = &ds.records[0];
        assert_eq!(rec.get("a").map(String::as_str), Some("1"));
        assert_eq!(rec.get("b").map(String::as_str), Some("2"));
        assert!(rec.get("c").is_none());
        Ok(())
    }

    #[test]
    fn extra_fields_beyond_header_dropped() -> Result<()> {
        let ds = parse_csv("a,b\n1,2,3\n")?;
        assert_eq!(ds.records[0].len(), 2);
        Ok(())
    }

    #[test]
    fn quoted_field_keeps_embedded_delimiter() -> Result<()> {
        let ds = parse_csv("description,events\n\"swinging strike, blocked\",strikeout\n")?;
        assert_eq!(
            ds.records[0].get("description").map(String::as_str),
            Some("swinging strike, blocked")
        );
        Ok(())
    }

    #[test]
    fn doubled_quote_is_escaped_quote() -> Result<()> {
        let ds = parse_csv("a\n\"he said \"\"go\"\"\"\n")?;
        assert_eq!(
            ds.records[0].get("a").map(String::as_str),
            Some("he said \"go\"")
        );
        Ok(())
    }

    #[test]
    fn crlf_line_endings_tolerated() -> Result<()> {
        let ds = parse_csv("a,b\r\n1,2\r\n")?;
        assert_eq!(ds.records[0].get("b").map(String::as_str), Some("2"));
        Ok(())
    }

    #[test]
    fn json_round_trip_preserves_fields() -> Result<()> {
        let text = "game_date,description,events\n\
                    2024-01-01,\"foul, tip\",\n\
                    2024-01-02,ball\n\
                    2024-01-03,hit_into_play,home_run\n";
        let ds = parse_csv(text)?;
        let value = serde_json::to_value(&ds.records)?;
        let back: Vec<Record> = serde_json::from_value(value)?;
        assert_eq!(back, ds.records);
        Ok(())
    }

    #[test]
    fn empty_input_is_parse_error() {
        let err = parse_csv("  \n\n").unwrap_err();
        assert!(err.to_string().contains("no header row"));
    }
}
