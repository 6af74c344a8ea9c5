//! Decoder for `journalctl -o json` output.
//!
//! Each non-blank line is one JSON object. Field values are strings,
//! except that journald renders non-UTF-8 values as arrays of bytes and
//! oversized values as `null`.

use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::error::{JournalError, JournalResult};
use crate::types::{Cursor, LogRecord};

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "__CURSOR", default)]
    cursor: Option<String>,
    #[serde(rename = "MESSAGE", default)]
    message: Option<FieldValue>,
    #[serde(rename = "__REALTIME_TIMESTAMP", default)]
    realtime_timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Bytes(Vec<u8>),
    Other(serde_json::Value),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Bytes(b) => String::from_utf8_lossy(&b).into_owned(),
            Self::Other(serde_json::Value::Null) => String::new(),
            Self::Other(v) => v.to_string(),
        }
    }
}

/// Decode one line into a record.
pub fn parse_line(line: &str, line_number: usize) -> JournalResult<LogRecord> {
    let decode_err = |message: String| JournalError::Decode {
        line: line_number,
        message,
    };
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| decode_err(e.to_string()))?;
    if !value.is_object() {
        return Err(decode_err("expected a JSON object".to_string()));
    }
    let raw = RawEntry::deserialize(value).map_err(|e| decode_err(e.to_string()))?;

    let timestamp = raw
        .realtime_timestamp
        .and_then(|ts| ts.parse::<i64>().ok())
        .and_then(|us| Utc.timestamp_micros(us).single());

    Ok(LogRecord {
        cursor: raw.cursor.and_then(Cursor::new),
        message: raw.message.map(FieldValue::into_text).unwrap_or_default(),
        timestamp,
    })
}

/// Decode a whole query output.
///
/// All or nothing: the first undecodable line fails the batch.
pub fn parse_output(output: &str) -> JournalResult<Vec<LogRecord>> {
    output
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, line)| parse_line(line, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kernel_entry() {
        let line = r#"{"__CURSOR":"s=1f;i=9a2","__REALTIME_TIMESTAMP":"1705312801000000","PRIORITY":"3","_TRANSPORT":"kernel","MESSAGE":"Out of memory: Kill process 1234 (python) score 5 or sacrifice child"}"#;
        let record = parse_line(line, 1).unwrap();
        assert_eq!(record.cursor.unwrap().as_str(), "s=1f;i=9a2");
        assert!(record.message.starts_with("Out of memory"));
        assert_eq!(record.timestamp.unwrap().timestamp(), 1705312801);
    }

    #[test]
    fn byte_array_message_decoded_lossily() {
        let line = r#"{"__CURSOR":"c1","MESSAGE":[104,105,255]}"#;
        let record = parse_line(line, 1).unwrap();
        assert_eq!(record.message, "hi\u{fffd}");
    }

    #[test]
    fn null_or_missing_message_is_empty() {
        let record = parse_line(r#"{"__CURSOR":"c1","MESSAGE":null}"#, 1).unwrap();
        assert_eq!(record.message, "");
        let record = parse_line(r#"{"__CURSOR":"c2"}"#, 1).unwrap();
        assert_eq!(record.message, "");
    }

    #[test]
    fn missing_or_empty_cursor_is_none() {
        let record = parse_line(r#"{"MESSAGE":"x"}"#, 1).unwrap();
        assert!(record.cursor.is_none());
        let record = parse_line(r#"{"__CURSOR":"","MESSAGE":"x"}"#, 1).unwrap();
        assert!(record.cursor.is_none());
    }

    #[test]
    fn non_object_line_is_decode_error() {
        let err = parse_line("[1,2,3]", 4).unwrap_err();
        assert!(matches!(err, JournalError::Decode { line: 4, .. }));
        assert!(parse_line("[]", 1).is_err());
        assert!(parse_line(r#""MESSAGE""#, 1).is_err());
    }

    #[test]
    fn output_skips_blank_lines() {
        let output = "{\"__CURSOR\":\"a\",\"MESSAGE\":\"one\"}\n\n{\"__CURSOR\":\"b\",\"MESSAGE\":\"two\"}\n";
        let records = parse_output(output).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].message, "two");
    }

    #[test]
    fn one_bad_line_fails_whole_batch() {
        let output = "{\"__CURSOR\":\"a\",\"MESSAGE\":\"one\"}\nnot json\n{\"__CURSOR\":\"b\",\"MESSAGE\":\"two\"}";
        let err = parse_output(output).unwrap_err();
        assert!(matches!(err, JournalError::Decode { line: 2, .. }));
    }

    #[test]
    fn empty_output_is_empty_batch() {
        assert!(parse_output("").unwrap().is_empty());
    }
}
