//! Input records and payload decoding

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::{DocumentMeta, Error, Result};

/// A short text record (a tweet) handed to the indexing pipeline.
///
/// Accepts both the upload format's capitalised keys (`Id`, `Author`, `Content`)
/// and lowercase keys. Other keys in an upload object are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Author")]
    pub author: String,
    #[serde(alias = "Content")]
    pub content: String,
}

impl Record {
    pub fn new(id: impl Into<String>, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            content: content.into(),
        }
    }

    /// Identifying metadata carried through indexing unchanged.
    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            id: self.id.clone(),
            author: self.author.clone(),
        }
    }
}

fn control_whitespace() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\n\r\t]").expect("static pattern is valid"))
}

/// Decode an uploaded payload into records.
///
/// Newlines, carriage returns and tabs are removed before decoding, so records
/// exported with hard-wrapped content still parse. The payload must be a JSON
/// array of objects with `id`, `author` and `content` string fields.
pub fn parse_records(raw: &str) -> Result<Vec<Record>> {
    let cleaned = control_whitespace().replace_all(raw, "");
    if cleaned.trim().is_empty() {
        return Err(Error::MalformedInput("payload is empty".to_string()));
    }

    serde_json::from_str::<Vec<Record>>(&cleaned)
        .map_err(|e| Error::MalformedInput(format!("expected a JSON array of records: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capitalised_keys() {
        let raw = r#"[{"Id": "1", "Author": "a", "Content": "cats are great"}]"#;
        let records = parse_records(raw).unwrap();
        assert_eq!(records, vec![Record::new("1", "a", "cats are great")]);
    }

    #[test]
    fn test_parse_ignores_extra_keys() {
        let raw = r#"[{"Id": "1", "Author": "a", "Content": "cats", "Date": "2024-01-01", "Likes": 12}]"#;
        let records = parse_records(raw).unwrap();
        assert_eq!(records, vec![Record::new("1", "a", "cats")]);
    }

    #[test]
    fn test_parse_strips_control_whitespace() {
        let raw = "[\n\t{\"id\": \"7\",\r\n \"author\": \"z\", \"content\": \"line one\nline two\"}\n]\n";
        let records = parse_records(raw).unwrap();
        assert_eq!(records[0].content, "line oneline two");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = parse_records(r#"{"id": "1", "author": "a", "content": "x"}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed_input");

        let err = parse_records(r#"[{"id": 1, "author": "a", "content": "x"}]"#).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));

        let err = parse_records(r#"[{"id": "1", "content": "x"}]"#).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_parse_empty_payload() {
        assert!(matches!(parse_records(" \n\t"), Err(Error::MalformedInput(_))));
        assert_eq!(parse_records("[]").unwrap(), Vec::<Record>::new());
    }
}
