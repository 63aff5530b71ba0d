//! Response-shape normalization for the Calil library endpoint.
//!
//! Depending on account and parameters, the endpoint answers with a bare
//! array, an object holding a `libraries` array, an object holding a single
//! record, or any of those wrapped in a JSONP callback.

use serde::Deserialize;

use super::error::CalilError;
use super::types::RemoteLibraryRecord;

/// Longest body excerpt kept on a parse error.
const BODY_EXCERPT_LEN: usize = 200;

/// Every shape the endpoint has been seen to return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LibraryResponse {
    Flat(Vec<RemoteLibraryRecord>),
    Wrapped(Wrapped),
}

#[derive(Debug, Deserialize)]
pub struct Wrapped {
    #[serde(alias = "library", alias = "Library")]
    pub libraries: OneOrMany,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    Many(Vec<RemoteLibraryRecord>),
    One(Box<RemoteLibraryRecord>),
}

impl LibraryResponse {
    pub fn into_records(self) -> Vec<RemoteLibraryRecord> {
        match self {
            LibraryResponse::Flat(records) => records,
            LibraryResponse::Wrapped(Wrapped {
                libraries: OneOrMany::Many(records),
            }) => records,
            LibraryResponse::Wrapped(Wrapped {
                libraries: OneOrMany::One(record),
            }) => vec![*record],
        }
    }
}

/// Strip a JSONP wrapper like `callback({...});` if present.
///
/// Bodies that already start with `[` or `{` are returned unchanged.
pub fn strip_jsonp(body: &str) -> Result<&str, CalilError> {
    let trimmed = body.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    let open = trimmed.find('(').ok_or_else(|| CalilError::Jsonp {
        message: "no opening parenthesis".into(),
    })?;

    let callback = trimmed[..open].trim_end();
    if callback.is_empty() || !callback.chars().all(is_callback_char) {
        return Err(CalilError::Jsonp {
            message: format!("unexpected callback name {:?}", excerpt(callback)),
        });
    }

    let rest = trimmed[open + 1..].trim_end();
    let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
    let inner = rest.strip_suffix(')').ok_or_else(|| CalilError::Jsonp {
        message: "no closing parenthesis".into(),
    })?;

    Ok(inner.trim())
}

fn is_callback_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.')
}

/// Decode a raw response body into library records.
///
/// # Examples
///
/// ```
/// use studyspot::libraries::remote::normalize_response;
///
/// let flat = r#"[{"libid":"1","formal":"A","geocode":"139.0,35.0"}]"#;
/// let jsonp = r#"callback({"libraries":[{"libid":"1","formal":"A","geocode":"139.0,35.0"}]});"#;
/// assert_eq!(normalize_response(flat).unwrap(), normalize_response(jsonp).unwrap());
/// ```
pub fn normalize_response(body: &str) -> Result<Vec<RemoteLibraryRecord>, CalilError> {
    let json = strip_jsonp(body)?;
    if json.is_empty() {
        return Ok(Vec::new());
    }

    let response: LibraryResponse = serde_json::from_str(json).map_err(|e| CalilError::Json {
        message: e.to_string(),
        body: Some(excerpt(json).to_string()),
    })?;

    Ok(response.into_records())
}

fn excerpt(s: &str) -> &str {
    match s.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str =
        r#"{"systemid":"Tokyo_Minato","libid":"1","formal":"みなと図書館","geocode":"139.74,35.65"}"#;

    fn ids(records: &[RemoteLibraryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.libid.as_str()).collect()
    }

    #[test]
    fn plain_json_passes_through() {
        assert_eq!(strip_jsonp(" [1] ").unwrap(), "[1]");
        assert_eq!(strip_jsonp("{}").unwrap(), "{}");
    }

    #[test]
    fn strips_callback_wrappers() {
        assert_eq!(strip_jsonp("callback([1]);").unwrap(), "[1]");
        assert_eq!(strip_jsonp("callback([1])").unwrap(), "[1]");
        assert_eq!(strip_jsonp("jQuery.cb_12$ ( {\"a\":1} ) ;\n").unwrap(), "{\"a\":1}");
    }

    #[test]
    fn rejects_malformed_wrappers() {
        assert!(matches!(strip_jsonp("callback([1]"), Err(CalilError::Jsonp { .. })));
        assert!(matches!(strip_jsonp("<html>"), Err(CalilError::Jsonp { .. })));
        assert!(matches!(strip_jsonp("bad name([1])"), Err(CalilError::Jsonp { .. })));
        assert!(matches!(strip_jsonp("([1])"), Err(CalilError::Jsonp { .. })));
    }

    #[test]
    fn all_shapes_normalize_to_the_same_records() {
        let flat = format!("[{RECORD}]");
        let wrapped = format!(r#"{{"libraries":[{RECORD}]}}"#);
        let single = format!(r#"{{"libraries":{RECORD}}}"#);
        let aliased = format!(r#"{{"Library":[{RECORD}]}}"#);
        let jsonp = format!("callback({wrapped});");

        let expected = normalize_response(&flat).unwrap();
        assert_eq!(ids(&expected), vec!["1"]);
        for body in [wrapped, single, aliased, jsonp] {
            assert_eq!(normalize_response(&body).unwrap(), expected, "body: {body}");
        }
    }

    #[test]
    fn null_fields_keep_every_record() {
        let body = r#"[
            {"libid":"good","formal":"A","geocode":"139.0,35.0"},
            {"libid":"bad","formal":"B","geocode":null,"address":null}
        ]"#;

        let records = normalize_response(body).unwrap();
        assert_eq!(ids(&records), vec!["good", "bad"]);
        assert!(records[0].location().is_some());
        assert!(records[1].location().is_none());
    }

    #[test]
    fn empty_shapes_are_empty() {
        assert!(normalize_response("[]").unwrap().is_empty());
        assert!(normalize_response(r#"{"libraries":[]}"#).unwrap().is_empty());
        assert!(normalize_response("callback();").unwrap().is_empty());
    }

    #[test]
    fn unknown_shape_is_a_json_error() {
        let err = normalize_response(r#"{"error":"invalid key"}"#).unwrap_err();
        match err {
            CalilError::Json { body, .. } => {
                assert_eq!(body.as_deref(), Some(r#"{"error":"invalid key"}"#))
            }
            other => panic!("expected Json error, got {other:?}"),
        }
        assert!(normalize_response("[not json").is_err());
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let long = "図".repeat(BODY_EXCERPT_LEN + 10);
        assert_eq!(excerpt(&long).chars().count(), BODY_EXCERPT_LEN);
        assert_eq!(excerpt("short"), "short");
    }
}
