//! # Page Extraction and Link Following
//!
//! Pure helpers that turn one decoded response body into its items and the
//! URL of the following page. Kept free of I/O so the rules are testable
//! without a server.
//!
//! ## Item extraction
//!
//! The listing is taken from the first *non-empty* of `results`, then
//! `agencies`, then the whole body. A JSON array is flattened; any other
//! value becomes a single item. "Empty" means `null`, `false`, `0`, `""`,
//! `[]` or `{}`, so a page carrying `"results": []` falls through to
//! `agencies` and finally to the body itself.
//!
//! ## Next link
//!
//! A non-empty `next` string is followed: as-is when it starts with `http`,
//! otherwise appended verbatim to the base URL. A non-empty `next` that is
//! not a string is reported as malformed and ends pagination once the
//! current page's items are kept.

use serde_json::{Map, Value};

/// Fields consulted, in order, for a page's item listing.
const ITEM_FIELDS: [&str; 2] = ["results", "agencies"];

/// Where pagination goes after the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum NextLink {
    /// No `next` link; this was the last page.
    End,
    /// Absolute URL of the following page.
    Follow(String),
    /// A `next` field that could not be interpreted as a link.
    Malformed(Value),
}

/// One decoded page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub next: NextLink,
}

impl Page {
    /// Split a decoded body into items and the next link.
    ///
    /// `base_prefix` is the API host without a trailing slash. Returns the
    /// body back as `Err` when it is not a JSON object.
    pub fn from_payload(payload: Value, base_prefix: &str) -> Result<Self, Value> {
        let mut body = match payload {
            Value::Object(body) => body,
            other => return Err(other),
        };
        let next = NextLink::resolve(body.get("next"), base_prefix);
        let items = match take_listing(&mut body) {
            Value::Array(items) => items,
            single => vec![single],
        };
        Ok(Self { items, next })
    }
}

impl NextLink {
    /// Interpret a `next` field against the API host.
    pub fn resolve(next: Option<&Value>, base_prefix: &str) -> Self {
        match next {
            Some(value) if is_truthy(value) => match value.as_str() {
                Some(link) if link.starts_with("http") => Self::Follow(link.to_string()),
                Some(link) => Self::Follow(format!("{base_prefix}{link}")),
                None => Self::Malformed(value.clone()),
            },
            _ => Self::End,
        }
    }
}

fn take_listing(body: &mut Map<String, Value>) -> Value {
    for field in ITEM_FIELDS {
        if body.get(field).is_some_and(is_truthy) {
            if let Some(listing) = body.remove(field) {
                return listing;
            }
        }
    }
    Value::Object(std::mem::take(body))
}

/// Whether a JSON value counts as present and non-empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}
