//! Wire types for the subset of the Notion API the catalog reads.
//!
//! Decoding is lenient at every level below the response envelope: a property
//! whose payload does not match its declared `type` becomes
//! [`PropertyValue::Unsupported`], odd page fields fall back to defaults, and a
//! result entry that is not a page at all is skipped.

use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One row of the products database
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_edited_time: String,
    #[serde(default)]
    pub properties: Properties,
}

/// A single run of rich text
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: Option<String>,
}

/// Location of an uploaded or linked file
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FileLocation {
    #[serde(default)]
    pub url: Value,
}

/// Entry of a `files` property: either a Notion-hosted file or an external link
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FileRef {
    #[serde(default)]
    pub file: Option<FileLocation>,
    #[serde(default)]
    pub external: Option<FileLocation>,
}

impl FileRef {
    /// URL of the attachment, if it carries a string one
    pub fn url(&self) -> Option<&str> {
        let hosted = self
            .file
            .as_ref()
            .and_then(|f| f.url.as_str())
            .filter(|u| !u.is_empty());
        hosted.or_else(|| self.external.as_ref().and_then(|f| f.url.as_str()))
    }
}

/// Value of a database property, one variant per encoding kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Files {
        #[serde(default)]
        files: Vec<FileRef>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Decode a raw property, degrading to `Unsupported` on any mismatch
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value(value) {
            Ok(prop) => prop,
            Err(e) => {
                debug!("Treating undecodable property as unsupported: {}", e);
                PropertyValue::Unsupported
            }
        }
    }

    /// Rich-text runs, present only on rich_text properties
    pub fn rich_runs(&self) -> &[RichText] {
        match self {
            PropertyValue::RichText { rich_text } => rich_text,
            _ => &[],
        }
    }
}

/// Properties of a page, ordered by property name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Properties(Vec<(String, PropertyValue)>);

impl Properties {
    pub fn new(entries: Vec<(String, PropertyValue)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a property by label, ignoring case and surrounding whitespace
    pub fn find(&self, label: &str) -> Option<&PropertyValue> {
        self.find_normalized(&normalize_label(label))
    }

    /// Look up a property by an already normalized label
    pub fn find_normalized(&self, normalized: &str) -> Option<&PropertyValue> {
        self.0
            .iter()
            .find(|(key, _)| normalize_label(key) == normalized)
            .map(|(_, value)| value)
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                debug!("Ignoring non-object properties: {}", other);
                Map::new()
            }
        };
        let mut entries: Vec<(String, PropertyValue)> = raw
            .into_iter()
            .map(|(key, value)| (key, PropertyValue::from_value(value)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Properties(entries))
    }
}

/// Strings stay as they are; null or any other JSON type becomes empty
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Decode each result on its own, dropping entries that are not pages
fn lenient_pages<'de, D>(deserializer: D) -> Result<Vec<Page>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(page) => Some(page),
            Err(e) => {
                warn!("Skipping undecodable result entry: {}", e);
                None
            }
        })
        .collect())
}

/// Canonical form used for label matching
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Response of `POST /v1/databases/{id}/query`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default, deserialize_with = "lenient_pages")]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Error body returned by the Notion API
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
