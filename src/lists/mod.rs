pub mod add;
pub mod remove;
pub mod store;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One value stored under a mapping key. The first write to a key decides
/// whether it behaves as a single value or as a tag with many items, and the
/// shape never silently converts afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Scalar(String),
    Many(Vec<String>),
}

pub type TagMap = BTreeMap<String, Entry>;

/// The persisted value behind one (scope, list name) pair. Serialized as a
/// plain JSON array or object so hand-written seed files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListDocument {
    Array(Vec<String>),
    Mapping(TagMap),
}

impl ListDocument {
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            ListDocument::Array(items) => Some(items),
            ListDocument::Mapping(_) => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut TagMap> {
        match self {
            ListDocument::Array(_) => None,
            ListDocument::Mapping(entries) => Some(entries),
        }
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        match self {
            ListDocument::Array(_) => None,
            ListDocument::Mapping(entries) => entries.get(key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    Array,
    Mapping,
}

impl ListShape {
    /// The empty document for a list with no seed file. An array-shaped list
    /// always defaults to `[]` and a mapping-shaped list to `{}`.
    pub fn empty(self) -> ListDocument {
        match self {
            ListShape::Array => ListDocument::Array(Vec::new()),
            ListShape::Mapping => ListDocument::Mapping(TagMap::new()),
        }
    }
}

/// Per-command behaviour switches for the generic add/remove logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBehavior {
    /// Whether the options argument is required (mapping-shaped lists).
    pub require_options: bool,
    /// Whether options is a whitespace-separated set of tag names.
    pub multiple_options: bool,
    /// Whether the item argument must be a URL; also disables key lowercasing.
    pub url_only: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("`{item}` is already in \"{list}\"")]
    Duplicate { item: String, list: String },
    #[error("`{value}` is already in `{key}`")]
    ValueDuplicate { value: String, key: String },
    #[error("`{key}` already exists. Please use another value.")]
    KeyExists { key: String },
    #[error("`{item}` is already in `{tags}`")]
    AllTagsDuplicate { item: String, tags: String },
    #[error("`{item}` must be a valid URL beginning with \"http\". Make sure your arguments are in the right order.")]
    NotUrl { item: String },
    #[error("Item must not be a URL. Did you perhaps mix up your arguments? See `/help detailed` for examples.")]
    UnexpectedUrl,
    #[error("`{item}` is not in \"{list}\"")]
    Missing { item: String, list: String },
    #[error("`{value}` is not in `{key}`")]
    ValueMissing { value: String, key: String },
    #[error("`{key}` is not in \"{list}\"")]
    UnknownKey { key: String, list: String },
    #[error("`{item}` is not in `{tags}`")]
    AllTagsMissing { item: String, tags: String },
    #[error("The \"{list}\" list has an unexpected shape")]
    WrongShape { list: String },
}

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^ /.]+\.[^ /.]+").expect("hard-coded pattern is valid"));

/// Loose URL detection: an http(s) scheme followed by a host with a dot.
pub fn is_url(item: &str) -> bool {
    URL_PATTERN.is_match(item)
}
