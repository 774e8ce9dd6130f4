//! Thing types
//!
//! Envelope kinds and the normalized tree that replaces them.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Field map of a normalized object
pub type NormalizedMap = BTreeMap<String, Normalized>;

// ============================================================================
// Kinds
// ============================================================================

/// Envelope tag as found in the raw `kind` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThingKind {
    /// `"Listing"`
    Listing,
    /// `"t3"`
    Link,
    /// `"t1"`
    Comment,
    /// `"t5"`
    Subreddit,
    /// Any other tag; the object passes through untouched
    Unrecognized(String),
    /// No `kind` field at all
    Absent,
}

impl ThingKind {
    /// Classify a raw tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Listing" => Self::Listing,
            "t3" => Self::Link,
            "t1" => Self::Comment,
            "t5" => Self::Subreddit,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Classify the `kind` field of an object, if any
    pub fn from_field(field: Option<&Normalized>) -> Self {
        match field {
            None => Self::Absent,
            Some(Normalized::Scalar(JsonValue::String(tag))) => Self::from_tag(tag),
            Some(other) => Self::Unrecognized(other.to_value().to_string()),
        }
    }

    /// Semantic kind this envelope normalizes to, `None` for passthrough
    pub fn semantic(&self) -> Option<SemanticKind> {
        match self {
            Self::Listing => Some(SemanticKind::Listing),
            Self::Link => Some(SemanticKind::Link),
            Self::Comment => Some(SemanticKind::Comment),
            Self::Subreddit => Some(SemanticKind::Subreddit),
            Self::Unrecognized(_) | Self::Absent => None,
        }
    }
}

/// Kind carried by a normalized value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticKind {
    Listing,
    Link,
    Comment,
    Subreddit,
}

impl SemanticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Link => "link",
            Self::Comment => "comment",
            Self::Subreddit => "subreddit",
        }
    }
}

impl fmt::Display for SemanticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Out-of-band envelope data attached to a normalized item or listing.
///
/// Never part of the payload: it does not take part in equality and is not
/// rendered by [`Normalized::to_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Semantic kind of the value this metadata belongs to
    pub kind: SemanticKind,
    /// Envelope fields other than `kind`/`data` (and for listings, the
    /// fields of `data` other than `children`)
    pub fields: NormalizedMap,
}

impl Metadata {
    pub fn new(kind: SemanticKind) -> Self {
        Self {
            kind,
            fields: NormalizedMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Normalized> {
        self.fields.get(key)
    }

    /// Cursor of the previous page, `None` when null or absent
    pub fn before(&self) -> Option<&str> {
        self.get("before").and_then(Normalized::as_str)
    }

    /// Cursor of the next page, `None` when null or absent
    pub fn after(&self) -> Option<&str> {
        self.get("after").and_then(Normalized::as_str)
    }
}

// ============================================================================
// Normalized Item
// ============================================================================

/// A link, comment or subreddit with its envelope removed
#[derive(Debug, Clone)]
pub struct NormalizedItem {
    kind: SemanticKind,
    fields: NormalizedMap,
    metadata: Metadata,
}

impl NormalizedItem {
    /// Build from an envelope's sibling fields and its `data` payload
    pub(crate) fn from_envelope(
        kind: SemanticKind,
        siblings: NormalizedMap,
        mut data: NormalizedMap,
    ) -> Self {
        data.remove("kind");
        Self {
            kind,
            fields: data,
            metadata: Metadata {
                kind,
                fields: siblings,
            },
        }
    }

    pub fn kind(&self) -> SemanticKind {
        self.kind
    }

    /// Payload fields, without `kind`
    pub fn fields(&self) -> &NormalizedMap {
        &self.fields
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn get(&self, key: &str) -> Option<&Normalized> {
        self.fields.get(key)
    }

    /// Short id, e.g. `abc123`
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(Normalized::as_str)
    }

    /// Fullname, e.g. `t3_abc123`
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Normalized::as_str)
    }

    /// Payload merged with `{"kind": "<semantic kind>"}`
    pub fn to_value(&self) -> JsonValue {
        let mut object: JsonObject = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_value()))
            .collect();
        object.insert("kind".to_string(), JsonValue::from(self.kind.as_str()));
        JsonValue::Object(object)
    }
}

impl PartialEq for NormalizedItem {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.fields == other.fields
    }
}

// ============================================================================
// Item Sequence
// ============================================================================

/// One page of a listing: ordered children plus cursor metadata
#[derive(Debug, Clone)]
pub struct ItemSequence {
    items: Vec<Normalized>,
    metadata: Metadata,
}

impl ItemSequence {
    /// Build from a Listing envelope's sibling fields and its `data` object.
    ///
    /// `data` fields win over envelope fields of the same name.
    pub(crate) fn from_envelope(siblings: NormalizedMap, mut data: NormalizedMap) -> Self {
        let items = match data.remove("children") {
            Some(Normalized::Array(children)) => children,
            _ => Vec::new(),
        };

        let mut fields = siblings;
        fields.extend(data);

        Self {
            items,
            metadata: Metadata {
                kind: SemanticKind::Listing,
                fields,
            },
        }
    }

    pub fn items(&self) -> &[Normalized] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Normalized> {
        self.items
    }

    /// Split into items and metadata
    pub fn into_parts(self) -> (Vec<Normalized>, Metadata) {
        (self.items, self.metadata)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Normalized> {
        self.items.iter()
    }

    pub fn before(&self) -> Option<&str> {
        self.metadata.before()
    }

    pub fn after(&self) -> Option<&str> {
        self.metadata.after()
    }
}

impl PartialEq for ItemSequence {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl IntoIterator for ItemSequence {
    type Item = Normalized;
    type IntoIter = std::vec::IntoIter<Normalized>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItemSequence {
    type Item = &'a Normalized;
    type IntoIter = std::slice::Iter<'a, Normalized>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Normalized Tree
// ============================================================================

/// A JSON tree with recognized envelopes replaced by typed values
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// null, bool, number or string
    Scalar(JsonValue),
    Array(Vec<Normalized>),
    /// Object that was not a recognized envelope
    Object(NormalizedMap),
    Item(NormalizedItem),
    Listing(ItemSequence),
}

impl Normalized {
    /// Semantic kind, `None` for plain JSON
    pub fn kind(&self) -> Option<SemanticKind> {
        match self {
            Self::Item(item) => Some(item.kind()),
            Self::Listing(_) => Some(SemanticKind::Listing),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&NormalizedItem> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_listing(&self) -> Option<&ItemSequence> {
        match self {
            Self::Listing(listing) => Some(listing),
            _ => None,
        }
    }

    /// Take the listing out, or fail with `NotAListing` naming `path`
    pub fn into_listing(self, path: &str) -> Result<ItemSequence> {
        match self {
            Self::Listing(listing) => Ok(listing),
            other => Err(Error::not_a_listing(path, other.describe())),
        }
    }

    /// Field lookup on items and plain objects
    pub fn get(&self, key: &str) -> Option<&Normalized> {
        match self {
            Self::Item(item) => item.get(key),
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => value.as_str(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => value.as_f64(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(JsonValue::Null))
    }

    /// Human-readable shape, used in error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Item(item) => format!("a {}", item.kind()),
            Self::Listing(_) => "a listing".to_string(),
            Self::Array(_) => "an array".to_string(),
            Self::Object(map) => match ThingKind::from_field(map.get("kind")) {
                ThingKind::Absent => "an object without a kind".to_string(),
                ThingKind::Unrecognized(tag) => format!("an object of kind {tag}"),
                known => format!("a malformed {known:?} envelope"),
            },
            Self::Scalar(JsonValue::Null) => "null".to_string(),
            Self::Scalar(value) => format!("the scalar {value}"),
        }
    }

    /// Render back to plain JSON; metadata is dropped
    pub fn to_value(&self) -> JsonValue {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Array(values) => JsonValue::Array(values.iter().map(Self::to_value).collect()),
            Self::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            Self::Item(item) => item.to_value(),
            Self::Listing(listing) => {
                JsonValue::Array(listing.iter().map(Self::to_value).collect())
            }
        }
    }
}

impl Serialize for Normalized {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<Normalized> for JsonValue {
    fn from(value: Normalized) -> Self {
        value.to_value()
    }
}
