//! Envelope normalization
//!
//! Rewrites a decoded JSON tree bottom-up. Children are normalized before
//! their parent is inspected, so an envelope nested inside another (replies
//! under a comment, comments under a link) is already typed by the time the
//! outer envelope is unwrapped.

use super::types::{
    ItemSequence, Normalized, NormalizedItem, NormalizedMap, SemanticKind, ThingKind,
};
use crate::types::JsonValue;

/// Normalize a decoded JSON value.
///
/// Never fails: values that are not recognized envelopes pass through with
/// only their contents normalized.
pub fn normalize(value: JsonValue) -> Normalized {
    match value {
        JsonValue::Array(values) => Normalized::Array(values.into_iter().map(normalize).collect()),
        JsonValue::Object(map) => {
            let fields: NormalizedMap = map.into_iter().map(|(k, v)| (k, normalize(v))).collect();
            unwrap_envelope(fields)
        }
        scalar => Normalized::Scalar(scalar),
    }
}

/// Replace a recognized envelope by its typed value
fn unwrap_envelope(mut fields: NormalizedMap) -> Normalized {
    let Some(kind) = ThingKind::from_field(fields.get("kind")).semantic() else {
        return Normalized::Object(fields);
    };

    let data = match fields.remove("data") {
        Some(Normalized::Object(data)) => data,
        // No usable payload: leave the envelope as it was
        other => {
            if let Some(data) = other {
                fields.insert("data".to_string(), data);
            }
            return Normalized::Object(fields);
        }
    };

    fields.remove("kind");

    match kind {
        SemanticKind::Listing => Normalized::Listing(ItemSequence::from_envelope(fields, data)),
        _ => Normalized::Item(NormalizedItem::from_envelope(kind, fields, data)),
    }
}
