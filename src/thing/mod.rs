//! Thing normalization module
//!
//! The API wraps every object in a `{kind, data}` envelope ("thing").
//! Pages of results come as `Listing` envelopes whose `data.children` holds
//! more things. This module turns those envelopes into typed values:
//!
//! | raw `kind` | normalized to |
//! |------------|---------------|
//! | `Listing`  | [`ItemSequence`] (children + `before`/`after` metadata) |
//! | `t3`       | [`NormalizedItem`] of kind `link` |
//! | `t1`       | [`NormalizedItem`] of kind `comment` |
//! | `t5`       | [`NormalizedItem`] of kind `subreddit` |
//! | other      | unchanged |
//!
//! Envelope fields that are not payload end up in [`Metadata`], which is
//! kept beside the payload and never mixed into it.

mod normalize;
mod types;

pub use normalize::normalize;
pub use types::{
    ItemSequence, Metadata, Normalized, NormalizedItem, NormalizedMap, SemanticKind, ThingKind,
};
