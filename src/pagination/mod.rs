//! Pagination module
//!
//! Follows `after` cursors across Listing pages.
//!
//! # Overview
//!
//! [`ListingPager::paginate`] returns a [`ListingStream`]: a lazy
//! `futures::Stream` that requests the first page on first poll, serves its
//! items, and requests the next page only once the current one is drained.
//! A page whose `after` cursor is null ends the stream.

mod pager;

pub use pager::{ListingPager, ListingStream};
