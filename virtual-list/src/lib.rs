//! Lazy size-and-position bookkeeping for virtualized lists.
//!
//! A virtualized list renders only the items inside the viewport. The hard part is not the
//! rendering but answering, for items whose sizes are unknown or only estimated:
//! - which items are visible at scroll offset X
//! - which scroll offset puts item N at a given alignment
//!
//! [`SizeAndPositionManager`] answers both from an incremental cache of item offsets that is
//! filled front to back on demand and truncated when sizes change.
//!
//! The crate is UI-agnostic. For a controller that drives a viewport, see the
//! `virtual-list-controller` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod manager;
mod size;
mod types;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use manager::{ConfigUpdate, ManagerConfig, SizeAndPositionManager};
pub use size::{DEFAULT_ESTIMATED_ITEM_SIZE, ItemSize, SizeGetter};
pub use types::{
    Align, ItemPosition, OffsetForIndexQuery, ScrollDirection, VisibleRange, VisibleRangeQuery,
};
