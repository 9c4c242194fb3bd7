//! Viewport controller for the `virtual-list` crate.
//!
//! `virtual-list` owns the positional math. This crate bridges it to a scroll container:
//!
//! - tracks the scroll offset and whether it was requested by the program or observed from
//!   the viewport, so requested offsets are pushed to the viewport and observed ones are not
//! - renders the overscanned visible range plus sticky items, with memoized placements
//! - eases programmatic scroll jumps with an adapter-driven compensation tween
//!
//! The crate is framework-agnostic: the UI layer implements [`Viewport`] and materializes the
//! emitted [`RenderedItem`]s.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod options;
mod placement;
mod tween;
mod viewport;


pub use controller::{Controller, RenderedItem, ScrollChangeReason};
pub use options::{ListOptions, OnItemsRenderedCallback, OnScrollCallback, RenderedRange};
pub use placement::{ItemPlacement, Positioning};
pub use tween::{Easing, Transition, Tween};
pub use viewport::{ScrollEvent, Viewport, ViewportId};

pub use virtual_list::{Align, Error, ItemSize, ScrollDirection};
