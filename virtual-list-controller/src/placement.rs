#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use virtual_list::{ItemPosition, ScrollDirection};

#[cfg(feature = "std")]
type PlacementMap = HashMap<(usize, bool), ItemPlacement>;
#[cfg(not(feature = "std"))]
type PlacementMap = BTreeMap<(usize, bool), ItemPlacement>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Positioning {
    /// Placed at `start` inside the scroll track.
    Absolute,
    /// Kept in flow and pinned by the UI layer; `start` is its leading margin.
    Sticky,
}

/// Where an item goes inside the scroll track, in scroll-axis pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPlacement {
    pub direction: ScrollDirection,
    pub positioning: Positioning,
    pub size: u32,
    pub start: u64,
    /// Trailing margin for sticky items (`-(offset + size)`) so they take no space in flow.
    /// Zero for absolute items.
    pub margin_end: i64,
    pub z_index: u32,
}

impl ItemPlacement {
    pub fn absolute(direction: ScrollDirection, pos: ItemPosition) -> Self {
        Self {
            direction,
            positioning: Positioning::Absolute,
            size: pos.size,
            start: pos.offset,
            margin_end: 0,
            z_index: 0,
        }
    }

    pub fn sticky(direction: ScrollDirection, pos: ItemPosition) -> Self {
        let end = i64::try_from(pos.end()).unwrap_or(i64::MAX);
        Self {
            direction,
            positioning: Positioning::Sticky,
            size: pos.size,
            start: pos.offset,
            margin_end: -end,
            z_index: 1,
        }
    }

    pub fn is_sticky(&self) -> bool {
        self.positioning == Positioning::Sticky
    }
}

/// Memoized placements keyed by index (and stickiness). Cleared wholesale when sizes change.
#[derive(Clone, Debug, Default)]
pub(crate) struct PlacementCache {
    map: PlacementMap,
}

impl PlacementCache {
    pub(crate) fn get(&self, index: usize, sticky: bool) -> Option<ItemPlacement> {
        self.map.get(&(index, sticky)).copied()
    }

    pub(crate) fn insert(&mut self, index: usize, sticky: bool, placement: ItemPlacement) {
        self.map.insert((index, sticky), placement);
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
