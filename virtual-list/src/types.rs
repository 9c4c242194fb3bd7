/// Where a target item should land inside the viewport after a programmatic scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Only scroll when the item is not fully visible, by the smallest amount needed.
    #[default]
    Auto,
    Start,
    Center,
    End,
}

/// The scroll axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// Offset and size of one item along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    /// Distance from the start of the list to the item's leading edge.
    pub offset: u64,
    pub size: u32,
}

impl ItemPosition {
    /// Trailing edge of the item.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// An inclusive range of item indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    /// First index in the range.
    pub start: usize,
    /// Last index in the range (inclusive).
    pub stop: usize,
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.stop.saturating_sub(self.start).saturating_add(1)
    }

    /// Always `false`: an inclusive range holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.stop
    }

    pub fn iter(&self) -> core::ops::RangeInclusive<usize> {
        self.start..=self.stop
    }
}

/// Input of [`crate::SizeAndPositionManager::visible_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleRangeQuery {
    /// Viewport extent along the scroll axis.
    pub container_size: u32,
    /// Current scroll offset (window start).
    pub offset: u64,
    /// Extra items to include on each side of the window.
    pub overscan_count: usize,
}

/// Input of [`crate::SizeAndPositionManager::updated_offset_for_index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OffsetForIndexQuery {
    pub align: Align,
    pub container_size: u32,
    pub current_offset: u64,
    pub target_index: usize,
}
