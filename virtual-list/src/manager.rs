use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp;

use crate::{
    Align, Error, ItemPosition, OffsetForIndexQuery, SizeGetter, VisibleRange, VisibleRangeQuery,
};

/// Initial configuration of a [`SizeAndPositionManager`].
#[derive(Clone)]
pub struct ManagerConfig {
    pub item_count: usize,
    pub item_size_getter: SizeGetter,
    /// Size assumed for items that have not been measured yet. Must be positive.
    pub estimated_item_size: u32,
}

impl ManagerConfig {
    pub fn new(
        item_count: usize,
        item_size_getter: impl Fn(usize) -> u32 + Send + Sync + 'static,
        estimated_item_size: u32,
    ) -> Self {
        Self {
            item_count,
            item_size_getter: Arc::new(item_size_getter),
            estimated_item_size,
        }
    }
}

impl core::fmt::Debug for ManagerConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManagerConfig")
            .field("item_count", &self.item_count)
            .field("estimated_item_size", &self.estimated_item_size)
            .finish_non_exhaustive()
    }
}

/// A partial configuration change for [`SizeAndPositionManager::update_config`].
///
/// `None` fields keep their current value.
#[derive(Clone, Default)]
pub struct ConfigUpdate {
    pub item_count: Option<usize>,
    pub item_size_getter: Option<SizeGetter>,
    pub estimated_item_size: Option<u32>,
}

impl ConfigUpdate {
    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = Some(item_count);
        self
    }

    pub fn with_item_size_getter(
        mut self,
        item_size_getter: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.item_size_getter = Some(Arc::new(item_size_getter));
        self
    }

    pub fn with_estimated_item_size(mut self, estimated_item_size: u32) -> Self {
        self.estimated_item_size = Some(estimated_item_size);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.item_count.is_none()
            && self.item_size_getter.is_none()
            && self.estimated_item_size.is_none()
    }
}

impl core::fmt::Debug for ConfigUpdate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConfigUpdate")
            .field("item_count", &self.item_count)
            .field("item_size_getter", &self.item_size_getter.is_some())
            .field("estimated_item_size", &self.estimated_item_size)
            .finish()
    }
}

/// Lazily computed offsets and sizes for every item of a list along one scroll axis.
///
/// Items are measured front to back, on demand. `cache[i]` is valid for every
/// `i <= last_measured_index`, and each index is measured at most once between resets, so the
/// total measurement work over the lifetime of the manager stays linear in the item count.
/// Items past the measured prefix contribute `estimated_item_size` to [`Self::total_size`].
///
/// Queries that may extend the measured prefix take `&mut self`.
#[derive(Clone)]
pub struct SizeAndPositionManager {
    item_count: usize,
    item_size_getter: SizeGetter,
    estimated_item_size: u32,
    // cache.len() == last_measured_index + 1
    cache: Vec<ItemPosition>,
}

impl SizeAndPositionManager {
    pub fn new(config: ManagerConfig) -> Result<Self, Error> {
        if config.estimated_item_size == 0 {
            return Err(Error::InvalidEstimatedItemSize);
        }
        vdebug!(
            item_count = config.item_count,
            estimated_item_size = config.estimated_item_size,
            "SizeAndPositionManager::new"
        );
        Ok(Self {
            item_count: config.item_count,
            item_size_getter: config.item_size_getter,
            estimated_item_size: config.estimated_item_size,
            cache: Vec::new(),
        })
    }

    /// Replaces any subset of the configuration.
    ///
    /// Cached sizes are kept: call [`Self::reset_item`] when sizes of already measured items may
    /// differ under the new configuration. Shrinking `item_count` drops cached records past the
    /// new end.
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<(), Error> {
        if update.estimated_item_size == Some(0) {
            return Err(Error::InvalidEstimatedItemSize);
        }
        if update.is_empty() {
            return Ok(());
        }
        if let Some(item_count) = update.item_count {
            self.item_count = item_count;
            self.cache.truncate(item_count);
        }
        if let Some(item_size_getter) = update.item_size_getter {
            self.item_size_getter = item_size_getter;
        }
        if let Some(estimated_item_size) = update.estimated_item_size {
            self.estimated_item_size = estimated_item_size;
        }
        vdebug!(
            item_count = self.item_count,
            estimated_item_size = self.estimated_item_size,
            measured = self.cache.len(),
            "update_config"
        );
        Ok(())
    }

    /// Invalidates the cached records of `index` and everything after it.
    ///
    /// No-op when `index` is past the measured prefix.
    pub fn reset_item(&mut self, index: usize) {
        if index < self.cache.len() {
            vtrace!(index, measured = self.cache.len(), "reset_item");
            self.cache.truncate(index);
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn estimated_item_size(&self) -> u32 {
        self.estimated_item_size
    }

    /// Highest index with a cached record, or `None` when nothing is measured.
    pub fn last_measured_index(&self) -> Option<usize> {
        self.cache.len().checked_sub(1)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        index < self.cache.len()
    }

    /// Returns the offset and size of `index`, measuring every item up to it if needed.
    pub fn size_and_position_for_index(&mut self, index: usize) -> Result<ItemPosition, Error> {
        if index >= self.item_count {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.item_count,
            });
        }
        Ok(self.position(index))
    }

    /// Record of the last measured item; a zero record when nothing is measured.
    pub fn size_and_position_of_last_measured_item(&self) -> ItemPosition {
        self.cache.last().copied().unwrap_or_default()
    }

    /// Total extent of the list: exact over the measured prefix, estimated for the rest.
    pub fn total_size(&self) -> u64 {
        let last = self.size_and_position_of_last_measured_item();
        let unmeasured = self.item_count.saturating_sub(self.cache.len()) as u64;
        last.end()
            .saturating_add(unmeasured.saturating_mul(self.estimated_item_size as u64))
    }

    /// Computes the inclusive range of items covering `[offset, offset + container_size]`,
    /// padded by `overscan_count` items on each side.
    ///
    /// Returns `None` for an empty list, an empty viewport, or a list whose total size is zero.
    pub fn visible_range(&mut self, query: VisibleRangeQuery) -> Option<VisibleRange> {
        if query.container_size == 0 || self.item_count == 0 || self.total_size() == 0 {
            return None;
        }

        let last_index = self.item_count - 1;
        let window_end = query.offset.saturating_add(query.container_size as u64);

        let mut start = self.find_nearest_item(query.offset)?;
        let mut covered = self.position(start).end();
        let mut stop = start;
        while covered < window_end && stop < last_index {
            stop += 1;
            covered = covered.saturating_add(self.position(stop).size as u64);
        }

        if query.overscan_count > 0 {
            start = start.saturating_sub(query.overscan_count);
            stop = cmp::min(stop.saturating_add(query.overscan_count), last_index);
        }

        vtrace!(
            offset = query.offset,
            container_size = query.container_size,
            start,
            stop,
            "visible_range"
        );
        Some(VisibleRange { start, stop })
    }

    /// Returns the index of the item containing `offset`: the last item whose leading edge is at
    /// or before `offset`. Offsets past the end resolve to the last item.
    ///
    /// Searches the measured prefix when possible, and otherwise probes forward from the last
    /// measured item with exponentially growing steps (measuring along the way).
    pub fn find_nearest_item(&mut self, offset: u64) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }

        let last = self.size_and_position_of_last_measured_item();
        let last_index = self.cache.len().saturating_sub(1);

        // Zero-size items share a leading edge, so an exact hit on the last measured offset may
        // still have later matches in the unmeasured tail.
        if last.offset > offset {
            Some(self.binary_search(0, last_index, offset))
        } else {
            Some(self.exponential_search(last_index, offset))
        }
    }

    /// Computes the scroll offset that shows `target_index` with the requested alignment.
    ///
    /// The result is clamped to `[0, total_size - container_size]`. An empty viewport yields 0.
    pub fn updated_offset_for_index(&mut self, query: OffsetForIndexQuery) -> Result<u64, Error> {
        let target = self.size_and_position_for_index(query.target_index)?;
        if query.container_size == 0 {
            return Ok(0);
        }

        let view = query.container_size as u64;
        let start_aligned = target.offset;
        let end_aligned = target.end().saturating_sub(view);

        let ideal = match query.align {
            Align::Start => start_aligned,
            Align::End => end_aligned,
            Align::Center => target
                .offset
                .saturating_add(target.size as u64 / 2)
                .saturating_sub(view / 2),
            // Keep the current offset when the item fits; items larger than the viewport end-align.
            Align::Auto => cmp::max(end_aligned, cmp::min(start_aligned, query.current_offset)),
        };

        let max_offset = self.total_size().saturating_sub(view);
        Ok(cmp::min(ideal, max_offset))
    }

    /// Cached record for a valid index, measuring forward when needed.
    fn position(&mut self, index: usize) -> ItemPosition {
        debug_assert!(
            index < self.item_count,
            "position(): index {index} out of range 0..{}",
            self.item_count
        );
        match self.cache.get(index) {
            Some(&pos) => pos,
            None => self.measure_through(index),
        }
    }

    fn measure_through(&mut self, index: usize) -> ItemPosition {
        let from = self.cache.len();
        let mut offset = self.size_and_position_of_last_measured_item().end();
        let mut pos = ItemPosition::default();

        self.cache.reserve(index + 1 - from);
        for i in from..=index {
            let size = (self.item_size_getter)(i);
            pos = ItemPosition { offset, size };
            self.cache.push(pos);
            offset = pos.end();
        }

        vtrace!(from, to = index, "measure_through");
        pos
    }

    fn binary_search(&mut self, mut low: usize, mut high: usize, offset: u64) -> usize {
        while low <= high {
            let middle = low + (high - low) / 2;
            let current = self.position(middle).offset;
            if current <= offset {
                low = middle + 1;
            } else if middle == 0 {
                break;
            } else {
                high = middle - 1;
            }
        }
        low.saturating_sub(1)
    }

    fn exponential_search(&mut self, mut index: usize, offset: u64) -> usize {
        let mut interval = 1usize;
        while index < self.item_count && self.position(index).offset <= offset {
            index = index.saturating_add(interval);
            interval = interval.saturating_mul(2);
        }
        let high = cmp::min(index, self.item_count - 1);
        self.binary_search(index / 2, high, offset)
    }
}

impl core::fmt::Debug for SizeAndPositionManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SizeAndPositionManager")
            .field("item_count", &self.item_count)
            .field("estimated_item_size", &self.estimated_item_size)
            .field("last_measured_index", &self.last_measured_index())
            .finish_non_exhaustive()
    }
}
