use alloc::sync::Arc;
use alloc::vec::Vec;

use virtual_list::{
    Align, ConfigUpdate, Error, ItemPosition, ManagerConfig, OffsetForIndexQuery,
    SizeAndPositionManager, VisibleRange, VisibleRangeQuery,
};

use crate::placement::PlacementCache;
use crate::{ItemPlacement, ListOptions, RenderedRange, ScrollEvent, Tween, Viewport, ViewportId};

/// Why the controller's offset last changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollChangeReason {
    /// Set by the program; must be pushed to the viewport on the next commit.
    Requested,
    /// Reported by the viewport; already applied there.
    Observed,
}

/// One item to materialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderedItem {
    pub index: usize,
    pub sticky: bool,
    pub placement: ItemPlacement,
}

impl RenderedItem {
    pub fn offset(&self) -> u64 {
        self.placement.start
    }

    pub fn size(&self) -> u32 {
        self.placement.size
    }
}

/// Drives a [`SizeAndPositionManager`] against a [`Viewport`].
///
/// This type holds no UI objects. Adapters drive it by calling:
/// - `mount` once the scroll container exists, and `unmount` on teardown
/// - `on_scroll` for user scroll notifications
/// - `set_options` / `scroll_to_index` / `scroll_to_offset` for program changes, followed by
///   `commit` to push a requested offset to the viewport
/// - `render` to get the items to materialize
/// - `tick(now_ms)` each frame while a scroll transition runs
#[derive(Clone, Debug)]
pub struct Controller {
    options: ListOptions,
    manager: SizeAndPositionManager,
    offset: u64,
    reason: ScrollChangeReason,
    // Offset last known to be applied on the viewport.
    synced_offset: Option<u64>,
    viewport: Option<ViewportId>,
    compensation: Option<Tween>,
    placements: PlacementCache,
}

impl Controller {
    /// Builds the controller and derives the initial offset from `scroll_offset`, else from
    /// `scroll_to_index`, else 0.
    pub fn new(options: ListOptions) -> Result<Self, Error> {
        options.validate()?;
        let manager = SizeAndPositionManager::new(ManagerConfig {
            item_count: options.item_count,
            item_size_getter: options.item_size.getter(),
            estimated_item_size: options.resolved_estimated_item_size(),
        })?;
        vdebug!(
            item_count = options.item_count,
            container_size = options.container_size,
            overscan_count = options.overscan_count,
            "Controller::new"
        );

        let mut c = Self {
            options,
            manager,
            offset: 0,
            reason: ScrollChangeReason::Requested,
            synced_offset: None,
            viewport: None,
            compensation: None,
            placements: PlacementCache::default(),
        };
        let offset = match (c.options.scroll_offset, c.options.scroll_to_index) {
            (Some(offset), _) => offset,
            (None, Some(index)) => c.offset_for_index(index, c.options.scroll_to_alignment)?,
            (None, None) => 0,
        };
        c.offset = offset;
        Ok(c)
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn manager(&self) -> &SizeAndPositionManager {
        &self.manager
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn scroll_change_reason(&self) -> ScrollChangeReason {
        self.reason
    }

    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    /// Length of the scroll track: measured sizes plus estimates for the rest.
    pub fn content_size(&self) -> u64 {
        self.manager.total_size()
    }

    /// Attaches the viewport and applies the initial offset without a transition.
    pub fn mount(&mut self, viewport: &mut impl Viewport) {
        self.viewport = Some(viewport.id());
        if self.options.scroll_offset.is_some() || self.options.scroll_to_index.is_some() {
            self.apply_scroll(viewport, self.offset, 0, true);
        } else {
            self.synced_offset = Some(self.offset);
        }
    }

    /// Detaches the viewport and drops any pending transition.
    pub fn unmount(&mut self) {
        self.viewport = None;
        self.synced_offset = None;
        self.cancel_transition();
    }

    /// Applies a new configuration.
    ///
    /// Item property changes (count, size source, estimate) reconfigure the manager and
    /// recompute sizes from index 0. The offset is then re-derived as a requested change: from
    /// `scroll_offset` when it changed, otherwise from `scroll_to_index` when the target,
    /// alignment, or item properties changed.
    ///
    /// On error the previous configuration stays in place.
    pub fn set_options(&mut self, next: ListOptions) -> Result<(), Error> {
        next.validate()?;

        let prev = &self.options;
        let scroll_props_changed = next.scroll_to_index != prev.scroll_to_index
            || next.scroll_to_alignment != prev.scroll_to_alignment;
        let item_size_changed = !next.item_size.same_source(&prev.item_size);
        let item_props_changed = next.item_count != prev.item_count
            || item_size_changed
            || next.estimated_item_size != prev.estimated_item_size;
        let scroll_offset_changed = next.scroll_offset != prev.scroll_offset;
        let direction_changed = next.scroll_direction != prev.scroll_direction;

        if item_props_changed {
            let mut update = ConfigUpdate::default()
                .with_item_count(next.item_count)
                .with_estimated_item_size(next.resolved_estimated_item_size());
            if item_size_changed {
                update.item_size_getter = Some(next.item_size.getter());
            }
            self.manager.update_config(update)?;
        }
        vdebug!(
            item_count = next.item_count,
            item_props_changed,
            scroll_props_changed,
            scroll_offset_changed,
            "set_options"
        );

        self.options = next;
        if item_props_changed {
            self.recompute_sizes(0);
        } else if direction_changed {
            self.placements.clear();
        }

        if scroll_offset_changed {
            self.request(self.options.scroll_offset.unwrap_or(0));
        } else if let Some(index) = self.options.scroll_to_index {
            if scroll_props_changed || item_props_changed {
                let offset = self.offset_for_index(index, self.options.scroll_to_alignment)?;
                self.request(offset);
            }
        }
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) -> Result<(), Error> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Records a user-driven scroll.
    ///
    /// Events with a negative offset or from a viewport other than the mounted one are
    /// discarded. Returns `true` when the event was accepted.
    pub fn on_scroll(&mut self, event: ScrollEvent) -> bool {
        if event.offset < 0 || self.viewport != Some(event.source) {
            vtrace!(
                offset = event.offset,
                source = event.source.0,
                "on_scroll: discarded"
            );
            return false;
        }
        let offset = event.offset as u64;
        self.offset = offset;
        self.reason = ScrollChangeReason::Observed;
        self.synced_offset = Some(offset);
        if let Some(cb) = &self.options.on_scroll {
            cb(offset);
        }
        true
    }

    /// Requests a scroll that shows `index` with `align`. Out-of-range indexes target item 0.
    ///
    /// Returns the requested offset; call `commit` to apply it.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Result<u64, Error> {
        let offset = self.offset_for_index(index, align)?;
        self.request(offset);
        Ok(offset)
    }

    /// Requests a scroll to `offset`; call `commit` to apply it.
    pub fn scroll_to_offset(&mut self, offset: u64) {
        self.request(offset);
    }

    /// Pushes a pending requested offset to the viewport, animating when a transition is
    /// configured. Observed offsets are never re-applied.
    ///
    /// Returns `true` when the viewport was scrolled.
    pub fn commit(&mut self, viewport: &mut impl Viewport, now_ms: u64) -> bool {
        if self.viewport != Some(viewport.id()) {
            vwarn!(viewport = viewport.id().0, "commit: viewport is not mounted");
            return false;
        }
        if self.reason != ScrollChangeReason::Requested || self.synced_offset == Some(self.offset)
        {
            return false;
        }
        self.apply_scroll(viewport, self.offset, now_ms, false);
        true
    }

    /// Advances the scroll transition.
    ///
    /// Returns the content translation (scroll-axis pixels) to apply this frame, or `None` when
    /// no transition is running. The final frame returns the resting value and ends the
    /// transition.
    pub fn tick(&mut self, now_ms: u64) -> Option<i64> {
        let tween = self.compensation?;
        let translate = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.compensation = None;
        }
        Some(translate)
    }

    pub fn is_transitioning(&self) -> bool {
        self.compensation.is_some()
    }

    pub fn transition(&self) -> Option<Tween> {
        self.compensation
    }

    /// Drops a running transition. Safe to call repeatedly.
    pub fn cancel_transition(&mut self) {
        self.compensation = None;
    }

    /// Invalidates sizes from `start_index` on, e.g. after content reflow.
    pub fn recompute_sizes(&mut self, start_index: usize) {
        self.placements.clear();
        self.manager.reset_item(start_index);
    }

    /// The overscanned range for the current offset, without rendering.
    pub fn visible_range(&mut self) -> Option<VisibleRange> {
        self.manager.visible_range(VisibleRangeQuery {
            container_size: self.options.container_size,
            offset: self.offset,
            overscan_count: self.options.overscan_count,
        })
    }

    /// Emits the items to materialize: sticky items first, then every non-sticky index of the
    /// overscanned visible range.
    ///
    /// Returns the realized range (also passed to `on_items_rendered`), or `None` when nothing
    /// is visible.
    pub fn render(
        &mut self,
        mut f: impl FnMut(RenderedItem),
    ) -> Result<Option<RenderedRange>, Error> {
        let range = self.visible_range();

        let sticky = Arc::clone(&self.options.sticky_indices);
        for &index in sticky.iter() {
            f(self.rendered_item(index, true)?);
        }

        let Some(range) = range else {
            return Ok(None);
        };
        for index in range.iter() {
            if self.options.is_sticky(index) {
                continue;
            }
            f(self.rendered_item(index, false)?);
        }

        let rendered = RenderedRange {
            start_index: range.start,
            stop_index: range.stop,
        };
        vtrace!(
            start_index = rendered.start_index,
            stop_index = rendered.stop_index,
            "render"
        );
        if let Some(cb) = &self.options.on_items_rendered {
            cb(rendered);
        }
        Ok(Some(rendered))
    }

    /// Collects rendered items into `out` (clears `out` first).
    pub fn collect_rendered_items(
        &mut self,
        out: &mut Vec<RenderedItem>,
    ) -> Result<Option<RenderedRange>, Error> {
        out.clear();
        self.render(|it| out.push(it))
    }

    /// Placement of one item, memoized until the next `recompute_sizes`.
    pub fn placement(&mut self, index: usize, sticky: bool) -> Result<ItemPlacement, Error> {
        if let Some(placement) = self.placements.get(index, sticky) {
            return Ok(placement);
        }
        let pos: ItemPosition = self.manager.size_and_position_for_index(index)?;
        let direction = self.options.scroll_direction;
        let placement = if sticky {
            ItemPlacement::sticky(direction, pos)
        } else {
            ItemPlacement::absolute(direction, pos)
        };
        self.placements.insert(index, sticky, placement);
        Ok(placement)
    }

    pub fn cached_placements(&self) -> usize {
        self.placements.len()
    }

    fn rendered_item(&mut self, index: usize, sticky: bool) -> Result<RenderedItem, Error> {
        Ok(RenderedItem {
            index,
            sticky,
            placement: self.placement(index, sticky)?,
        })
    }

    fn request(&mut self, offset: u64) {
        self.offset = offset;
        self.reason = ScrollChangeReason::Requested;
    }

    fn offset_for_index(&mut self, index: usize, align: Align) -> Result<u64, Error> {
        if self.manager.item_count() == 0 {
            return Ok(0);
        }
        let index = if index < self.manager.item_count() {
            index
        } else {
            0
        };
        self.manager.updated_offset_for_index(OffsetForIndexQuery {
            align,
            container_size: self.options.container_size,
            current_offset: self.offset,
            target_index: index,
        })
    }

    /// Sets the viewport position and adopts the offset it reports back, then (unless skipped)
    /// starts a compensation transition that translates the content from where it was drawn
    /// before the jump back to rest.
    fn apply_scroll(
        &mut self,
        viewport: &mut impl Viewport,
        offset: u64,
        now_ms: u64,
        skip_transition: bool,
    ) {
        let direction = self.options.scroll_direction;
        let before = viewport.scroll_offset(direction);
        viewport.set_scroll_offset(direction, offset);

        // The viewport may clamp; render from where it actually landed.
        let after = viewport.scroll_offset(direction);
        let landed = u64::try_from(after).unwrap_or(0);
        self.offset = landed;
        self.synced_offset = Some(landed);
        vdebug!(offset, landed, before, skip_transition, "apply_scroll");

        if skip_transition {
            return;
        }
        let Some(transition) = self.options.scroll_to_transition else {
            return;
        };
        let delta = after.max(0).saturating_sub(before);
        if delta == 0 {
            return;
        }

        // A running transition is pre-empted; continue from where it currently draws.
        let current = self.tick(now_ms).unwrap_or(0);
        self.compensation = Some(Tween::new(
            current.saturating_add(delta),
            0,
            now_ms,
            transition.duration_ms,
            transition.easing,
        ));
    }
}
