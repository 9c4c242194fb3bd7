use alloc::sync::Arc;

use virtual_list::{Align, Error, ItemSize, ScrollDirection};

use crate::Transition;

/// Called with the new offset after an observed (user-driven) scroll.
pub type OnScrollCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Called after every render with the realized range.
pub type OnItemsRenderedCallback = Arc<dyn Fn(RenderedRange) + Send + Sync>;

/// The inclusive range of non-sticky indexes produced by a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedRange {
    pub start_index: usize,
    pub stop_index: usize,
}

/// Configuration for [`crate::Controller`].
///
/// Cheap to clone: closures and index lists live in `Arc`s, so adapters can tweak a field and
/// hand the result back through `Controller::set_options`.
#[derive(Clone)]
pub struct ListOptions {
    pub item_count: usize,
    pub item_size: ItemSize,
    /// Size assumed for unmeasured items. Defaults to the fixed item size, or 50.
    pub estimated_item_size: Option<u32>,
    /// Viewport extent along the scroll axis (height for vertical lists).
    pub container_size: u32,
    pub scroll_direction: ScrollDirection,
    pub overscan_count: usize,
    pub scroll_to_index: Option<usize>,
    pub scroll_to_alignment: Align,
    /// Requested scroll offset. Takes precedence over `scroll_to_index`.
    pub scroll_offset: Option<u64>,
    /// Animates programmatic scrolls when set.
    pub scroll_to_transition: Option<Transition>,
    /// Indexes rendered on every frame, whether or not they are in the visible range.
    pub sticky_indices: Arc<[usize]>,
    pub on_scroll: Option<OnScrollCallback>,
    pub on_items_rendered: Option<OnItemsRenderedCallback>,
}

impl ListOptions {
    pub const DEFAULT_OVERSCAN_COUNT: usize = 3;

    pub fn new(item_count: usize, item_size: impl Into<ItemSize>, container_size: u32) -> Self {
        Self {
            item_count,
            item_size: item_size.into(),
            estimated_item_size: None,
            container_size,
            scroll_direction: ScrollDirection::default(),
            overscan_count: Self::DEFAULT_OVERSCAN_COUNT,
            scroll_to_index: None,
            scroll_to_alignment: Align::default(),
            scroll_offset: None,
            scroll_to_transition: None,
            sticky_indices: Arc::from([]),
            on_scroll: None,
            on_items_rendered: None,
        }
    }

    /// Checks the configuration errors that must fail fast.
    pub fn validate(&self) -> Result<(), Error> {
        if self.estimated_item_size == Some(0) {
            return Err(Error::InvalidEstimatedItemSize);
        }
        self.item_size.validate(self.item_count)
    }

    /// The explicit estimate, else the item size's default estimate.
    pub fn resolved_estimated_item_size(&self) -> u32 {
        self.estimated_item_size
            .unwrap_or_else(|| self.item_size.default_estimate())
    }

    pub fn with_estimated_item_size(mut self, estimated_item_size: u32) -> Self {
        self.estimated_item_size = Some(estimated_item_size);
        self
    }

    pub fn with_container_size(mut self, container_size: u32) -> Self {
        self.container_size = container_size;
        self
    }

    pub fn with_scroll_direction(mut self, scroll_direction: ScrollDirection) -> Self {
        self.scroll_direction = scroll_direction;
        self
    }

    pub fn with_overscan_count(mut self, overscan_count: usize) -> Self {
        self.overscan_count = overscan_count;
        self
    }

    pub fn with_scroll_to_index(mut self, scroll_to_index: Option<usize>) -> Self {
        self.scroll_to_index = scroll_to_index;
        self
    }

    pub fn with_scroll_to_alignment(mut self, scroll_to_alignment: Align) -> Self {
        self.scroll_to_alignment = scroll_to_alignment;
        self
    }

    pub fn with_scroll_offset(mut self, scroll_offset: Option<u64>) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    pub fn with_scroll_to_transition(mut self, scroll_to_transition: Option<Transition>) -> Self {
        self.scroll_to_transition = scroll_to_transition;
        self
    }

    pub fn with_sticky_indices(mut self, sticky_indices: impl Into<Arc<[usize]>>) -> Self {
        self.sticky_indices = sticky_indices.into();
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(u64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_items_rendered(
        mut self,
        on_items_rendered: Option<impl Fn(RenderedRange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_items_rendered = on_items_rendered.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn is_sticky(&self, index: usize) -> bool {
        self.sticky_indices.contains(&index)
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("item_count", &self.item_count)
            .field("item_size", &self.item_size)
            .field("estimated_item_size", &self.estimated_item_size)
            .field("container_size", &self.container_size)
            .field("scroll_direction", &self.scroll_direction)
            .field("overscan_count", &self.overscan_count)
            .field("scroll_to_index", &self.scroll_to_index)
            .field("scroll_to_alignment", &self.scroll_to_alignment)
            .field("scroll_offset", &self.scroll_offset)
            .field("scroll_to_transition", &self.scroll_to_transition)
            .field("sticky_indices", &self.sticky_indices)
            .finish_non_exhaustive()
    }
}
