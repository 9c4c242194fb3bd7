use virtual_list::ScrollDirection;

/// Identity of a scroll container, used to drop events from foreign sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportId(pub u64);

/// The scroll container a [`crate::Controller`] drives.
///
/// Implemented by the UI layer. Calls are synchronous.
pub trait Viewport {
    fn id(&self) -> ViewportId;

    /// Current scroll position along `direction`.
    ///
    /// May be negative while the platform overscrolls (e.g. elastic bounce).
    fn scroll_offset(&self, direction: ScrollDirection) -> i64;

    /// Moves the scroll position. The viewport may clamp `offset` to its scrollable range.
    fn set_scroll_offset(&mut self, direction: ScrollDirection, offset: u64);
}

/// A user-driven scroll notification reported by a viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    pub source: ViewportId,
    pub offset: i64,
}

impl ScrollEvent {
    /// Builds an event from the viewport's current offset.
    pub fn from_viewport(viewport: &impl Viewport, direction: ScrollDirection) -> Self {
        Self {
            source: viewport.id(),
            offset: viewport.scroll_offset(direction),
        }
    }
}
