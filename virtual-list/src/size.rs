use alloc::sync::Arc;

use crate::Error;

/// The resolved size source: returns the size of the item at an index.
///
/// Resolved once when the list is configured so the measurement loop never branches on the
/// kind of size source.
pub type SizeGetter = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// Estimate used when neither an explicit estimate nor a fixed item size is available.
pub const DEFAULT_ESTIMATED_ITEM_SIZE: u32 = 50;

/// How item sizes are supplied.
#[derive(Clone)]
pub enum ItemSize {
    /// Every item has the same size.
    Fixed(u32),
    /// One size per index. Must hold at least `item_count` entries.
    List(Arc<[u32]>),
    /// Sizes computed on demand.
    Dynamic(SizeGetter),
}

impl ItemSize {
    pub fn dynamic(f: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }

    pub fn list(sizes: impl Into<Arc<[u32]>>) -> Self {
        Self::List(sizes.into())
    }

    pub fn fixed_size(&self) -> Option<u32> {
        match self {
            Self::Fixed(size) => Some(*size),
            _ => None,
        }
    }

    /// The estimate to use when none is configured explicitly: the fixed size when it is
    /// non-zero, otherwise [`DEFAULT_ESTIMATED_ITEM_SIZE`].
    pub fn default_estimate(&self) -> u32 {
        match self.fixed_size() {
            Some(size) if size > 0 => size,
            _ => DEFAULT_ESTIMATED_ITEM_SIZE,
        }
    }

    /// Checks that the source can answer for every index in `0..item_count`.
    pub fn validate(&self, item_count: usize) -> Result<(), Error> {
        match self {
            Self::List(sizes) if sizes.len() < item_count => Err(Error::SizeListTooShort {
                len: sizes.len(),
                count: item_count,
            }),
            _ => Ok(()),
        }
    }

    /// Returns `true` when both values describe the same source.
    ///
    /// Lists and functions compare by identity, fixed sizes by value.
    pub fn same_source(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
            (Self::Dynamic(a), Self::Dynamic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Resolves the source into a single [`SizeGetter`].
    pub fn getter(&self) -> SizeGetter {
        match self {
            Self::Fixed(size) => {
                let size = *size;
                Arc::new(move |_| size)
            }
            Self::List(sizes) => {
                let sizes = Arc::clone(sizes);
                Arc::new(move |i| sizes.get(i).copied().unwrap_or(0))
            }
            Self::Dynamic(f) => Arc::clone(f),
        }
    }
}

impl From<u32> for ItemSize {
    fn from(size: u32) -> Self {
        Self::Fixed(size)
    }
}

impl From<alloc::vec::Vec<u32>> for ItemSize {
    fn from(sizes: alloc::vec::Vec<u32>) -> Self {
        Self::List(sizes.into())
    }
}

impl core::fmt::Debug for ItemSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::List(sizes) => f.debug_tuple("List").field(&sizes.len()).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
