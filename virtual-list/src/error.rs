/// Errors reported by the size-and-position manager and its configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The estimated item size must be positive.
    #[error("estimated item size must be greater than zero")]
    InvalidEstimatedItemSize,

    /// An index-addressed query was made outside `0..count`.
    #[error("requested index {index} is outside of range 0..{count}")]
    IndexOutOfRange { index: usize, count: usize },

    /// A per-index size list does not cover every item.
    #[error("item size list has {len} entries but the list has {count} items")]
    SizeListTooShort { len: usize, count: usize },
}
