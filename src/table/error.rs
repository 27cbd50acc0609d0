//! Errors raised while building a table engine

use thiserror::Error;

/// Programmer errors detected when a table engine is constructed.
///
/// Everything that can go wrong after construction (bad page numbers,
/// unknown sort keys, malformed rows) is normalized silently instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("a table needs at least one column")]
    NoColumns,

    #[error("column {index} has an empty key")]
    EmptyColumnKey { index: usize },

    #[error("no page sizes were declared")]
    NoPageSizes,

    #[error("page sizes must be greater than zero")]
    ZeroPageSize,

    #[error("page size {size} is not one of the declared page sizes")]
    PageSizeNotAllowed { size: usize },
}
