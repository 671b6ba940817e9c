use thiserror::Error;

/// Errors raised by grid lookups, grid construction and search requests.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) lies outside a grid of {rows} rows")]
    OutOfRange { row: i64, col: i64, rows: usize },
    #[error("cannot lay out {rows} rows on a surface {width} pixels wide")]
    InvalidGeometry { rows: usize, width: u32 },
    #[error("invalid search request: {0}")]
    InvalidSearchRequest(#[from] SearchRequestError),
}

/// Reasons a search cannot be started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchRequestError {
    #[error("no start cell has been placed")]
    MissingStart,
    #[error("no end cell has been placed")]
    MissingEnd,
    #[error("start and end are the same cell")]
    SameCell,
    #[error("start or end is a barrier")]
    BarrierEndpoint,
}
