use thiserror::Error;

/// A distance matrix, or a request on one, that the solvers cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("the distance matrix has no nodes")]
    Empty,

    #[error("row {row} has {len} entries, but the matrix has {n} rows")]
    NotSquare { row: usize, len: usize, n: usize },

    #[error("node {node} has a nonzero distance of {cost} to itself")]
    NonZeroDiagonal { node: usize, cost: usize },

    #[error("entry ({row}, {col}) is negative: {value}")]
    NegativeEntry { row: usize, col: usize, value: i64 },

    #[error("entry ({row}, {col}) is not finite: {value}")]
    NonFiniteEntry { row: usize, col: usize, value: String },

    #[error("entry ({row}, {col}) is not a non-negative integer: {value:?}")]
    MalformedEntry { row: usize, col: usize, value: String },

    #[error("entry ({row}, {col}) exceeds the maximum distance of {max}")]
    EntryTooLarge { row: usize, col: usize, max: usize },

    #[error("{n} nodes exceed the limit of {max} nodes")]
    TooManyNodes { n: usize, max: usize },
}
