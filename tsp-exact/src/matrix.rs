use std::fmt;

use ndarray::Array2;

use crate::{error::InvalidInputError, node::Node, Cost};

/// Entries are capped so that summing the edges of any solvable tour cannot overflow.
pub const MAX_ENTRY: usize = u32::MAX as usize;

/// A validated `n x n` matrix of travel costs of a complete directed graph.
///
/// `distance(i, j)` is the cost of moving directly from node `i` to node `j`.
/// Every instance is non-empty, square, has a zero diagonal and entries of at most [`MAX_ENTRY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    matrix: Array2<Cost>,
}

impl DistanceMatrix {
    pub fn from_rows<R, C>(rows: &[R]) -> Result<Self, InvalidInputError>
    where
        R: AsRef<[C]>,
        C: Copy + Into<Cost>,
    {
        let n = rows.len();
        if n == 0 {
            return Err(InvalidInputError::Empty);
        }

        let mut matrix = Array2::from_elem((n, n), Cost::zero());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(InvalidInputError::NotSquare {
                    row: i,
                    len: row.len(),
                    n,
                });
            }
            for (j, &cost) in row.iter().enumerate() {
                matrix[[i, j]] = cost.into();
            }
        }

        Self::from_array(matrix)
    }

    pub fn from_array(matrix: Array2<Cost>) -> Result<Self, InvalidInputError> {
        let (n, m) = matrix.dim();
        if n == 0 {
            return Err(InvalidInputError::Empty);
        }
        if n != m {
            return Err(InvalidInputError::NotSquare {
                row: 0,
                len: m,
                n,
            });
        }

        for ((row, col), cost) in matrix.indexed_iter() {
            if row == col && *cost != Cost::zero() {
                return Err(InvalidInputError::NonZeroDiagonal {
                    node: row,
                    cost: cost.value(),
                });
            }
            if cost.value() > MAX_ENTRY {
                return Err(InvalidInputError::EntryTooLarge {
                    row,
                    col,
                    max: MAX_ENTRY,
                });
            }
        }

        Ok(DistanceMatrix { matrix })
    }

    pub fn n(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn distance(&self, from: Node, to: Node) -> Cost {
        self.matrix[[from.id(), to.id()]]
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> {
        (0..self.n()).map(Node::new)
    }

    pub fn is_symmetric(&self) -> bool {
        self.matrix == self.matrix.t()
    }

    /// Multiplies every entry by `factor`.
    pub fn scaled(&self, factor: usize) -> Result<Self, InvalidInputError> {
        let mut matrix = self.matrix.clone();
        for ((row, col), cost) in matrix.indexed_iter_mut() {
            *cost = cost
                .checked_mul(factor)
                .ok_or(InvalidInputError::EntryTooLarge {
                    row,
                    col,
                    max: MAX_ENTRY,
                })?;
        }
        Self::from_array(matrix)
    }

    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        self.matrix
            .outer_iter()
            .map(|row| row.iter().map(|c| c.value()).collect())
            .collect()
    }
}

/// Prints one row per line, every entry right-justified to a width of three.
impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.matrix.outer_iter() {
            for cost in row {
                write!(f, "{:>3}", cost)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
