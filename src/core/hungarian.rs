//! Hungarian (Munkres) algorithm for the square assignment problem.
//!
//! The solver keeps the classic numbered steps so traces can be checked
//! against reference implementations:
//!
//! 1. Reduce rows, then columns
//! 2. Star zeros (row-major)
//! 3. Cover starred columns, finish when all are covered
//! 4. Prime an uncovered zero
//! 5. Augment along the alternating prime/star series
//! 6. Adjust the matrix by the smallest uncovered value
//!
//! Scan order is row-major everywhere, which fixes the result when several
//! optimal assignments exist.

use thiserror::Error;
use tracing::trace;

use crate::core::cost::CostMatrix;

/// Errors for cost matrices the solver cannot accept
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignmentError {
    #[error("cost matrix is empty")]
    EmptyMatrix,

    #[error("cost matrix is not square: row {row} has {len} columns, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("invalid cost at ({row}, {col})")]
    InvalidCost { row: usize, col: usize },

    #[error("no assignment with finite cost exists")]
    Infeasible,
}

/// A single row → column assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    StarZeros,
    CoverColumns,
    PrimeZero,
    Augment { row: usize, col: usize },
    AdjustMatrix,
    Done,
}

impl Phase {
    /// Canonical Munkres step number
    fn number(self) -> u8 {
        match self {
            Phase::StarZeros => 2,
            Phase::CoverColumns => 3,
            Phase::PrimeZero => 4,
            Phase::Augment { .. } => 5,
            Phase::AdjustMatrix => 6,
            Phase::Done => 7,
        }
    }
}

/// Check that `cost` is a non-empty square matrix without NaN or -inf cells.
///
/// Returns the matrix size.
pub fn validate(cost: &CostMatrix) -> Result<usize, AssignmentError> {
    let n = cost.size();
    if n == 0 {
        return Err(AssignmentError::EmptyMatrix);
    }

    for (row, values) in cost.rows().iter().enumerate() {
        if values.len() != n {
            return Err(AssignmentError::NotSquare { row, len: values.len(), expected: n });
        }
        if let Some(col) = values.iter().position(|v| v.is_nan() || *v == f64::NEG_INFINITY) {
            return Err(AssignmentError::InvalidCost { row, col });
        }
    }

    Ok(n)
}

/// Solve the assignment problem, minimizing total cost.
///
/// Returns one assignment per row, ordered by row. `+inf` cells are never
/// chosen unless no finite assignment exists, in which case
/// [`AssignmentError::Infeasible`] is returned.
pub fn solve(cost: &CostMatrix) -> Result<Vec<Assignment>, AssignmentError> {
    let n = validate(cost)?;
    let mut state = Munkres::new(cost, n);

    state.reduce();

    let mut phase = Phase::StarZeros;
    loop {
        trace!(step = phase.number(), "munkres step");
        phase = match phase {
            Phase::StarZeros => state.star_zeros(),
            Phase::CoverColumns => state.cover_starred_columns(),
            Phase::PrimeZero => state.prime_uncovered_zero(),
            Phase::Augment { row, col } => state.augment(row, col),
            Phase::AdjustMatrix => state.adjust()?,
            Phase::Done => break,
        };
    }

    Ok(state.assignments())
}

/// Sum of the original costs of an assignment
pub fn assignment_cost(cost: &CostMatrix, assignments: &[Assignment]) -> f64 {
    assignments.iter().map(|a| cost[(a.row, a.col)]).sum()
}

/// Working state: a private copy of the matrix plus markers and covers
struct Munkres {
    n: usize,
    matrix: Vec<Vec<f64>>,
    starred: Vec<Vec<bool>>,
    primed: Vec<Vec<bool>>,
    row_cover: Vec<bool>,
    col_cover: Vec<bool>,
}

impl Munkres {
    fn new(cost: &CostMatrix, n: usize) -> Self {
        Self {
            n,
            matrix: cost.rows().to_vec(),
            starred: vec![vec![false; n]; n],
            primed: vec![vec![false; n]; n],
            row_cover: vec![false; n],
            col_cover: vec![false; n],
        }
    }

    /// Step 1: subtract each row's minimum, then each column's minimum
    fn reduce(&mut self) {
        let n = self.n;

        for row in self.matrix.iter_mut() {
            let min = row.iter().copied().fold(f64::INFINITY, f64::min);
            // An all-infinite row stays as is and surfaces as infeasible later
            if min.is_finite() {
                row.iter_mut().for_each(|v| *v -= min);
            }
        }

        for j in 0..n {
            let min = (0..n).map(|i| self.matrix[i][j]).fold(f64::INFINITY, f64::min);
            if min.is_finite() {
                for i in 0..n {
                    self.matrix[i][j] -= min;
                }
            }
        }
    }

    /// Step 2
    fn star_zeros(&mut self) -> Phase {
        for i in 0..self.n {
            for j in 0..self.n {
                if self.matrix[i][j] == 0.0 && !self.row_cover[i] && !self.col_cover[j] {
                    self.starred[i][j] = true;
                    self.row_cover[i] = true;
                    self.col_cover[j] = true;
                }
            }
        }

        self.clear_covers();
        Phase::CoverColumns
    }

    /// Step 3
    fn cover_starred_columns(&mut self) -> Phase {
        for j in 0..self.n {
            if self.star_in_col(j).is_some() {
                self.col_cover[j] = true;
            }
        }

        if self.col_cover.iter().all(|&c| c) {
            Phase::Done
        } else {
            Phase::PrimeZero
        }
    }

    /// Step 4
    fn prime_uncovered_zero(&mut self) -> Phase {
        loop {
            let Some((row, col)) = self.find_uncovered_zero() else {
                return Phase::AdjustMatrix;
            };

            self.primed[row][col] = true;

            match self.star_in_row(row) {
                Some(star_col) => {
                    self.row_cover[row] = true;
                    self.col_cover[star_col] = false;
                }
                None => return Phase::Augment { row, col },
            }
        }
    }

    /// Step 5: flip the alternating series starting at the primed zero (row, col)
    fn augment(&mut self, row: usize, col: usize) -> Phase {
        let mut series = vec![(row, col)];
        let mut col = col;

        while let Some(star_row) = self.star_in_col(col) {
            series.push((star_row, col));
            // A starred zero reached here always has a prime in its row
            let Some(prime_col) = self.prime_in_row(star_row) else {
                break;
            };
            series.push((star_row, prime_col));
            col = prime_col;
        }

        trace!(length = series.len(), "augmenting series");

        for (i, j) in series {
            self.starred[i][j] = !self.starred[i][j];
        }

        self.clear_covers();
        self.primed.iter_mut().for_each(|row| row.fill(false));
        Phase::CoverColumns
    }

    /// Step 6
    fn adjust(&mut self) -> Result<Phase, AssignmentError> {
        let min = self.min_uncovered();
        if !min.is_finite() {
            return Err(AssignmentError::Infeasible);
        }

        for i in 0..self.n {
            for j in 0..self.n {
                if self.row_cover[i] {
                    self.matrix[i][j] += min;
                }
                if !self.col_cover[j] {
                    self.matrix[i][j] -= min;
                }
            }
        }

        Ok(Phase::PrimeZero)
    }

    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        (0..self.n)
            .filter(|&i| !self.row_cover[i])
            .flat_map(|i| (0..self.n).map(move |j| (i, j)))
            .find(|&(i, j)| !self.col_cover[j] && self.matrix[i][j] == 0.0)
    }

    fn min_uncovered(&self) -> f64 {
        let mut min = f64::INFINITY;
        for i in (0..self.n).filter(|&i| !self.row_cover[i]) {
            for j in (0..self.n).filter(|&j| !self.col_cover[j]) {
                min = min.min(self.matrix[i][j]);
            }
        }
        min
    }

    fn star_in_row(&self, row: usize) -> Option<usize> {
        self.starred[row].iter().position(|&s| s)
    }

    fn star_in_col(&self, col: usize) -> Option<usize> {
        (0..self.n).find(|&i| self.starred[i][col])
    }

    fn prime_in_row(&self, row: usize) -> Option<usize> {
        self.primed[row].iter().position(|&p| p)
    }

    fn clear_covers(&mut self) {
        self.row_cover.fill(false);
        self.col_cover.fill(false);
    }

    fn assignments(&self) -> Vec<Assignment> {
        self.starred
            .iter()
            .enumerate()
            .filter_map(|(row, stars)| stars.iter().position(|&s| s).map(|col| Assignment { row, col }))
            .collect()
    }
}
