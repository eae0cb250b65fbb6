use std::ops::Index;

use crate::core::compatibility::score_pair;
use crate::models::PreferenceProfile;

/// Square assignment cost matrix.
///
/// Rows are subjects, columns are candidate roommates. Self-pairing cells
/// hold `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: Vec<Vec<f64>>,
}

impl CostMatrix {
    /// Wrap raw rows without checking the shape; the solver validates it.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True when `cost[i][j] == cost[j][i]` for every cell
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (0..n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.rows[row][col]
    }
}

/// Invert a compatibility percentage into a cost: 100% costs 0, 0% costs 100
#[inline]
pub fn compatibility_to_cost(percentage: u8) -> f64 {
    100.0 - percentage as f64
}

/// Build the N×N cost matrix for a population of profiles
pub fn build_cost_matrix<'a, I>(profiles: I) -> CostMatrix
where
    I: IntoIterator<Item = &'a PreferenceProfile>,
{
    let profiles: Vec<&PreferenceProfile> = profiles.into_iter().collect();
    let n = profiles.len();

    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        // Nobody rooms with themselves
                        f64::INFINITY
                    } else {
                        compatibility_to_cost(score_pair(profiles[i], profiles[j]).percentage)
                    }
                })
                .collect()
        })
        .collect();

    CostMatrix { rows }
}
