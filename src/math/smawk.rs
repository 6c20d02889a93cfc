//! Row minima of totally monotone matrices (SMAWK).
//!
//! ## Purpose
//!
//! This module finds, for every row of an implicit matrix, the column holding
//! the row's minimum. When the matrix is totally monotone the search takes
//! O(rows + columns) evaluations instead of O(rows * columns).
//!
//! ## Design notes
//!
//! * **Implicit**: The matrix is a closure `f(row, col)`; nothing is materialized.
//! * **Generic costs**: Entries only need `PartialOrd + Copy`, so lexicographic
//!   tuples such as `(infeasibility, cost)` are valid entries.
//!
//! ## Key concepts
//!
//! * **REDUCE**: Discards columns that cannot hold any row's minimum, leaving at
//!   most as many columns as rows.
//! * **INTERPOLATE**: Solves every other row recursively, then scans each
//!   remaining row only between the minima of its neighbours.
//!
//! ## Invariants
//!
//! * Every returned column is the leftmost minimum of its row when the matrix
//!   is totally monotone.
//!
//! ## Non-goals
//!
//! * This module does not verify total monotonicity.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Leftmost minimizing column of every row of a totally monotone `rows x cols` matrix.
///
/// Returns an empty vector when the matrix has no rows. With no columns every
/// row maps to column 0.
pub fn smawk_row_minima<C, F>(rows: usize, cols: usize, f: F) -> Vec<usize>
where
    C: PartialOrd + Copy,
    F: Fn(usize, usize) -> C,
{
    let mut minima = vec![0; rows];
    if rows == 0 || cols == 0 {
        return minima;
    }

    let row_ids: Vec<usize> = (0..rows).collect();
    let col_ids: Vec<usize> = (0..cols).collect();
    solve(&row_ids, &col_ids, &f, &mut minima);

    minima
}

fn solve<C, F>(rows: &[usize], cols: &[usize], f: &F, minima: &mut [usize])
where
    C: PartialOrd + Copy,
    F: Fn(usize, usize) -> C,
{
    if rows.is_empty() {
        return;
    }

    let cols = reduce(rows, cols, f);

    if rows.len() == 1 {
        minima[rows[0]] = scan(rows[0], &cols, f);
        return;
    }

    let odd: Vec<usize> = rows.iter().skip(1).step_by(2).copied().collect();
    solve(&odd, &cols, f, minima);

    // each even row lies between the minima of its odd neighbours
    let mut start = 0;
    for k in (0..rows.len()).step_by(2) {
        let stop = if k + 1 < rows.len() {
            let target = minima[rows[k + 1]];
            cols[start..]
                .iter()
                .position(|&c| c == target)
                .map_or(start, |p| start + p)
        } else {
            cols.len() - 1
        };

        minima[rows[k]] = scan(rows[k], &cols[start..=stop], f);
        start = stop;
    }
}

/// Keep at most `rows.len()` columns that may still hold a row minimum.
fn reduce<C, F>(rows: &[usize], cols: &[usize], f: &F) -> Vec<usize>
where
    C: PartialOrd + Copy,
    F: Fn(usize, usize) -> C,
{
    let mut survivors: Vec<usize> = Vec::with_capacity(rows.len());
    for &col in cols {
        while let Some(&top) = survivors.last() {
            let row = rows[survivors.len() - 1];
            if f(row, top) <= f(row, col) {
                break;
            }
            survivors.pop();
        }
        if survivors.len() < rows.len() {
            survivors.push(col);
        }
    }
    survivors
}

/// Leftmost minimum of one row over the given columns.
fn scan<C, F>(row: usize, cols: &[usize], f: &F) -> usize
where
    C: PartialOrd + Copy,
    F: Fn(usize, usize) -> C,
{
    let mut best = cols[0];
    let mut best_cost = f(row, best);
    for &col in &cols[1..] {
        let cost = f(row, col);
        if cost < best_cost {
            best = col;
            best_cost = cost;
        }
    }
    best
}
