//! # TOPSIS Ranking
//!
//! Ranks the rows of an uploaded decision matrix with TOPSIS (Technique for
//! Order of Preference by Similarity to Ideal Solution).
//!
//! ## Pipeline
//!
//! 1.  **Parsing**: `read_input` loads the matrix with its header, from CSV
//!     (`read_table`) or from the first worksheet of an Excel workbook
//!     (`read_workbook`). CSV rows must all have the header's width.
//! 2.  **Criteria selection**: a column is a criterion when every one of its
//!     cells parses as a number. Other columns (names, labels) are carried
//!     through to the output untouched.
//! 3.  **Scoring**: `rank` normalizes each criterion column by its Euclidean
//!     norm, applies the weights, finds the ideal best and worst value of each
//!     column according to its impact, and scores every row with
//!     `d_worst / (d_best + d_worst)`.
//! 4.  **Ranking**: rows are ranked by descending score. With
//!     `RankMethod::Average` equal scores share the average of the positions
//!     they occupy; with `RankMethod::Dense` they share one integer rank and
//!     the next score gets the next integer.
//! 5.  **Output**: `write_result` appends `Topsis Score` and `Rank` columns to
//!     the original table.

mod table;

use common::model::criteria::{Criteria, Impact};
use thiserror::Error;

pub use table::{read_input, read_table, read_workbook, write_result, InputFormat, Table};

/// Fewest criterion columns a matrix must have.
pub const MIN_CRITERIA: usize = 2;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Error reading file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error reading file: {0}")]
    Excel(#[from] calamine::Error),

    #[error("Workbook has no worksheet.")]
    NoWorksheet,

    #[error("Error writing result: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file has no data rows.")]
    NoRows,

    #[error("Input file must contain at least 2 numeric columns.")]
    TooFewCriteria { found: usize },

    #[error("Number of weights ({weights}) does not match number of numeric columns ({columns}).")]
    WeightCount { weights: usize, columns: usize },

    #[error("Number of impacts ({impacts}) does not match number of numeric columns ({columns}).")]
    ImpactCount { impacts: usize, columns: usize },
}

/// How equal scores are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMethod {
    /// Ties share the mean of their positions: `1, 2.5, 2.5, 4`.
    Average,
    /// Ties share one rank, no gaps: `1, 2, 2, 3`.
    Dense,
}

/// Per-row result, index aligned with the table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub scores: Vec<f64>,
    pub ranks: Vec<f64>,
    pub method: RankMethod,
}

/// Checks the matrix against the criteria and ranks its rows with average
/// ranks.
pub fn rank_table(table: &Table, criteria: &Criteria) -> Result<Ranking, RankingError> {
    if table.rows.is_empty() {
        return Err(RankingError::NoRows);
    }

    let columns = table.numeric_columns();
    if columns.len() < MIN_CRITERIA {
        return Err(RankingError::TooFewCriteria {
            found: columns.len(),
        });
    }
    if criteria.weights.len() != columns.len() {
        return Err(RankingError::WeightCount {
            weights: criteria.weights.len(),
            columns: columns.len(),
        });
    }
    if criteria.impacts.len() != columns.len() {
        return Err(RankingError::ImpactCount {
            impacts: criteria.impacts.len(),
            columns: columns.len(),
        });
    }

    let matrix: Vec<Vec<f64>> = columns.into_iter().map(|(_, values)| values).collect();
    Ok(rank(&matrix, criteria, RankMethod::Average))
}

/// Scores and ranks a column-major matrix.
///
/// `columns[j][i]` is the value of row `i` on criterion `j`. Callers
/// guarantee one weight and one impact per column and equal column lengths.
pub fn rank(columns: &[Vec<f64>], criteria: &Criteria, method: RankMethod) -> Ranking {
    let rows = columns.first().map_or(0, Vec::len);

    let weighted: Vec<Vec<f64>> = columns
        .iter()
        .zip(&criteria.weights)
        .map(|(column, weight)| {
            let norm = column.iter().map(|v| v * v).sum::<f64>().sqrt();
            column
                .iter()
                .map(|v| if norm == 0.0 { 0.0 } else { v / norm * weight })
                .collect()
        })
        .collect();

    let ideals: Vec<(f64, f64)> = weighted
        .iter()
        .zip(&criteria.impacts)
        .map(|(column, impact)| {
            let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = column.iter().copied().fold(f64::INFINITY, f64::min);
            match impact {
                Impact::Benefit => (max, min),
                Impact::Cost => (min, max),
            }
        })
        .collect();

    let scores: Vec<f64> = (0..rows)
        .map(|row| {
            let (mut to_best, mut to_worst) = (0.0_f64, 0.0_f64);
            for (column, (best, worst)) in weighted.iter().zip(&ideals) {
                to_best += (column[row] - best).powi(2);
                to_worst += (column[row] - worst).powi(2);
            }
            let (to_best, to_worst) = (to_best.sqrt(), to_worst.sqrt());
            if to_best + to_worst == 0.0 {
                0.0
            } else {
                to_worst / (to_best + to_worst)
            }
        })
        .collect();

    let ranks = match method {
        RankMethod::Average => average_ranks(&scores),
        RankMethod::Dense => dense_ranks(&scores),
    };
    Ranking {
        scores,
        ranks,
        method,
    }
}

/// Descending ranks starting at 1; ties get the mean of their positions.
fn average_ranks(scores: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranks = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // positions start+1 ..= end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Descending ranks starting at 1; equal scores share a rank, no gaps.
fn dense_ranks(scores: &[f64]) -> Vec<f64> {
    let mut distinct = scores.to_vec();
    distinct.sort_by(|a, b| b.total_cmp(a));
    distinct.dedup();

    scores
        .iter()
        .map(|score| {
            let position = distinct.partition_point(|d| d.total_cmp(score).is_gt());
            (position + 1) as f64
        })
        .collect()
}
