//! Parsed decision criteria: one weight and one impact per numeric column.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    /// `+`: higher values are better.
    Benefit,
    /// `-`: lower values are better.
    Cost,
}

impl FromStr for Impact {
    type Err = CriteriaError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "+" => Ok(Impact::Benefit),
            "-" => Ok(Impact::Cost),
            other => Err(CriteriaError::InvalidImpact(other.to_string())),
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::Benefit => f.write_str("+"),
            Impact::Cost => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("Invalid weights format. Must be numbers separated by commas.")]
    InvalidWeight(String),
    #[error("Impacts must be either '+' or '-'.")]
    InvalidImpact(String),
    #[error("Number of weights ({weights}) and impacts ({impacts}) must be the same.")]
    CountMismatch { weights: usize, impacts: usize },
}

/// Weights and impacts, index aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub weights: Vec<f64>,
    pub impacts: Vec<Impact>,
}

impl Criteria {
    /// Parses the raw comma separated inputs. Tokens are trimmed.
    pub fn parse(weights: &str, impacts: &str) -> Result<Self, CriteriaError> {
        let weights = crate::validation::split_tokens(weights)
            .map(|token| {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|w| w.is_finite())
                    .ok_or_else(|| CriteriaError::InvalidWeight(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let impacts = crate::validation::split_tokens(impacts)
            .map(str::parse)
            .collect::<Result<Vec<Impact>, _>>()?;

        if weights.len() != impacts.len() {
            return Err(CriteriaError::CountMismatch {
                weights: weights.len(),
                impacts: impacts.len(),
            });
        }
        Ok(Self { weights, impacts })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
