//! The `topsis` command: ranks a decision matrix file from the shell.
//!
//! ```text
//! topsis <InputDataFile> <Weights> <Impacts> <OutputFile>
//! ```
//!
//! Stricter than the web form: the first column is the label and every other
//! column must be numeric. Equal scores get dense integer ranks. Weight and
//! impact tokens are split on `,`; weights may carry spaces, impacts must be
//! exactly `+` or `-`.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

use common::model::criteria::{Criteria, Impact};
use log::info;
use thiserror::Error;

use crate::services::topsis::{rank, read_input, write_result, InputFormat, RankMethod, RankingError};

pub const USAGE: &str = "Usage: topsis <InputDataFile> <Weights> <Impacts> <OutputFile>";
pub const DONE: &str = "TOPSIS analysis completed successfully.";

/// The label column plus at least two criteria.
const MIN_COLUMNS: usize = 3;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", USAGE)]
    Usage,

    #[error("Input file not found")]
    InputNotFound,

    #[error("Error reading file: {0}")]
    Input(#[source] io::Error),

    #[error("Input file must contain at least three columns")]
    TooFewColumns,

    #[error("Columns from 2nd to last must contain numeric values only")]
    NonNumeric,

    #[error("Number of weights and impacts must match number of criteria columns")]
    CountMismatch,

    #[error("Impacts must be either + or -")]
    InvalidImpact,

    #[error("Weights must be numeric")]
    InvalidWeight,

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error("Error writing output file: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub weights: String,
    pub impacts: String,
    pub output: PathBuf,
}

impl Args {
    /// Parses the arguments following the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, CliError> {
        let args: Vec<String> = args.into_iter().collect();
        let [input, weights, impacts, output] = <[String; 4]>::try_from(args).map_err(|_| CliError::Usage)?;
        Ok(Self {
            input: input.into(),
            weights,
            impacts,
            output: output.into(),
        })
    }
}

/// Reads the input, ranks it and writes the result file.
pub fn run(args: &Args) -> Result<(), CliError> {
    let bytes = fs::read(&args.input).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CliError::InputNotFound,
        _ => CliError::Input(e),
    })?;
    let format = InputFormat::from_path(&args.input).unwrap_or(InputFormat::Csv);
    let table = read_input(format, &bytes)?;

    if table.headers.len() < MIN_COLUMNS {
        return Err(CliError::TooFewColumns);
    }
    let columns = (1..table.headers.len())
        .map(|col| table.column_values(col))
        .collect::<Option<Vec<_>>>()
        .ok_or(CliError::NonNumeric)?;

    let criteria = parse_criteria(&args.weights, &args.impacts, columns.len())?;
    let ranking = rank(&columns, &criteria, RankMethod::Dense);

    let file = File::create(&args.output).map_err(CliError::Output)?;
    write_result(&table, &ranking, BufWriter::new(file))?;
    info!(
        "Ranked {} rows of {} into {}",
        table.rows.len(),
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

fn parse_criteria(weights: &str, impacts: &str, columns: usize) -> Result<Criteria, CliError> {
    let weights: Vec<&str> = weights.split(',').collect();
    let impacts: Vec<&str> = impacts.split(',').collect();
    if weights.len() != columns || impacts.len() != columns {
        return Err(CliError::CountMismatch);
    }

    let impacts = impacts
        .into_iter()
        .map(|token| token.parse::<Impact>().map_err(|_| CliError::InvalidImpact))
        .collect::<Result<Vec<_>, _>>()?;
    let weights = weights
        .into_iter()
        .map(|token| token.trim().parse::<f64>().map_err(|_| CliError::InvalidWeight))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Criteria { weights, impacts })
}
