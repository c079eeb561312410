//! Matrix input (CSV or Excel) and CSV output of the ranking.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use csv::{ReaderBuilder, Trim, Writer};

use super::{RankMethod, Ranking, RankingError};

pub const SCORE_HEADER: &str = "Topsis Score";
pub const RANK_HEADER: &str = "Rank";

/// How an uploaded matrix is encoded, decided by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    /// `.xlsx` or `.xls`; the first worksheet is read.
    Excel,
}

impl InputFormat {
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(InputFormat::Csv),
            "xlsx" | "xls" => Some(InputFormat::Excel),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Excel => "xlsx",
        }
    }
}

/// A decision matrix as read from the upload, every cell still as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Values of column `col` when every cell is a finite number.
    pub fn column_values(&self, col: usize) -> Option<Vec<f64>> {
        self.rows
            .iter()
            .map(|row| {
                row.get(col)
                    .and_then(|cell| cell.parse::<f64>().ok())
                    .filter(|v| v.is_finite())
            })
            .collect()
    }

    /// Columns whose every cell is a finite number, in file order, with their
    /// index in the table.
    pub fn numeric_columns(&self) -> Vec<(usize, Vec<f64>)> {
        (0..self.headers.len())
            .filter_map(|col| self.column_values(col).map(|values| (col, values)))
            .collect()
    }
}

/// Reads a matrix in the given format from its raw bytes.
pub fn read_input(format: InputFormat, bytes: &[u8]) -> Result<Table, RankingError> {
    match format {
        InputFormat::Csv => read_table(bytes),
        InputFormat::Excel => read_workbook(bytes),
    }
}

/// Reads a headed CSV. Cells are trimmed; ragged rows are an error.
pub fn read_table<R: Read>(reader: R) -> Result<Table, RankingError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok(Table { headers, rows })
}

/// Reads the first worksheet of an `.xlsx`/`.xls` workbook. Its first row is
/// the header.
pub fn read_workbook(bytes: &[u8]) -> Result<Table, RankingError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(RankingError::NoWorksheet)??;
    Ok(table_from_range(&range))
}

fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();
    Table {
        headers,
        rows: rows.collect(),
    }
}

/// Writes the original table followed by the score and rank columns.
///
/// Scores are written as floats (`0.0`, `0.53`). Average ranks are floats
/// too (`1.0`, `2.5`); dense ranks are integers.
pub fn write_result<W: Write>(table: &Table, ranking: &Ranking, writer: W) -> Result<(), RankingError> {
    let mut writer = Writer::from_writer(writer);

    let mut header = table.headers.clone();
    header.push(SCORE_HEADER.to_string());
    header.push(RANK_HEADER.to_string());
    writer.write_record(&header)?;

    for ((row, score), rank) in table.rows.iter().zip(&ranking.scores).zip(&ranking.ranks) {
        let mut record = row.clone();
        record.push(format!("{:?}", score));
        record.push(match ranking.method {
            RankMethod::Average => format!("{:?}", rank),
            RankMethod::Dense => format!("{}", *rank as u64),
        });
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::topsis::{rank, rank_table};
    use common::model::criteria::Criteria;

    const INPUT: &str = "Model,Price,Storage,Camera\n\
                         M1, 250 ,16,12\n\
                         M2,200,16,8\n\
                         M3,300,32,16\n";

    #[test]
    fn label_columns_are_not_criteria() {
        let table = read_table(INPUT.as_bytes()).unwrap();
        let columns = table.numeric_columns();
        assert_eq!(
            columns.iter().map(|(idx, _)| *idx).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(columns[0].1, vec![250.0, 200.0, 300.0]);
    }

    #[test]
    fn column_with_a_blank_cell_is_carried_through() {
        let table = read_table("A,B,C\n1,2,\n3,4,5\n".as_bytes()).unwrap();
        assert_eq!(table.numeric_columns().len(), 2);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = read_table("A,B\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("Error reading file:"));
    }

    #[test]
    fn format_follows_the_extension() {
        assert_eq!(InputFormat::from_path("data.CSV"), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_path("data.xlsx"), Some(InputFormat::Excel));
        assert_eq!(InputFormat::from_path("data.xls"), Some(InputFormat::Excel));
        assert_eq!(InputFormat::from_path("data.txt"), None);
        assert_eq!(InputFormat::from_path("csv"), None);
    }

    #[test]
    fn worksheet_rows_become_a_table() {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("Model".to_string()));
        range.set_value((0, 1), Data::String("Price".to_string()));
        range.set_value((0, 2), Data::String("Storage".to_string()));
        range.set_value((1, 0), Data::String("M1".to_string()));
        range.set_value((1, 1), Data::Float(250.5));
        range.set_value((1, 2), Data::Int(16));
        range.set_value((2, 0), Data::String("M2".to_string()));
        range.set_value((2, 1), Data::Float(200.0));
        range.set_value((2, 2), Data::Int(32));

        let table = table_from_range(&range);

        assert_eq!(table.headers, vec!["Model", "Price", "Storage"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column_values(1), Some(vec![250.5, 200.0]));
        assert_eq!(table.column_values(2), Some(vec![16.0, 32.0]));
        assert_eq!(table.column_values(0), None);
    }

    #[test]
    fn unreadable_workbook_is_a_read_error() {
        let err = read_input(InputFormat::Excel, b"Model,Price\nM1,1\n").unwrap_err();
        assert!(err.to_string().starts_with("Error reading file:"), "{err}");
    }

    #[test]
    fn result_appends_score_and_rank() {
        let table = read_table(INPUT.as_bytes()).unwrap();
        let criteria = Criteria::parse("1,1,1", "-,+,+").unwrap();
        let ranking = rank_table(&table, &criteria).unwrap();

        let mut out = Vec::new();
        write_result(&table, &ranking, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Model,Price,Storage,Camera,Topsis Score,Rank");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("M3,300,32,16,"));
        assert!(lines[3].ends_with(",1.0"), "{}", lines[3]);
    }

    #[test]
    fn dense_ranks_are_written_as_integers() {
        let table = read_table("Id,A,B\nx,1,1\ny,1,1\nz,2,2\n".as_bytes()).unwrap();
        let columns = vec![
            table.column_values(1).unwrap(),
            table.column_values(2).unwrap(),
        ];
        let criteria = Criteria::parse("1,1", "+,+").unwrap();
        let ranking = rank(&columns, &criteria, RankMethod::Dense);

        let mut out = Vec::new();
        write_result(&table, &ranking, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "x,1,1,0.0,2");
        assert_eq!(lines[2], "y,1,1,0.0,2");
        assert_eq!(lines[3], "z,2,2,1.0,1");
    }
}
