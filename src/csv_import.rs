use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tsp_exact::{Cost, DistanceMatrix, InvalidInputError};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read distance matrix: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse distance matrix: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid distance matrix: {0}")]
    Invalid(#[from] InvalidInputError),
}

/// Reads a distance matrix with one comma separated row per line. Lines starting with `#` are skipped.
pub fn csv_import(filename: &Path) -> Result<DistanceMatrix, ImportError> {
    log::info!("Importing distance matrix from {:?}.", filename);
    let file = File::open(filename)?;
    read_matrix(file)
}

pub fn read_matrix<R: Read>(input: R) -> Result<DistanceMatrix, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let mut rows: Vec<Vec<Cost>> = vec![];
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let entries = record
            .iter()
            .enumerate()
            .map(|(col, field)| parse_entry(row, col, field))
            .collect::<Result<Vec<Cost>, InvalidInputError>>()?;
        rows.push(entries);
    }

    let dists = DistanceMatrix::from_rows(&rows)?;
    log::info!("Imported distance matrix with {} nodes.", dists.n());
    Ok(dists)
}

fn parse_entry(row: usize, col: usize, field: &str) -> Result<Cost, InvalidInputError> {
    if let Ok(value) = field.parse::<i64>() {
        return if value < 0 {
            Err(InvalidInputError::NegativeEntry { row, col, value })
        } else {
            Ok(Cost::new(value as usize))
        };
    }
    match field.parse::<f64>() {
        Ok(value) if !value.is_finite() => Err(InvalidInputError::NonFiniteEntry {
            row,
            col,
            value: field.to_string(),
        }),
        _ => Err(InvalidInputError::MalformedEntry {
            row,
            col,
            value: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod test_csv_import {
    use super::*;

    #[test]
    fn test_read_with_comments() {
        let input = "# asymmetric\n0, 2, 9\n# between rows\n1,0,6\n\n15, 7,0\n";
        let dists = read_matrix(input.as_bytes()).unwrap();
        assert_eq!(
            dists.to_rows(),
            vec![vec![0, 2, 9], vec![1, 0, 6], vec![15, 7, 0]]
        );
    }

    #[test]
    fn test_ragged_rows() {
        let err = read_matrix("0,1\n1,0,3\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Invalid(InvalidInputError::NotSquare { row: 1, len: 3, n: 2 })
        ));
    }

    #[test]
    fn test_invalid_entries() {
        let err = read_matrix("0,-1\n1,0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Invalid(InvalidInputError::NegativeEntry { row: 0, col: 1, value: -1 })
        ));

        let err = read_matrix("0,1\nNaN,0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Invalid(InvalidInputError::NonFiniteEntry { row: 1, col: 0, .. })
        ));

        let err = read_matrix("0,1.5\n1,0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Invalid(InvalidInputError::MalformedEntry { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn test_empty_and_diagonal() {
        let err = read_matrix("# nothing here\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::Invalid(InvalidInputError::Empty)));

        let err = read_matrix("0,1\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Invalid(InvalidInputError::NonZeroDiagonal { node: 1, cost: 2 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = csv_import(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
