use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use thiserror::Error;

use crate::{
    cell::Descriptor,
    grid::{Grid, Point},
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read maze file {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed maze: {0}")]
    Format(#[from] FormatError),
}

/// Describes which check a maze text failed. Lines are counted from 1, rows and columns of the
/// grid from 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing header on line {line}")]
    MissingHeader { line: usize },
    #[error("line {line} is not two numbers separated by one character: {text:?}")]
    InvalidHeader { line: usize, text: String },
    #[error("a maze needs at least one row and one column, got {rows}x{columns}")]
    EmptyDimension { rows: usize, columns: usize },
    #[error("start {point} is outside of the {rows}x{columns} maze")]
    StartOutOfBounds {
        point: Point,
        rows: usize,
        columns: usize,
    },
    #[error("finish {point} is outside of the {rows}x{columns} maze")]
    FinishOutOfBounds {
        point: Point,
        rows: usize,
        columns: usize,
    },
    #[error("a {rows}x{columns} maze has more cells than can be addressed")]
    TooLarge { rows: usize, columns: usize },
    #[error("expected {expected} cells but got {found}")]
    CellCount { expected: usize, found: usize },
    #[error("line {line} is blank")]
    BlankLine { line: usize },
    #[error("expected {expected} rows but found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid descriptor {symbol:?} at row {row}, column {col}")]
    InvalidDescriptor { row: usize, col: usize, symbol: char },
}

/// Reads and parses the maze stored in the file at `path`.
pub fn load_file(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    let path = path.as_ref();
    debug!("loading maze from {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    load(&text)
}

/// Parses a maze from its text form.
///
/// The first three lines hold `columns,rows`, `start column,start row` and
/// `finish column,finish row`. Each of them is two numbers separated by a single non-digit
/// character. They are followed by one line per row with one descriptor per column.
pub fn load(text: &str) -> Result<Grid, LoadError> {
    match parse(text) {
        Ok(grid) => {
            debug!(
                "loaded {}x{} maze, start {} finish {}",
                grid.rows(),
                grid.columns(),
                grid.start(),
                grid.finish()
            );
            Ok(grid)
        }
        Err(e) => {
            debug!("rejected maze: {e}");
            Err(e.into())
        }
    }
}

fn parse(text: &str) -> Result<Grid, FormatError> {
    let mut lines = text
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate()
        .map(|(i, l)| (i + 1, l));

    let (columns, rows) = parse_header(lines.next(), 1)?;
    let (start_col, start_row) = parse_header(lines.next(), 2)?;
    let (finish_col, finish_row) = parse_header(lines.next(), 3)?;

    if rows == 0 || columns == 0 {
        return Err(FormatError::EmptyDimension { rows, columns });
    }

    let start = Point::new(start_row, start_col);
    if start.row >= rows || start.col >= columns {
        return Err(FormatError::StartOutOfBounds {
            point: start,
            rows,
            columns,
        });
    }
    let finish = Point::new(finish_row, finish_col);
    if finish.row >= rows || finish.col >= columns {
        return Err(FormatError::FinishOutOfBounds {
            point: finish,
            rows,
            columns,
        });
    }

    let data: Vec<(usize, &str)> = lines.collect();
    if let Some((line, _)) = data.iter().find(|(_, text)| text.trim().is_empty()) {
        return Err(FormatError::BlankLine { line: *line });
    }
    if data.len() != rows {
        return Err(FormatError::RowCount {
            expected: rows,
            found: data.len(),
        });
    }

    let mut cells = Vec::new();
    for (row, (_, text)) in data.into_iter().enumerate() {
        let found = text.chars().count();
        if found != columns {
            return Err(FormatError::RowLength {
                row,
                expected: columns,
                found,
            });
        }

        for (col, symbol) in text.chars().enumerate() {
            let d = Descriptor::try_from(symbol)
                .map_err(|symbol| FormatError::InvalidDescriptor { row, col, symbol })?;
            cells.push(d);
        }
    }

    Grid::new(rows, columns, start, finish, cells)
}

fn parse_header(
    line: Option<(usize, &str)>,
    expected: usize,
) -> Result<(usize, usize), FormatError> {
    let Some((line, text)) = line else {
        return Err(FormatError::MissingHeader { line: expected });
    };
    if text.trim().is_empty() {
        return Err(FormatError::BlankLine { line });
    }

    let invalid = || FormatError::InvalidHeader {
        line,
        text: text.to_string(),
    };

    let split = text.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
    let (first, rest) = text.split_at(split);
    let mut rest = rest.chars();
    // the filler itself can be any character except a digit
    rest.next();
    let second = rest.as_str();

    let number = |s: &str| -> Result<usize, FormatError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse().map_err(|_| invalid())
    };

    Ok((number(first)?, number(second)?))
}
