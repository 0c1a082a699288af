use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use crate::grid::Point;

/// A value for every cell of a rectangular grid, stored row-major in a single vec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStorage<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T: Copy> CellStorage<T> {
    pub fn new(rows: usize, columns: usize, value: T) -> Self {
        Self {
            rows,
            columns,
            cells: vec![value; rows * columns],
        }
    }
}

impl<T> CellStorage<T> {
    /// Builds a storage from row-major values. Returns `None` if the number of values does not
    /// match the dimensions.
    pub fn from_vec(rows: usize, columns: usize, cells: Vec<T>) -> Option<Self> {
        (Some(cells.len()) == rows.checked_mul(columns)).then_some(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_valid(&self, node: Point) -> bool {
        node.row < self.rows && node.col < self.columns
    }

    pub fn get(&self, node: Point) -> Option<&T> {
        if self.is_valid(node) {
            self.cells.get(self.offset(node))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, node: Point) -> Option<&mut T> {
        if self.is_valid(node) {
            let offset = self.offset(node);
            self.cells.get_mut(offset)
        } else {
            None
        }
    }

    /// Iterates over the rows of the storage.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.columns.max(1))
    }

    /// Iterates over every cell together with its coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(i, value)| {
            (
                Point {
                    row: i / columns,
                    col: i % columns,
                },
                value,
            )
        })
    }

    fn offset(&self, node: Point) -> usize {
        node.row * self.columns + node.col
    }
}

impl<T> Index<Point> for CellStorage<T> {
    type Output = T;

    fn index(&self, node: Point) -> &Self::Output {
        match self.get(node) {
            Some(value) => value,
            None => panic!("{node} is outside of a {}x{} grid", self.rows, self.columns),
        }
    }
}

impl<T> IndexMut<Point> for CellStorage<T> {
    fn index_mut(&mut self, node: Point) -> &mut Self::Output {
        let (rows, columns) = (self.rows, self.columns);
        match self.get_mut(node) {
            Some(value) => value,
            None => panic!("{node} is outside of a {rows}x{columns} grid"),
        }
    }
}

impl<T: Display> Display for CellStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows_iter() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
