use std::fmt::Display;

use serde::{Serialize, Serializer};

use crate::{
    cell::{Descriptor, Walls},
    load::FormatError,
    storage::CellStorage,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Point {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The order in which the solver tries to leave a cell.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Left => "left",
                Direction::Right => "right",
            }
        )
    }
}

/// A rectangular maze with a start and a finish cell. A `Grid` can only be built through
/// [`Grid::new`] or the loader, both of which validate it, and it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    start: Point,
    finish: Point,
    #[serde(serialize_with = "serialize_rows")]
    cells: CellStorage<Descriptor>,
}

impl Grid {
    /// Creates a grid from row-major descriptors.
    pub fn new(
        rows: usize,
        columns: usize,
        start: Point,
        finish: Point,
        cells: Vec<Descriptor>,
    ) -> Result<Self, FormatError> {
        if rows == 0 || columns == 0 {
            return Err(FormatError::EmptyDimension { rows, columns });
        }

        if start.row >= rows || start.col >= columns {
            return Err(FormatError::StartOutOfBounds {
                point: start,
                rows,
                columns,
            });
        }
        if finish.row >= rows || finish.col >= columns {
            return Err(FormatError::FinishOutOfBounds {
                point: finish,
                rows,
                columns,
            });
        }

        let expected = rows
            .checked_mul(columns)
            .ok_or(FormatError::TooLarge { rows, columns })?;
        let found = cells.len();
        let cells = CellStorage::from_vec(rows, columns, cells)
            .ok_or(FormatError::CellCount { expected, found })?;

        Ok(Self {
            rows,
            columns,
            start,
            finish,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn finish(&self) -> Point {
        self.finish
    }

    /// The stored descriptor of a cell. Panics if `node` is outside the grid.
    pub fn descriptor(&self, node: Point) -> Descriptor {
        self.cells[node]
    }

    /// The walls of a cell. Panics if `node` is outside the grid.
    pub fn walls(&self, node: Point) -> Walls {
        Walls::new(node, self.descriptor(node))
    }

    /// Returns the cell reached by leaving `node` in `direction`, or `None` if the grid
    /// boundary or a wall is in the way.
    ///
    /// Every wall is stored on exactly one of the two cells it separates, so moving up or right
    /// looks at `node` itself while moving down or left looks at the neighbour.
    pub fn neighbour(&self, node: Point, direction: Direction) -> Option<Point> {
        match direction {
            Direction::Up => {
                if node.row == 0 || self.walls(node).top {
                    return None;
                }
                Some(Point::new(node.row - 1, node.col))
            }
            Direction::Down => {
                let below = Point::new(node.row + 1, node.col);
                if below.row >= self.rows || self.walls(below).top {
                    return None;
                }
                Some(below)
            }
            Direction::Left => {
                if node.col == 0 {
                    return None;
                }
                let left = Point::new(node.row, node.col - 1);
                if self.walls(left).right {
                    return None;
                }
                Some(left)
            }
            Direction::Right => {
                if node.col + 1 >= self.columns || self.walls(node).right {
                    return None;
                }
                Some(Point::new(node.row, node.col + 1))
            }
        }
    }

    /// All reachable neighbours of `node`, in solver priority order.
    pub fn neighbours_of(&self, node: Point) -> impl Iterator<Item = (Direction, Point)> + '_ {
        Direction::PRIORITY
            .into_iter()
            .filter_map(move |d| self.neighbour(node, d).map(|p| (d, p)))
    }

    /// Iterates over every cell with its walls, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Walls> + '_ {
        self.cells.iter().map(|(point, d)| Walls::new(point, *d))
    }

    /// Creates a per-cell storage with the dimensions of this grid.
    pub fn create_storage<T: Copy>(&self, value: T) -> CellStorage<T> {
        CellStorage::new(self.rows, self.columns, value)
    }
}

fn serialize_rows<S: Serializer>(
    cells: &CellStorage<Descriptor>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        cells
            .rows_iter()
            .map(|row| row.iter().map(|d| d.as_char()).collect::<String>()),
    )
}

/// Writes the grid in the maze file format, so that loading the output gives back an equal grid.
impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{},{}", self.columns, self.rows)?;
        writeln!(f, "{},{}", self.start.col, self.start.row)?;
        writeln!(f, "{},{}", self.finish.col, self.finish.row)?;
        write!(f, "{}", self.cells)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // +-----+-----+
    // |  S        |
    // +-----+     +
    // |  F  |     |
    // +-----+-----+
    fn create_basic_grid() -> Grid {
        use Descriptor::*;
        Grid::new(
            2,
            2,
            Point::new(0, 0),
            Point::new(1, 0),
            vec![Top, TopRight, TopRight, Right],
        )
        .unwrap()
    }

    #[test]
    fn test_neighbours_respect_shared_walls() {
        let grid = create_basic_grid();

        // the wall between (0, 0) and (1, 0) is the top wall of (1, 0)
        assert_eq!(grid.neighbour(Point::new(0, 0), Direction::Down), None);
        assert_eq!(grid.neighbour(Point::new(1, 0), Direction::Up), None);

        // the wall between (1, 0) and (1, 1) is the right wall of (1, 0)
        assert_eq!(grid.neighbour(Point::new(1, 0), Direction::Right), None);
        assert_eq!(grid.neighbour(Point::new(1, 1), Direction::Left), None);

        assert_eq!(
            grid.neighbour(Point::new(0, 0), Direction::Right),
            Some(Point::new(0, 1))
        );
        assert_eq!(
            grid.neighbour(Point::new(0, 1), Direction::Left),
            Some(Point::new(0, 0))
        );
        assert_eq!(
            grid.neighbour(Point::new(0, 1), Direction::Down),
            Some(Point::new(1, 1))
        );
        assert_eq!(
            grid.neighbour(Point::new(1, 1), Direction::Up),
            Some(Point::new(0, 1))
        );
    }

    #[test]
    fn test_boundary_blocks_moves() {
        let grid = Grid::new(1, 1, Point::new(0, 0), Point::new(0, 0), vec![Descriptor::Open])
            .unwrap();

        for d in Direction::PRIORITY {
            assert_eq!(grid.neighbour(Point::new(0, 0), d), None, "{d}");
        }
    }

    #[test]
    fn test_neighbours_in_priority_order() {
        let grid = Grid::new(
            3,
            3,
            Point::new(0, 0),
            Point::new(2, 2),
            vec![Descriptor::Open; 9],
        )
        .unwrap();

        let directions: Vec<Direction> = grid
            .neighbours_of(Point::new(1, 1))
            .map(|(d, _)| d)
            .collect();
        assert_eq!(directions, Direction::PRIORITY.to_vec());
    }

    #[test]
    fn test_new_validates() {
        assert!(matches!(
            Grid::new(0, 3, Point::new(0, 0), Point::new(0, 0), vec![]),
            Err(FormatError::EmptyDimension { rows: 0, columns: 3 })
        ));
        assert!(matches!(
            Grid::new(1, 1, Point::new(0, 1), Point::new(0, 0), vec![Descriptor::Open]),
            Err(FormatError::StartOutOfBounds { .. })
        ));
        assert!(matches!(
            Grid::new(1, 1, Point::new(0, 0), Point::new(1, 0), vec![Descriptor::Open]),
            Err(FormatError::FinishOutOfBounds { .. })
        ));
        assert!(matches!(
            Grid::new(2, 1, Point::new(0, 0), Point::new(0, 0), vec![Descriptor::Open]),
            Err(FormatError::CellCount {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_new_reports_real_cell_count() {
        assert_eq!(
            Grid::new(
                2,
                3,
                Point::new(0, 0),
                Point::new(1, 2),
                vec![Descriptor::Open; 5]
            ),
            Err(FormatError::CellCount {
                expected: 6,
                found: 5
            })
        );
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        assert_eq!(
            Grid::new(
                usize::MAX,
                2,
                Point::new(0, 0),
                Point::new(0, 0),
                vec![Descriptor::Open]
            ),
            Err(FormatError::TooLarge {
                rows: usize::MAX,
                columns: 2
            })
        );
    }

    #[test]
    fn test_display_writes_file_format() {
        let grid = create_basic_grid();
        assert_eq!(grid.to_string(), "2,2\n0,0\n0,1\n_7\n7|\n");
    }
}
