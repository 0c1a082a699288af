use std::fmt::Display;

use serde::Serialize;

use crate::grid::{Grid, Point};

/// The symbol stored for every cell of a maze file. Only the top and the right wall of a cell
/// are encoded, the bottom and left walls belong to the neighbouring cells (or the boundary).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub enum Descriptor {
    /// `_`
    Top,
    /// `7`
    TopRight,
    /// `*`
    #[default]
    Open,
    /// `|`
    Right,
}

impl Descriptor {
    pub const ALL: [Descriptor; 4] = [
        Descriptor::Top,
        Descriptor::TopRight,
        Descriptor::Open,
        Descriptor::Right,
    ];

    pub fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '_' => Some(Descriptor::Top),
            '7' => Some(Descriptor::TopRight),
            '*' => Some(Descriptor::Open),
            '|' => Some(Descriptor::Right),
            _ => None,
        }
    }

    pub fn from_walls(top: bool, right: bool) -> Self {
        match (top, right) {
            (true, false) => Descriptor::Top,
            (true, true) => Descriptor::TopRight,
            (false, false) => Descriptor::Open,
            (false, true) => Descriptor::Right,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Descriptor::Top => '_',
            Descriptor::TopRight => '7',
            Descriptor::Open => '*',
            Descriptor::Right => '|',
        }
    }

    pub fn has_top_wall(self) -> bool {
        matches!(self, Descriptor::Top | Descriptor::TopRight)
    }

    pub fn has_right_wall(self) -> bool {
        matches!(self, Descriptor::TopRight | Descriptor::Right)
    }
}

impl TryFrom<char> for Descriptor {
    type Error = char;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Descriptor::from_char(symbol).ok_or(symbol)
    }
}

impl From<Descriptor> for char {
    fn from(d: Descriptor) -> Self {
        d.as_char()
    }
}

impl Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The walls of a single cell, derived from its descriptor each time it is asked for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Walls {
    pub point: Point,
    pub top: bool,
    pub right: bool,
}

impl Walls {
    pub fn new(point: Point, descriptor: Descriptor) -> Self {
        Self {
            point,
            top: descriptor.has_top_wall(),
            right: descriptor.has_right_wall(),
        }
    }
}

/// Returns `(has_top_wall, has_right_wall)` for the cell at `row`, `col`.
///
/// Panics if the coordinate lies outside the grid.
pub fn walls_at(grid: &Grid, row: usize, col: usize) -> (bool, bool) {
    let walls = grid.walls(Point { row, col });
    (walls.top, walls.right)
}
