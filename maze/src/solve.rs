use log::{debug, trace};
use serde::Serialize;

use crate::{
    grid::{Grid, Point},
    storage::CellStorage,
};

#[derive(Debug, PartialEq, Clone, Eq, Serialize)]
pub struct Solution {
    /// Every cell from the start (first) to the finish (last).
    pub path: Vec<Point>,
    pub start: Point,
    pub finish: Point,
    /// Number of cells pushed after the start.
    pub moves: usize,
    /// Number of cells popped while backtracking.
    pub dead_ends: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SolverState {
    Searching,
    Unsolvable,
    Solved(Solution),
}

impl SolverState {
    pub fn is_done(&self) -> bool {
        !matches!(self, SolverState::Searching)
    }
}

/// The outcome of a complete solve. Not finding a path is a regular result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum SolveResult {
    Solved(Solution),
    Unsolvable,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }

    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SolveResult::Solved(solution) => Some(&solution.path),
            SolveResult::Unsolvable => None,
        }
    }
}

/// Depth first search with an explicit path stack.
///
/// Each call to [`Solver::step`] either detects that the finish has been reached, moves to the
/// first open and unvisited neighbour (trying up, down, left and right in that order) or pops
/// a dead end. A cell is marked visited when it is pushed and never cleared, so every cell is
/// pushed at most once and the search ends after at most `2 * rows * columns` steps.
#[derive(Debug)]
pub struct Solver<'a> {
    grid: &'a Grid,
    visited: CellStorage<bool>,
    stack: Vec<Point>,
    popped: Vec<Point>,
    moves: usize,
    state: SolverState,
}

impl<'a> Solver<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        let start = grid.start();
        let mut visited = grid.create_storage(false);
        visited[start] = true;

        Self {
            grid,
            visited,
            stack: vec![start],
            popped: Vec::new(),
            moves: 0,
            state: SolverState::Searching,
        }
    }

    /// Runs the search to completion.
    pub fn finish(&mut self) -> SolveResult {
        loop {
            match self.step() {
                SolverState::Searching => {}
                SolverState::Solved(solution) => return SolveResult::Solved(solution.clone()),
                SolverState::Unsolvable => return SolveResult::Unsolvable,
            }
        }
    }

    pub fn step(&mut self) -> &SolverState {
        if self.state.is_done() {
            return &self.state;
        }

        let Some(current) = self.stack.last().copied() else {
            self.state = SolverState::Unsolvable;
            return &self.state;
        };

        if current == self.grid.finish() {
            debug!(
                "reached finish {} after {} moves and {} dead ends",
                current,
                self.moves,
                self.popped.len()
            );
            self.state = SolverState::Solved(Solution {
                path: self.stack.clone(),
                start: self.grid.start(),
                finish: self.grid.finish(),
                moves: self.moves,
                dead_ends: self.popped.len(),
            });
            return &self.state;
        }

        let grid = self.grid;
        let next = grid
            .neighbours_of(current)
            .find(|(_, point)| !self.visited[*point]);

        match next {
            Some((direction, point)) => {
                trace!("{} -> {} ({})", current, point, direction);
                self.visited[point] = true;
                self.stack.push(point);
                self.moves += 1;
            }
            None => {
                trace!("dead end at {}", current);
                self.stack.pop();
                self.popped.push(current);

                if self.stack.is_empty() {
                    debug!(
                        "no path from {} to {}, {} cells explored",
                        self.grid.start(),
                        self.grid.finish(),
                        self.popped.len()
                    );
                    self.state = SolverState::Unsolvable;
                }
            }
        }

        &self.state
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// The current candidate path, start first.
    pub fn path(&self) -> &[Point] {
        &self.stack
    }

    pub fn get_visited(&self) -> &CellStorage<bool> {
        &self.visited
    }

    /// Cells removed from the path as dead ends, in the order they were popped.
    pub fn popped(&self) -> &[Point] {
        &self.popped
    }
}

/// Solves `grid` with a fresh solver.
pub fn solve(grid: &Grid) -> SolveResult {
    Solver::new(grid).finish()
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::load;

    fn p(row: usize, col: usize) -> Point {
        Point { row, col }
    }

    // +-----+-----+-----+
    // |  S           F  |
    // +     +-----+-----+
    // |     |           |
    // +-----+-----+-----+
    fn create_dead_end_grid() -> Grid {
        load("3,2\n0,0\n2,0\n__7\n|_7\n").unwrap()
    }

    #[test]
    fn test_open_grid_follows_priority() {
        let grid = load("3,3\n0,0\n2,2\n***\n***\n***\n").unwrap();

        let SolveResult::Solved(solution) = solve(&grid) else {
            panic!("open grid must be solvable");
        };

        assert_eq!(
            solution.path,
            vec![
                p(0, 0),
                p(1, 0),
                p(2, 0),
                p(2, 1),
                p(1, 1),
                p(0, 1),
                p(0, 2),
                p(1, 2),
                p(2, 2)
            ]
        );
        assert_eq!(solution.moves, 8);
        assert_eq!(solution.dead_ends, 0);
    }

    #[test]
    fn test_start_is_finish() {
        let grid = load("2,2\n1,1\n1,1\n**\n**\n").unwrap();

        let result = solve(&grid);
        assert_eq!(result.path(), Some(&[p(1, 1)][..]));
        assert!(matches!(
            result,
            SolveResult::Solved(Solution {
                moves: 0,
                dead_ends: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_walled_off_finish() {
        let grid = load("2,2\n0,0\n1,1\n**\n|_\n").unwrap();

        let mut solver = Solver::new(&grid);
        assert_eq!(solver.finish(), SolveResult::Unsolvable);
        assert!(solver.path().is_empty());
        assert_eq!(solver.popped(), &[p(1, 0), p(0, 1), p(0, 0)]);
        assert!(!solver.get_visited()[p(1, 1)]);
    }

    #[test]
    fn test_backtracked_cells_leave_the_path() {
        let grid = create_dead_end_grid();

        let mut solver = Solver::new(&grid);
        let result = solver.finish();

        assert_eq!(result.path(), Some(&[p(0, 0), p(0, 1), p(0, 2)][..]));
        assert_eq!(solver.popped(), &[p(1, 0)]);
        // visited cells stay visited after backtracking
        assert!(solver.get_visited()[p(1, 0)]);

        let path = result.path().unwrap();
        for dead_end in solver.popped() {
            assert!(!path.contains(dead_end));
        }
    }

    #[test]
    fn test_step_by_step() {
        let grid = create_dead_end_grid();
        let mut solver = Solver::new(&grid);

        assert_eq!(solver.path(), &[p(0, 0)]);

        // down into the dead end
        assert_eq!(solver.step(), &SolverState::Searching);
        assert_eq!(solver.path(), &[p(0, 0), p(1, 0)]);

        // back out of it
        assert_eq!(solver.step(), &SolverState::Searching);
        assert_eq!(solver.path(), &[p(0, 0)]);

        solver.step();
        solver.step();
        assert_eq!(solver.path(), &[p(0, 0), p(0, 1), p(0, 2)]);

        assert!(matches!(solver.step(), SolverState::Solved(_)));
        // further steps keep the terminal state
        assert!(matches!(solver.step(), SolverState::Solved(_)));
        assert_eq!(solver.path().len(), 3);
    }

    #[test]
    fn test_deterministic() {
        let grid = load("4,3\n0,2\n3,0\n_7__\n|*|*\n**7|\n").unwrap();

        let first = solve(&grid);
        assert!(first.is_solved());
        assert_eq!(first, solve(&grid));
    }

    #[test]
    fn test_path_is_connected() {
        let grid = load("4,3\n0,2\n3,0\n_7__\n|*|*\n**7|\n").unwrap();
        let result = solve(&grid);
        let path = result.path().unwrap();

        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.finish()));
        for pair in path.windows(2) {
            assert!(grid
                .neighbours_of(pair[0])
                .any(|(_, neighbour)| neighbour == pair[1]));
        }
    }
}
