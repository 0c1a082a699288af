//! Loading and solving of text encoded mazes.
//!
//! A maze file stores the top and right wall of every cell, see [`load`] for the format. A
//! loaded [`Grid`] is immutable and can be solved any number of times with [`solve`] or stepped
//! through with a [`Solver`].

pub mod cell;
pub mod grid;
pub mod load;
pub mod solve;
pub mod storage;

pub use cell::{walls_at, Descriptor, Walls};
pub use grid::{Direction, Grid, Point};
pub use load::{load, load_file, FormatError, LoadError};
pub use solve::{solve, SolveResult, Solution, Solver, SolverState};
pub use storage::CellStorage;
