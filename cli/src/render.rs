use maze::{Grid, Point};

const TOP_WALL: &str = "-----+";
const TOP_OPEN: &str = "     +";
const RIGHT_WALL: &str = "     |";
const RIGHT_OPEN: &str = "      ";

/// Draws the grid with `S` and `F` on the start and finish cells and `*` on every other cell of
/// `path`.
///
/// Each row of cells takes four lines of text: the top walls, then three interior lines with the
/// label on the middle one. The left and bottom edges of the maze are always closed.
pub fn render(grid: &Grid, path: Option<&[Point]>) -> String {
    let mut on_path = grid.create_storage(false);
    for point in path.unwrap_or_default() {
        on_path[*point] = true;
    }

    let mut out = String::new();
    for row in 0..grid.rows() {
        for line in 0..4 {
            out.push(if line == 0 { '+' } else { '|' });

            for col in 0..grid.columns() {
                let point = Point::new(row, col);
                let walls = grid.walls(point);

                match line {
                    0 => out.push_str(if walls.top { TOP_WALL } else { TOP_OPEN }),
                    2 => {
                        out.push_str(if point == grid.start() {
                            "  S  "
                        } else if point == grid.finish() {
                            "  F  "
                        } else if on_path[point] {
                            "  *  "
                        } else {
                            "     "
                        });
                        out.push(if walls.right { '|' } else { ' ' });
                    }
                    _ => out.push_str(if walls.right { RIGHT_WALL } else { RIGHT_OPEN }),
                }
            }
            out.push('\n');
        }
    }

    out.push('+');
    for _ in 0..grid.columns() {
        out.push_str(TOP_WALL);
    }
    out.push('\n');

    out
}
