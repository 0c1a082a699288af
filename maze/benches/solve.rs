use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maze::{load, solve, Grid, SolveResult};

/// A maze without inner walls, the solver sweeps it column by column.
fn open_maze(size: usize) -> Grid {
    let mut text = format!("{size},{size}\n0,0\n{last},{last}\n", last = size - 1);
    for _ in 0..size {
        text.push_str(&"*".repeat(size));
        text.push('\n');
    }
    load(&text).unwrap()
}

/// A single corridor winding left and right through every row.
fn serpentine_maze(size: usize) -> Grid {
    let last = size - 1;
    let finish_col = if size % 2 == 0 { 0 } else { last };
    let mut text = format!("{size},{size}\n0,0\n{finish_col},{last}\n");

    for row in 0..size {
        for col in 0..size {
            // the gap to the row above is on the right for odd rows and on the left for even ones
            let gap = if row % 2 == 1 { last } else { 0 };
            let top = row == 0 || col != gap;
            let right = col == last;
            text.push(maze::Descriptor::from_walls(top, right).as_char());
        }
        text.push('\n');
    }
    load(&text).unwrap()
}

fn bench_maze(c: &mut Criterion, name: &str, grid: Grid) {
    c.bench_function(name, |b| {
        b.iter(|| {
            let res = solve(black_box(&grid));
            assert!(matches!(res, SolveResult::Solved(_)));
        })
    });
}

pub fn open_small(c: &mut Criterion) {
    bench_maze(c, "open_32", open_maze(32));
}

pub fn open_large(c: &mut Criterion) {
    bench_maze(c, "open_256", open_maze(256));
}

pub fn serpentine(c: &mut Criterion) {
    bench_maze(c, "serpentine_128", serpentine_maze(128));
}

criterion_group!(benches, open_small, open_large, serpentine);
criterion_main!(benches);
