use std::io::Write;

use anyhow::Context;
use log::debug;
use maze::{Grid, SolveResult};

use crate::options::Options;

mod options;
mod raster;
mod render;

/// Exit code used when the maze loaded fine but has no path from start to finish.
const EXIT_UNSOLVABLE: i32 = 2;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = match Options::parse_from(std::env::args_os()) {
        Ok(options) => options,
        Err(e) => e.exit(),
    };
    debug!("options: {:?}", options);

    let stdout = std::io::stdout();
    let result = run(&options, &mut stdout.lock())?;

    if matches!(result, Some(SolveResult::Unsolvable)) {
        std::process::exit(EXIT_UNSOLVABLE);
    }
    Ok(())
}

/// Loads the maze, prints it and solves it if asked to. Returns the solve result when `--solve`
/// was given.
fn run(options: &Options, out: &mut impl Write) -> anyhow::Result<Option<SolveResult>> {
    let grid = maze::load_file(&options.maze)
        .with_context(|| format!("failed to load maze {}", options.maze.display()))?;

    if !options.solve {
        if options.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&grid)?)?;
        } else {
            write!(out, "{}", render::render(&grid, None))?;
        }
        write_png(options, &grid, None)?;
        return Ok(None);
    }

    let result = maze::solve(&grid);
    debug!("solve result: {:?}", result);

    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        writeln!(out, "Original maze:")?;
        write!(out, "{}", render::render(&grid, None))?;

        match &result {
            SolveResult::Solved(solution) => {
                writeln!(out, "Solution:")?;
                write!(out, "{}", render::render(&grid, Some(solution.path.as_slice())))?;
            }
            SolveResult::Unsolvable => writeln!(out, "Sorry, the maze is unsolvable.")?,
        }
    }
    write_png(options, &grid, result.path())?;

    Ok(Some(result))
}

fn write_png(
    options: &Options,
    grid: &Grid,
    path: Option<&[maze::Point]>,
) -> anyhow::Result<()> {
    if let Some(png) = &options.png {
        debug!("writing {}", png.display());
        let img = raster::render(grid, path, &options.render)?;
        raster::save(&img, png)?;
    }
    Ok(())
}
