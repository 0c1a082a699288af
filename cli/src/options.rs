//! Parsing Options.
//! `maze <FILE> [--solve] [--json] [--png <OUT>] [--cell-size <PX>]`

use std::{ffi::OsString, path::PathBuf};

use clap::{value_parser, Arg, ArgAction, Command};

use crate::raster::RenderOptions;

fn make_options_parser() -> Command {
    Command::new("maze")
        .about("Prints a maze file and optionally solves it")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("maze")
                .value_name("FILE")
                .help("The maze file to load")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("solve")
                .long("solve")
                .help("Solve the maze and print the path")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the maze, or the solve result with --solve, as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("png")
                .long("png")
                .value_name("OUT")
                .help("Also write a PNG rendering of the maze to OUT")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("cell-size")
                .long("cell-size")
                .value_name("PX")
                .help("Size of one cell in the PNG rendering")
                .value_parser(value_parser!(u32).range(3..=256))
                .default_value("16"),
        )
}

#[derive(Debug)]
pub struct Options {
    pub maze: PathBuf,
    pub solve: bool,
    pub json: bool,
    pub png: Option<PathBuf>,
    pub render: RenderOptions,
}

impl Options {
    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = make_options_parser().try_get_matches_from(args)?;

        let maze = matches
            .get_one::<PathBuf>("maze")
            .cloned()
            .unwrap_or_default();
        let cell_size = matches
            .get_one::<u32>("cell-size")
            .copied()
            .unwrap_or(RenderOptions::default().cell_size);

        Ok(Options {
            maze,
            solve: matches.get_flag("solve"),
            json: matches.get_flag("json"),
            png: matches.get_one::<PathBuf>("png").cloned(),
            render: RenderOptions { cell_size },
        })
    }
}
