use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};
use maze::{Grid, Point};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const WALL: Rgb<u8> = Rgb([0, 0, 0]);
const START: Rgb<u8> = Rgb([64, 192, 64]);
const FINISH: Rgb<u8> = Rgb([208, 64, 64]);
const PATH: Rgb<u8> = Rgb([64, 96, 224]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Width and height of one cell in pixels, including one of its wall lines.
    pub cell_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { cell_size: 16 }
    }
}

/// Draws the grid as an image of `columns * cell_size + 1` by `rows * cell_size + 1` pixels.
///
/// Fails when the image would not fit in `u32` pixel coordinates.
pub fn render(
    grid: &Grid,
    path: Option<&[Point]>,
    options: &RenderOptions,
) -> anyhow::Result<RgbImage> {
    let size = options.cell_size.max(3);
    let width = image_extent(grid.columns(), size)
        .with_context(|| format!("{} columns of {size}px do not fit in an image", grid.columns()))?;
    let height = image_extent(grid.rows(), size)
        .with_context(|| format!("{} rows of {size}px do not fit in an image", grid.rows()))?;
    usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h)?.checked_mul(3))
        .with_context(|| format!("a {width}x{height} image is too large"))?;

    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    fill(&mut img, grid.start(), 1, size - 1, START, size);
    fill(&mut img, grid.finish(), 1, size - 1, FINISH, size);

    // a small square in the middle of every path cell
    let mark = (size / 3).max(1);
    let offset = (size - mark) / 2;
    for &point in path.unwrap_or_default() {
        if point != grid.start() && point != grid.finish() {
            fill(&mut img, point, offset, offset + mark, PATH, size);
        }
    }

    for walls in grid.cells() {
        let x0 = walls.point.col as u32 * size;
        let y0 = walls.point.row as u32 * size;

        if walls.top {
            for x in x0..=x0 + size {
                img.put_pixel(x, y0, WALL);
            }
        }
        if walls.right {
            for y in y0..=y0 + size {
                img.put_pixel(x0 + size, y, WALL);
            }
        }
    }

    // the left and bottom edges are not stored in the maze
    for y in 0..height {
        img.put_pixel(0, y, WALL);
    }
    for x in 0..width {
        img.put_pixel(x, height - 1, WALL);
    }

    Ok(img)
}

/// Pixel length of `cells` cells of `size` pixels plus the closing wall line.
fn image_extent(cells: usize, size: u32) -> Option<u32> {
    u32::try_from(cells).ok()?.checked_mul(size)?.checked_add(1)
}

/// Fills the pixels `from..to` (relative to the cell corner) in both directions.
fn fill(img: &mut RgbImage, point: Point, from: u32, to: u32, color: Rgb<u8>, size: u32) {
    let x0 = point.col as u32 * size;
    let y0 = point.row as u32 * size;

    for y in y0 + from..y0 + to {
        for x in x0 + from..x0 + to {
            img.put_pixel(x, y, color);
        }
    }
}

pub fn save(img: &RgbImage, path: &Path) -> anyhow::Result<()> {
    img.save(path)
        .with_context(|| format!("failed to write image {}", path.display()))
}
