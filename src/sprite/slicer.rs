use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{DynamicImage, GenericImageView, RgbaImage};
use log::{debug, info};

use super::loader::load_image;
use super::rect::{FrameRect, Span};
use crate::cli::{CompressionLevel, GridLayout};
use crate::error::SheetError;
use crate::output::{ensure_output_dir, save_png};

/// Regions must be strictly larger than this on both axes to count as a frame
pub const DEFAULT_MIN_SIZE: u32 = 5;

#[derive(Debug, Clone, Copy)]
pub struct SliceOptions {
    /// Exclusive lower bound on detected frame width and height
    pub min_size: u32,
    /// Cut a fixed grid instead of detecting frames
    pub grid: Option<GridLayout>,
    /// Treat a source without alpha as opaque rather than transparent
    pub opaque_fallback: bool,
    pub compress: Option<CompressionLevel>,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            grid: None,
            opaque_fallback: false,
            compress: None,
        }
    }
}

/// Cut a sprite sheet into `{base_name}_{N}.png` files in `output_dir`.
///
/// Frames are numbered from 1 in row-major order. Returns the written paths;
/// a fully transparent sheet writes nothing.
pub fn slice_sheet(
    sheet_path: &Path,
    output_dir: &Path,
    base_name: &str,
    options: &SliceOptions,
) -> Result<Vec<PathBuf>> {
    let sheet = load_image(sheet_path)?;
    let (width, height) = sheet.dimensions();
    debug!("Loaded sheet {} ({}x{})", sheet_path.display(), width, height);

    let frames = match options.grid {
        Some(grid) => grid_frames(width, height, grid)?,
        None => {
            let alpha = alpha_view(&sheet, options.opaque_fallback);
            detect_frames(&alpha, options.min_size)
        }
    };
    debug!("Found {} frames", frames.len());

    ensure_output_dir(output_dir)?;
    write_frames(&sheet, &frames, output_dir, base_name, options.compress)
}

/// Crop each frame out of `sheet` and save it, numbering from 1.
pub fn write_frames(
    sheet: &DynamicImage,
    frames: &[FrameRect],
    output_dir: &Path,
    base_name: &str,
    compress: Option<CompressionLevel>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(frames.len());

    for (i, frame) in frames.iter().enumerate() {
        let path = output_dir.join(format!("{}_{}.png", base_name, i + 1));
        let cropped = sheet.crop_imm(frame.x, frame.y, frame.width, frame.height);

        save_png(&cropped, &path, compress)?;
        info!("Saved {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// RGBA copy of `sheet` used for occupancy detection.
///
/// Sources without an alpha channel get a synthesized one: fully transparent
/// by default, fully opaque with `opaque_fallback`.
pub fn alpha_view(sheet: &DynamicImage, opaque_fallback: bool) -> RgbaImage {
    let mut rgba = sheet.to_rgba8();
    if !sheet.color().has_alpha() {
        let alpha = if opaque_fallback { u8::MAX } else { 0 };
        for pixel in rgba.pixels_mut() {
            pixel[3] = alpha;
        }
    }
    rgba
}

/// Count non-transparent pixels per row and per column.
///
/// Returns `(rows, cols)` with `rows.len() == height` and `cols.len() == width`.
pub fn occupancy_projections(image: &RgbaImage) -> (Vec<u32>, Vec<u32>) {
    let (width, height) = image.dimensions();
    let mut rows = vec![0u32; height as usize];
    let mut cols = vec![0u32; width as usize];

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            rows[y as usize] += 1;
            cols[x as usize] += 1;
        }
    }

    (rows, cols)
}

/// Split a projection into maximal runs of positive values.
///
/// Runs are returned in ascending order as half-open spans; a run still open
/// at the end of the sequence is closed at its length.
pub fn find_intervals(projection: &[u32]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &count) in projection.iter().enumerate() {
        match (count > 0, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push(span(s, i));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        spans.push(span(s, projection.len()));
    }

    spans
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "indices are bounded by u32 image dimensions"
)]
fn span(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}

/// Detect frame boxes in a sprite sheet.
///
/// Every row run is paired with every column run (rows outer, columns inner)
/// and boxes not larger than `min_size` on both axes are dropped. Frames that
/// do not share row and column bands can yield empty or merged boxes; no
/// connected-component analysis is attempted.
pub fn detect_frames(image: &RgbaImage, min_size: u32) -> Vec<FrameRect> {
    let (rows, cols) = occupancy_projections(image);
    let row_spans = find_intervals(&rows);
    let col_spans = find_intervals(&cols);
    debug!(
        "{} row runs, {} column runs",
        row_spans.len(),
        col_spans.len()
    );

    let mut frames = Vec::new();
    for row in &row_spans {
        for col in &col_spans {
            if row.len() > min_size && col.len() > min_size {
                frames.push(FrameRect::from_spans(*row, *col));
            } else {
                debug!(
                    "Skipping {}x{} fragment at ({}, {})",
                    col.len(),
                    row.len(),
                    col.start,
                    row.start
                );
            }
        }
    }

    frames
}

/// Equal cells of a `COLSxROWS` grid in row-major order.
///
/// Remainder pixels on the right and bottom edges are not covered.
pub fn grid_frames(width: u32, height: u32, grid: GridLayout) -> Result<Vec<FrameRect>> {
    let cell_w = width / grid.cols;
    let cell_h = height / grid.rows;

    if cell_w == 0 || cell_h == 0 {
        return Err(SheetError::GridTooLarge {
            cols: grid.cols,
            rows: grid.rows,
            width,
            height,
        }
        .into());
    }

    let mut frames = Vec::with_capacity(grid.cols as usize * grid.rows as usize);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            frames.push(FrameRect::new(col * cell_w, row * cell_h, cell_w, cell_h));
        }
    }

    Ok(frames)
}
