use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};
use log::debug;

use crate::error::SheetError;

/// List the PNG files directly inside `dir`, sorted by file name.
///
/// Matching is on a case-insensitive `.png` suffix; subdirectories and other
/// files are skipped.
pub fn collect_png_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(SheetError::InputNotFound(dir.to_path_buf()).into());
    }
    if !dir.is_dir() {
        return Err(SheetError::NotADirectory(dir.to_path_buf()).into());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_file() && is_png(&path) {
            paths.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn is_png(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".png"))
        .unwrap_or(false)
}

/// Decode an image, sniffing the format from its contents.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(SheetError::InputNotFound(path.to_path_buf()).into());
    }

    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| SheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(img)
}
