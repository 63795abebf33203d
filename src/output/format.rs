use std::borrow::Cow;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::{ColorType, DynamicImage, ImageFormat};

use crate::cli::CompressionLevel;
use crate::error::SheetError;

/// Save an image as PNG, optionally recompressing it with oxipng.
///
/// The file is always PNG-encoded regardless of the extension on `path`,
/// and any existing file at `path` is overwritten. Float images are
/// converted to 8 bits per channel first.
pub fn save_png(
    image: &DynamicImage,
    path: &Path,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    let mut png_data = Cursor::new(Vec::new());
    png_encodable(image)
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| SheetError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

    let output_data = if let Some(level) = compress {
        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
            SheetError::PngCompress {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?
    } else {
        png_data.into_inner()
    };

    fs::write(path, output_data).map_err(|e| SheetError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// PNG has no float channels; everything else the decoder yields is written as is.
fn png_encodable(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::Rgb32F => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        ColorType::Rgba32F => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
        _ => Cow::Borrowed(image),
    }
}

/// Create `dir` (and any missing parents) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| SheetError::OutputWrite {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn checker(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            if (x + y) % 2 == 0 {
                *pixel = Rgba([255, 255, 255, 255]);
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_save_png_uncompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = checker(8, 4);

        save_png(&img, &path, None).unwrap();

        let loaded = image::open(&path).unwrap().into_rgba8();
        assert_eq!(loaded, img.into_rgba8());
    }

    #[test]
    fn test_save_png_compressed_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = checker(16, 16);

        save_png(&img, &path, Some(CompressionLevel::Level(1))).unwrap();

        let loaded = image::open(&path).unwrap().into_rgba8();
        assert_eq!(loaded, img.into_rgba8());
    }

    #[test]
    fn test_save_png_uppercase_extension_still_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("OUT.PNG");

        save_png(&checker(2, 2), &path, None).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_save_png_converts_float_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hdr.png");
        let img = DynamicImage::ImageRgba32F(image::Rgba32FImage::from_pixel(
            3,
            2,
            Rgba([1.0, 0.0, 1.0, 1.0]),
        ));

        save_png(&img, &path, None).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.color(), ColorType::Rgba8);
        assert_eq!(loaded.into_rgba8().get_pixel(2, 1), &Rgba([255, 0, 255, 255]));
    }

    #[test]
    fn test_png_encodable_keeps_integer_types() {
        let img = checker(2, 2);

        assert!(matches!(png_encodable(&img), Cow::Borrowed(_)));
    }

    #[test]
    fn test_ensure_output_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_output_dir(&nested).unwrap();
        // Second call on an existing directory is a no-op
        ensure_output_dir(&nested).unwrap();

        assert!(nested.is_dir());
    }
}
