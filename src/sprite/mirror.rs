use std::path::{Path, PathBuf};

use anyhow::Result;
use image::DynamicImage;
use log::info;

use super::loader::{collect_png_paths, load_image};
use crate::cli::CompressionLevel;
use crate::output::{ensure_output_dir, save_png};

#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorOptions {
    pub compress: Option<CompressionLevel>,
}

/// Flip an image left-to-right, keeping its color type
pub fn mirror_image(image: &DynamicImage) -> DynamicImage {
    image.fliph()
}

/// Default output directory for mirrored frames: a `_mirrored` sibling of
/// `input_dir`.
pub fn default_mirror_output(input_dir: &Path) -> PathBuf {
    match input_dir.file_name() {
        Some(name) => input_dir.with_file_name(format!("{}_mirrored", name.to_string_lossy())),
        None => input_dir.join("mirrored"),
    }
}

/// Write a horizontally mirrored copy of every PNG in `input_dir` to
/// `output_dir` under the same file name.
///
/// Files are processed in sorted name order. A failure stops the run but
/// leaves already written frames in place. Returns the written paths.
pub fn mirror_directory(
    input_dir: &Path,
    output_dir: &Path,
    options: &MirrorOptions,
) -> Result<Vec<PathBuf>> {
    let inputs = collect_png_paths(input_dir)?;
    ensure_output_dir(output_dir)?;

    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        let image = load_image(&input)?;
        let Some(file_name) = input.file_name() else {
            continue;
        };
        let output_path = output_dir.join(file_name);

        save_png(&mirror_image(&image), &output_path, options.compress)?;
        info!("Saved mirrored frame {}", output_path.display());
        written.push(output_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 20) as u8, (y * 30) as u8, 7, (100 + x) as u8]);
        }
        img
    }

    #[test]
    fn test_mirror_image_flips_columns() {
        let img = DynamicImage::ImageRgba8(gradient(4, 3));

        let mirrored = mirror_image(&img).into_rgba8();
        let source = img.into_rgba8();

        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(mirrored.get_pixel(x, y), source.get_pixel(3 - x, y));
            }
        }
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let img = DynamicImage::ImageRgba8(gradient(5, 4));

        let twice = mirror_image(&mirror_image(&img));

        assert_eq!(twice, img);
    }

    #[test]
    fn test_mirror_keeps_color_type() {
        let mut rgb = RgbImage::new(3, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        let img = DynamicImage::ImageRgb8(rgb);

        let mirrored = mirror_image(&img);

        assert_eq!(mirrored.color(), img.color());
        assert_eq!(mirrored.as_rgb8().unwrap().get_pixel(2, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_default_mirror_output() {
        assert_eq!(
            default_mirror_output(Path::new("images/player_run_right")),
            PathBuf::from("images/player_run_right_mirrored")
        );
        assert_eq!(
            default_mirror_output(Path::new("/")),
            PathBuf::from("/mirrored")
        );
    }

    #[test]
    fn test_mirror_directory_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run_right");
        let once = dir.path().join("out").join("run_left");
        let twice = dir.path().join("run_right_again");
        std::fs::create_dir(&input).unwrap();

        gradient(6, 4).save(input.join("frame_1.png")).unwrap();
        gradient(3, 7).save(input.join("frame_2.PNG")).unwrap();
        std::fs::write(input.join("readme.txt"), "skip me").unwrap();
        gradient(2, 2)
            .save_with_format(input.join("frame_3.bmp"), image::ImageFormat::Bmp)
            .unwrap();

        let written = mirror_directory(&input, &once, &MirrorOptions::default()).unwrap();
        assert_eq!(
            written,
            vec![once.join("frame_1.png"), once.join("frame_2.PNG")]
        );
        assert!(!once.join("readme.txt").exists());
        assert!(!once.join("frame_3.bmp").exists());

        let first = image::open(once.join("frame_1.png")).unwrap().into_rgba8();
        assert_eq!(first.get_pixel(0, 0), gradient(6, 4).get_pixel(5, 0));

        mirror_directory(&once, &twice, &MirrorOptions::default()).unwrap();
        for name in ["frame_1.png", "frame_2.PNG"] {
            let original = image::open(input.join(name)).unwrap();
            let restored = image::open(twice.join(name)).unwrap();
            assert_eq!(original, restored, "{} did not round-trip", name);
        }
    }

    #[test]
    fn test_mirror_directory_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        std::fs::create_dir(&input).unwrap();
        std::fs::create_dir(&output).unwrap();

        gradient(4, 4).save(input.join("a.png")).unwrap();
        std::fs::write(output.join("a.png"), b"stale").unwrap();

        mirror_directory(&input, &output, &MirrorOptions::default()).unwrap();
        mirror_directory(&input, &output, &MirrorOptions::default()).unwrap();

        let saved = image::open(output.join("a.png")).unwrap().into_rgba8();
        assert_eq!(saved.get_pixel(0, 0), gradient(4, 4).get_pixel(3, 0));
    }

    #[test]
    fn test_mirror_directory_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");

        let written = mirror_directory(dir.path(), &output, &MirrorOptions::default()).unwrap();

        assert!(written.is_empty());
        assert!(output.is_dir());
    }
}
