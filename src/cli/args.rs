use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sheetcut")]
#[command(version, about = "Sprite sheet slicer and frame mirroring tool", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Mirror every PNG in a directory horizontally
    Mirror(MirrorArgs),
    /// Cut a sprite sheet into individual frame files
    Slice(SliceArgs),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Mirror(args) => &args.common,
            Command::Slice(args) => &args.common,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Load settings from a .sheetcut config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MirrorArgs {
    /// Directory of PNG frames to mirror
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SliceArgs {
    /// Sprite sheet image to slice
    pub sheet: PathBuf,

    /// Base name for frame files (frame_1.png, frame_2.png, ...) [default: frame]
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Discard detected regions whose width or height is not above N pixels [default: 5]
    #[arg(long, value_name = "N")]
    pub min_size: Option<u32>,

    /// Cut a fixed COLSxROWS grid instead of detecting frames
    #[arg(long, value_name = "COLSxROWS")]
    pub grid: Option<GridLayout>,

    /// Treat images without an alpha channel as fully opaque instead of fully transparent
    #[arg(long)]
    pub opaque_fallback: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}

/// Fixed grid of equally sized cells, written as `COLSxROWS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub cols: u32,
    pub rows: u32,
}

impl std::str::FromStr for GridLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cols, rows) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("invalid grid '{}', expected COLSxROWS (e.g. 4x2)", s))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_e| format!("invalid grid '{}', expected COLSxROWS (e.g. 4x2)", s))
                .and_then(|n| {
                    if n == 0 {
                        Err(format!("grid dimensions must be non-zero, got '{}'", s))
                    } else {
                        Ok(n)
                    }
                })
        };

        Ok(GridLayout {
            cols: parse(cols)?,
            rows: parse(rows)?,
        })
    }
}
