pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod sprite;

pub use cli::{CliArgs, Command, CommonArgs, CompressionLevel, GridLayout};
pub use error::SheetError;
pub use sprite::{FrameRect, MirrorOptions, SliceOptions, Span, mirror_directory, slice_sheet};
