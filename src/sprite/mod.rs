mod loader;
mod mirror;
mod rect;
mod slicer;

pub use loader::{collect_png_paths, load_image};
pub use mirror::{MirrorOptions, default_mirror_output, mirror_directory, mirror_image};
pub use rect::{FrameRect, Span};
pub use slicer::{
    DEFAULT_MIN_SIZE, SliceOptions, alpha_view, detect_frames, find_intervals, grid_frames,
    occupancy_projections, slice_sheet, write_frames,
};
