mod format;

pub use format::{ensure_output_dir, save_png};
