mod load;
mod merge;
mod types;

pub use load::LoadedConfig;
pub use merge::{MirrorSettings, SliceSettings, load_optional, merge_mirror, merge_slice};
pub use types::{CompressConfig, SheetcutConfig};
