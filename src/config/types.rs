use serde::Deserialize;

/// PNG compression level configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Sheetcut configuration file structure.
///
/// `output_dir` is relative to the config file location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetcutConfig {
    /// Output directory for written frames
    pub output_dir: Option<String>,
    /// Base name for sliced frames (frame_1.png, frame_2.png, ...)
    pub base_name: String,
    /// Detected regions must be strictly larger than this on both axes
    pub min_size: u32,
    /// Fixed grid ("COLSxROWS") used instead of frame detection
    pub grid: Option<String>,
    /// Treat sheets without alpha as opaque
    pub opaque_fallback: bool,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for SheetcutConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            base_name: "frame".to_string(),
            min_size: 5,
            grid: None,
            opaque_fallback: false,
            compress: None,
        }
    }
}
