use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::types::{CompressConfig, SheetcutConfig};
use crate::cli::{CompressionLevel, GridLayout};

/// A loaded configuration file with its associated directory.
///
/// The output directory in the config is relative to the config file
/// location, so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: SheetcutConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: SheetcutConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Resolve the output directory relative to the config file directory.
    pub fn resolve_output_dir(&self) -> Option<PathBuf> {
        self.config
            .output_dir
            .as_ref()
            .map(|dir| self.config_dir.join(dir))
    }

    /// Parse the configured grid layout, if any.
    pub fn grid(&self) -> Result<Option<GridLayout>> {
        self.config
            .grid
            .as_deref()
            .map(|s| {
                s.parse::<GridLayout>()
                    .map_err(|e| anyhow!("{} in config file", e))
            })
            .transpose()
    }

    /// Parse the configured compression level, if any.
    pub fn compress(&self) -> Result<Option<CompressionLevel>> {
        match &self.config.compress {
            None => Ok(None),
            Some(CompressConfig::Level(n)) if *n <= 6 => Ok(Some(CompressionLevel::Level(*n))),
            Some(CompressConfig::Max(s)) if s.eq_ignore_ascii_case("max") => {
                Ok(Some(CompressionLevel::Max))
            }
            Some(CompressConfig::Level(n)) => Err(anyhow!(
                "unknown compress value {} in config file. Valid values: 0-6, \"max\"",
                n
            )),
            Some(CompressConfig::Max(s)) => Err(anyhow!(
                "unknown compress value \"{}\" in config file. Valid values: 0-6, \"max\"",
                s
            )),
        }
    }
}
