use std::path::PathBuf;

use anyhow::{Context, Result};

use super::LoadedConfig;
use crate::cli::{CommonArgs, CompressionLevel, MirrorArgs, SliceArgs};
use crate::sprite::{DEFAULT_MIN_SIZE, MirrorOptions, SliceOptions, default_mirror_output};

/// Resolved settings for a mirror run.
#[derive(Debug, Clone)]
pub struct MirrorSettings {
    pub output: PathBuf,
    pub options: MirrorOptions,
}

/// Resolved settings for a slice run.
#[derive(Debug, Clone)]
pub struct SliceSettings {
    pub output: PathBuf,
    pub base_name: String,
    pub options: SliceOptions,
}

/// Load the config file named on the command line, if any.
pub fn load_optional(args: &CommonArgs) -> Result<Option<LoadedConfig>> {
    args.config
        .as_ref()
        .map(|path| {
            LoadedConfig::load(path)
                .with_context(|| format!("failed to load config: {}", path.display()))
        })
        .transpose()
}

/// Merge config file values with mirror arguments.
/// CLI arguments always take precedence over config values.
pub fn merge_mirror(args: &MirrorArgs, config: Option<&LoadedConfig>) -> Result<MirrorSettings> {
    // Output directory: CLI > config > sibling of the input
    let output = args
        .common
        .output
        .clone()
        .or_else(|| config.and_then(LoadedConfig::resolve_output_dir))
        .unwrap_or_else(|| default_mirror_output(&args.input));

    Ok(MirrorSettings {
        output,
        options: MirrorOptions {
            compress: merge_compress(&args.common, config)?,
        },
    })
}

/// Merge config file values with slice arguments.
/// CLI arguments always take precedence over config values.
pub fn merge_slice(args: &SliceArgs, config: Option<&LoadedConfig>) -> Result<SliceSettings> {
    let output = args
        .common
        .output
        .clone()
        .or_else(|| config.and_then(LoadedConfig::resolve_output_dir))
        .unwrap_or_else(|| PathBuf::from("."));

    let base_name = args.name.clone().unwrap_or_else(|| {
        config
            .map(|lc| lc.config.base_name.clone())
            .unwrap_or_else(|| "frame".to_string())
    });

    let min_size = args.min_size.unwrap_or_else(|| {
        config
            .map(|lc| lc.config.min_size)
            .unwrap_or(DEFAULT_MIN_SIZE)
    });

    let grid = match args.grid {
        Some(grid) => Some(grid),
        None => config.map(LoadedConfig::grid).transpose()?.flatten(),
    };

    // Boolean flag: CLI presence sets it, otherwise use config
    let opaque_fallback =
        args.opaque_fallback || config.is_some_and(|lc| lc.config.opaque_fallback);

    Ok(SliceSettings {
        output,
        base_name,
        options: SliceOptions {
            min_size,
            grid,
            opaque_fallback,
            compress: merge_compress(&args.common, config)?,
        },
    })
}

fn merge_compress(
    args: &CommonArgs,
    config: Option<&LoadedConfig>,
) -> Result<Option<CompressionLevel>> {
    match args.compress {
        Some(level) => Ok(Some(level)),
        None => Ok(config.map(LoadedConfig::compress).transpose()?.flatten()),
    }
}
