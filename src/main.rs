use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use sheetcut::cli::{CliArgs, Command};
use sheetcut::config::{load_optional, merge_mirror, merge_slice};
use sheetcut::sprite::{mirror_directory, slice_sheet};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let loaded_config = load_optional(cli.command.common())?;

    env_logger::Builder::new()
        .filter_level(if cli.command.common().verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    debug!("Sheetcut v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Mirror(args) => {
            let settings = merge_mirror(args, loaded_config.as_ref())?;
            let written = mirror_directory(&args.input, &settings.output, &settings.options)
                .with_context(|| format!("failed to mirror frames in {}", args.input.display()))?;
            debug!(
                "Mirrored {} frames into {}",
                written.len(),
                settings.output.display()
            );
        }
        Command::Slice(args) => {
            let settings = merge_slice(args, loaded_config.as_ref())?;
            let written = slice_sheet(
                &args.sheet,
                &settings.output,
                &settings.base_name,
                &settings.options,
            )
            .with_context(|| format!("failed to slice {}", args.sheet.display()))?;
            debug!("Wrote {} frames", written.len());
        }
    }

    Ok(())
}
