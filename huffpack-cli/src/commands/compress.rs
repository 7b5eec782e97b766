//! Compress command implementation.

use super::TransformOptions;
use crate::utils::{confirm_overwrite, create_spinner, space_savings};
use huffpack_codec::compress_file;
use std::path::Path;

pub fn cmd_compress(
    source: &Path,
    dest: &Path,
    options: &TransformOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    confirm_overwrite(dest, options.force)?;

    let config = options.codec_config();
    let spinner = create_spinner(
        format!("Compressing {} ({})", source.display(), config.format),
        options.progress,
    );
    let result = compress_file(source, dest, &config);
    spinner.finish_and_clear();
    let stats = result?;

    println!(
        "Compressed {} -> {}: {} -> {} bytes ({:.1}% saved, {} symbols, {} bits)",
        source.display(),
        dest.display(),
        stats.input_bytes,
        stats.output_bytes,
        space_savings(stats.input_bytes, stats.output_bytes),
        stats.distinct_symbols,
        stats.bit_count
    );
    Ok(())
}
