//! Decompress command implementation.

use super::TransformOptions;
use crate::utils::{confirm_overwrite, create_spinner};
use huffpack_codec::decompress_file;
use std::path::Path;

pub fn cmd_decompress(
    source: &Path,
    dest: &Path,
    options: &TransformOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    confirm_overwrite(dest, options.force)?;

    let config = options.codec_config();
    let spinner = create_spinner(
        format!("Decompressing {} ({})", source.display(), config.format),
        options.progress,
    );
    let result = decompress_file(source, dest, &config);
    spinner.finish_and_clear();
    let stats = result?;

    println!(
        "Decompressed {} -> {}: {} bytes written",
        source.display(),
        dest.display(),
        stats.output_bytes
    );
    Ok(())
}
