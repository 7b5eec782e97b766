//! Utility functions for the CLI.

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

/// Create a spinner with standard styling.
pub fn create_spinner(message: String, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("[{elapsed_precise}] {spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Make sure `dest` may be written.
///
/// An existing destination is only replaced with `--force` or after the user
/// confirms interactively; without a terminal the command is refused.
pub fn confirm_overwrite(dest: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !dest.exists() {
        return Ok(());
    }
    if force {
        tracing::warn!(path = %dest.display(), "replacing existing destination");
        return Ok(());
    }
    if !std::io::stdin().is_terminal() {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            dest.display()
        )
        .into());
    }

    let replace = Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", dest.display()))
        .default(false)
        .interact()?;
    if !replace {
        return Err("aborted: destination left unchanged".into());
    }
    tracing::warn!(path = %dest.display(), "replacing existing destination");
    Ok(())
}

/// Render a byte the way the code table shows it.
pub fn describe_byte(byte: u8) -> String {
    match byte {
        b'\n' => "New Line".to_string(),
        b'\r' => "CR".to_string(),
        b' ' => "Space".to_string(),
        b'\t' => "Tab".to_string(),
        _ if byte.is_ascii_graphic() => (byte as char).to_string(),
        _ => format!("\\x{:02X}", byte),
    }
}

/// Percentage of space saved, 0 for empty input.
pub fn space_savings(input_bytes: u64, output_bytes: u64) -> f64 {
    if input_bytes == 0 {
        0.0
    } else {
        (1.0 - output_bytes as f64 / input_bytes as f64) * 100.0
    }
}
