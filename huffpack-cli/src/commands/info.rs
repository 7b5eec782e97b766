//! Info command implementation.

use huffpack_codec::{CodecConfig, Container, ContainerFormat, FORMAT_VERSION, detect_format};
use huffpack_core::{ByteSource, FileSource};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON output for a container summary.
#[derive(Debug, Serialize, Deserialize)]
struct ContainerInfoJson {
    file: String,
    format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u8>,
    size: u64,
    leaf_count: usize,
    tree_depth: usize,
    bit_count: u32,
    payload_bytes: usize,
}

impl ContainerInfoJson {
    fn new(file: &Path, size: u64, container: &Container) -> Self {
        Self {
            file: file.display().to_string(),
            format: container.format.to_string(),
            version: match container.format {
                ContainerFormat::Framed => Some(FORMAT_VERSION),
                ContainerFormat::Raw => None,
            },
            size,
            leaf_count: container.tree.leaf_count(),
            tree_depth: container.tree.depth(),
            bit_count: container.bit_count,
            payload_bytes: container.payload_len(),
        }
    }
}

pub fn cmd_info(file: &Path, raw: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = FileSource::new(file).read_all_bytes()?;
    let format = if raw {
        ContainerFormat::Raw
    } else {
        detect_format(&data)
    };
    let container = Container::parse(&data, &CodecConfig::new(format))?;
    let info = ContainerInfoJson::new(file, data.len() as u64, &container);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Container Information");
    println!("=====================");
    println!("File: {}", info.file);
    println!("Format: {}", info.format);
    if let Some(version) = info.version {
        println!("Version: {}", version);
    }
    println!("Size: {} bytes", info.size);
    println!();
    println!("Tree:");
    println!("  Leaves: {}", info.leaf_count);
    println!("  Depth: {}", info.tree_depth);
    println!();
    println!("Message:");
    println!("  Bits: {}", info.bit_count);
    println!("  Payload: {} bytes", info.payload_bytes);

    Ok(())
}
