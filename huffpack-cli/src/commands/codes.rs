//! Codes command implementation.
//!
//! Prints, for every byte of the source, how often it occurs and the code
//! the compressor would assign to it.

use crate::utils::describe_byte;
use huffpack_codec::{FrequencyTable, HuffmanTree};
use huffpack_core::{ByteSource, FileSource};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON serializable row of the code table.
#[derive(Debug, Serialize, Deserialize)]
struct CodeJson {
    byte: u8,
    character: String,
    frequency: u64,
    code: String,
}

/// JSON output for the code table.
#[derive(Debug, Serialize, Deserialize)]
struct CodeTableJson {
    source: String,
    total_bytes: u64,
    distinct_symbols: usize,
    bit_count: u64,
    entropy_bits: f64,
    codes: Vec<CodeJson>,
}

pub fn cmd_codes(source: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = FileSource::new(source).read_all_bytes()?;
    let frequencies = FrequencyTable::from_bytes(&data);
    let table = HuffmanTree::from_frequencies(&frequencies).code_table()?;

    // Only bytes that occur; a single-symbol placeholder has no frequency
    let codes: Vec<CodeJson> = frequencies
        .iter()
        .filter_map(|(byte, frequency)| {
            table.get(byte).map(|code| CodeJson {
                byte,
                character: describe_byte(byte),
                frequency,
                code: code.to_string(),
            })
        })
        .collect();
    let bit_count = codes
        .iter()
        .map(|row| row.frequency * row.code.len() as u64)
        .sum();

    let report = CodeTableJson {
        source: source.display().to_string(),
        total_bytes: frequencies.total(),
        distinct_symbols: frequencies.distinct_symbols(),
        bit_count,
        entropy_bits: frequencies.entropy_bits(),
        codes,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{:>10}  {:<10}  {:>10}  Encoding",
        "ASCII Code", "Character", "Frequency"
    );
    println!("{}", "-".repeat(50));
    for row in &report.codes {
        println!(
            "{:>10}  {:<10}  {:>10}  {}",
            row.byte, row.character, row.frequency, row.code
        );
    }
    println!("{}", "-".repeat(50));
    println!(
        "{} bytes, {} symbols, {} bits encoded (entropy bound {:.0} bits)",
        report.total_bytes, report.distinct_symbols, report.bit_count, report.entropy_bits
    );
    if report.total_bytes > 0 {
        println!(
            "Average code length: {:.3} bits per byte",
            report.bit_count as f64 / report.total_bytes as f64
        );
    }

    Ok(())
}
