//! File-to-file driver tests.

use huffpack_codec::{CodecConfig, HuffpackError, compress_file, decompress_file};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "huffpack_driver_test_{}_{}",
        std::process::id(),
        name
    ))
}

#[test]
fn test_file_roundtrip() {
    let src = temp_path("roundtrip.txt");
    let packed = temp_path("roundtrip.huf");
    let unpacked = temp_path("roundtrip.out");

    let text = b"Line one\nLine two\r\nLine three with more words in it\n".repeat(50);
    fs::write(&src, &text).expect("write source");

    let stats = compress_file(&src, &packed, &CodecConfig::FRAMED).expect("compress failed");
    assert_eq!(stats.input_bytes, text.len() as u64);
    assert_eq!(stats.output_bytes, fs::metadata(&packed).unwrap().len());
    assert!(stats.ratio() < 1.0);

    let back = decompress_file(&packed, &unpacked, &CodecConfig::FRAMED).expect("decompress failed");
    assert_eq!(back.output_bytes, text.len() as u64);
    assert_eq!(back.bit_count, stats.bit_count);
    assert_eq!(fs::read(&unpacked).unwrap(), text);

    let _ = fs::remove_file(&src);
    let _ = fs::remove_file(&packed);
    let _ = fs::remove_file(&unpacked);
}

#[test]
fn test_empty_file_roundtrip() {
    let src = temp_path("empty.txt");
    let packed = temp_path("empty.huf");
    let unpacked = temp_path("empty.out");
    fs::write(&src, b"").expect("write source");

    let stats = compress_file(&src, &packed, &CodecConfig::RAW).expect("compress failed");
    assert_eq!(stats.output_bytes, 6);
    assert_eq!(stats.ratio(), 0.0);

    decompress_file(&packed, &unpacked, &CodecConfig::RAW).expect("decompress failed");
    assert!(fs::read(&unpacked).unwrap().is_empty());

    let _ = fs::remove_file(&src);
    let _ = fs::remove_file(&packed);
    let _ = fs::remove_file(&unpacked);
}

#[test]
fn test_missing_source() {
    let dst = temp_path("missing.huf");
    let err = compress_file(temp_path("no_such_file"), &dst, &CodecConfig::FRAMED).unwrap_err();
    assert!(matches!(err, HuffpackError::SourceUnavailable { .. }));
    assert!(!dst.exists());
}

#[test]
fn test_corrupt_container_keeps_existing_destination() {
    let src = temp_path("corrupt.huf");
    let dst = temp_path("corrupt.out");
    fs::write(&src, b"HUFP\x01\x03\x00garbage").expect("write source");
    fs::write(&dst, b"keep me").expect("write destination");

    assert!(decompress_file(&src, &dst, &CodecConfig::FRAMED).is_err());
    assert_eq!(fs::read(&dst).unwrap(), b"keep me");

    let _ = fs::remove_file(&src);
    let _ = fs::remove_file(&dst);
}

#[test]
fn test_unwritable_destination() {
    let src = temp_path("unwritable.txt");
    fs::write(&src, b"data").expect("write source");
    let dst = temp_path("no_such_dir").join("out.huf");

    let err = compress_file(&src, &dst, &CodecConfig::FRAMED).unwrap_err();
    assert!(matches!(err, HuffpackError::SinkUnavailable { .. }));

    let _ = fs::remove_file(&src);
}

#[test]
fn test_verify_option() {
    let src = temp_path("verify.bin");
    let dst = temp_path("verify.huf");
    let data: Vec<u8> = (0..2000u32).map(|i| (i * i % 251) as u8).collect();
    fs::write(&src, &data).expect("write source");

    let config = CodecConfig::FRAMED.with_verify(true);
    let stats = compress_file(&src, &dst, &config).expect("compress failed");
    assert!(stats.distinct_symbols > 1);

    let _ = fs::remove_file(&src);
    let _ = fs::remove_file(&dst);
}
