//! End-to-end tests for the file entry points: transform a file, restore it,
//! compare. Everything runs inside a temp directory.

use std::fs;

use rand::{Rng, SeedableRng};

use parbwt::error::TransformError;
use parbwt::pipeline::orchestrator::{decode_file, encode_file};

fn roundtrip(contents: &[u8], block_size: usize, threads: usize) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.bin");
    let transformed = dir.path().join("input.bwt");
    let restored = dir.path().join("restored.bin");

    fs::write(&input, contents).unwrap();
    encode_file(&input, &transformed, block_size, threads).unwrap();
    decode_file(&transformed, &restored, block_size).unwrap();

    assert_eq!(fs::read(&restored).unwrap(), contents);
}

#[test]
fn text_file_roundtrip() {
    let contents = b"If Peter Piper picked a peck of pickled peppers, \
                     where's the peck of pickled peppers Peter Piper picked?"
        .repeat(40);
    roundtrip(&contents, 256, 4);
}

#[test]
fn binary_file_roundtrip() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    // 255 distinct values, leaving one free for the delimiter.
    let contents: Vec<u8> = (0..50_000).map(|_| rng.gen_range(0..255)).collect();
    roundtrip(&contents, 1024, 0);
}

#[test]
fn single_short_block_roundtrip() {
    roundtrip(b"tiny", 4096, 2);
}

#[test]
fn empty_file_roundtrip() {
    roundtrip(b"", 64, 2);
}

#[test]
fn framing_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let transformed = dir.path().join("input.bwt");

    // Ten bytes at block size 4 makes blocks of 4, 4, 2.
    fs::write(&input, b"aaaabbbbcc").unwrap();
    encode_file(&input, &transformed, 4, 1).unwrap();

    let out = fs::read(&transformed).unwrap();
    // One delimiter header byte plus (len + 1) per block.
    assert_eq!(out.len(), 1 + 5 + 5 + 3);
    let delimiter = out[0];
    // 'a' through 'c' are in use, so discovery settles on 0x00.
    assert_eq!(delimiter, 0x00);
    for chunk in out[1..].chunks(5) {
        assert_eq!(
            chunk.iter().filter(|&&b| b == delimiter).count(),
            1,
            "each transformed chunk carries exactly one delimiter"
        );
    }
}

#[test]
fn saturated_input_fails_before_writing_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("saturated.bin");
    let transformed = dir.path().join("saturated.bwt");

    // Every one of the 256 byte values occurs: no delimiter exists.
    let contents: Vec<u8> = (0..=255).cycle().take(4096).collect();
    fs::write(&input, contents).unwrap();

    match encode_file(&input, &transformed, 64, 2) {
        Err(TransformError::DelimiterExhausted) => {}
        other => panic!("expected DelimiterExhausted, got {:?}", other.err()),
    }
    // The pre-pass failed, so no output frame was started.
    assert!(!transformed.exists());
}

#[test]
fn corrupt_file_fails_to_decode() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let transformed = dir.path().join("input.bwt");
    let restored = dir.path().join("restored.txt");

    fs::write(&input, b"some ordinary content".repeat(10)).unwrap();
    encode_file(&input, &transformed, 32, 2).unwrap();

    // Flip a delimiter byte inside the first block to duplicate another byte.
    let mut bytes = fs::read(&transformed).unwrap();
    let delimiter = bytes[0];
    let hit = bytes[1..]
        .iter()
        .position(|&b| b == delimiter)
        .expect("transformed block contains the delimiter")
        + 1;
    bytes[hit] = bytes[hit].wrapping_add(1);
    fs::write(&transformed, &bytes).unwrap();

    assert!(matches!(
        decode_file(&transformed, &restored, 32),
        Err(TransformError::DecodeCorruption(0))
    ));
}

#[test]
fn wrong_block_size_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let transformed = dir.path().join("input.bwt");
    let restored = dir.path().join("restored.txt");

    // One 64-byte block transforms into a single 65-byte chunk holding one
    // delimiter. Re-chunking it as 33 + 32 leaves one piece with none.
    fs::write(&input, vec![b'q'; 32].into_iter().chain(vec![b'r'; 32]).collect::<Vec<u8>>())
        .unwrap();
    encode_file(&input, &transformed, 64, 2).unwrap();

    let result = decode_file(&transformed, &restored, 32);
    assert!(result.is_err());
}
