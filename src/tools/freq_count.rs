//! Byte frequency counting and delimiter discovery.
//!
//! The forward transform needs one byte value that never occurs in the
//! input. Discovery is an explicit pre-pass over the whole file: build the
//! byte histogram, take the first value with a zero count. If the input uses
//! all 256 values there is no delimiter to be had and the run fails before
//! any block is transformed.

use std::io::Read;

use rayon::prelude::*;

use crate::error::{Result, TransformError};

/// Chunk size for streaming the pre-pass scan.
const SCAN_CHUNK: usize = 1 << 20;

/// Returns a frequency count of the input data. Uses parallelism when the
/// data set is over 64k.
pub fn freqs(data: &[u8]) -> Vec<u32> {
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u32; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u32; 256],
                |s, f| s.iter().zip(&f).map(|(a, b)| a + b).collect::<Vec<u32>>(),
            )
    } else {
        let mut freqs = vec![0_u32; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    }
}

/// Scan the entire source and return the smallest byte value that never
/// occurs in it. Fails with `DelimiterExhausted` when every value occurs.
pub fn find_delimiter<R: Read>(input: &mut R) -> Result<u8> {
    let mut totals = [0_u64; 256];
    let mut buf = vec![0_u8; SCAN_CHUNK];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for (total, count) in totals.iter_mut().zip(freqs(&buf[..n])) {
            *total += count as u64;
        }
    }
    totals
        .iter()
        .position(|&total| total == 0)
        .map(|value| value as u8)
        .ok_or(TransformError::DelimiterExhausted)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts_small_input() {
        let counts = freqs(b"abbccc");
        assert_eq!(counts[b'a' as usize], 1);
        assert_eq!(counts[b'b' as usize], 2);
        assert_eq!(counts[b'c' as usize], 3);
        assert_eq!(counts.iter().sum::<u32>(), 6);
    }

    #[test]
    fn counts_large_input_in_parallel() {
        let data = vec![7_u8; 100_000];
        let counts = freqs(&data);
        assert_eq!(counts[7], 100_000);
        assert_eq!(counts.iter().sum::<u32>(), 100_000);
    }

    #[test]
    fn picks_smallest_unused_byte() {
        // 0x00 and 0x01 present, 0x02 free.
        let mut data: &[u8] = &[0, 1, 1, 0, 3];
        assert_eq!(find_delimiter(&mut data).unwrap(), 2);
    }

    #[test]
    fn empty_input_gets_byte_zero() {
        let mut data: &[u8] = &[];
        assert_eq!(find_delimiter(&mut data).unwrap(), 0);
    }

    #[test]
    fn saturated_input_is_exhausted() {
        let every_byte: Vec<u8> = (0..=255).collect();
        let mut data: &[u8] = &every_byte;
        assert!(matches!(
            find_delimiter(&mut data),
            Err(TransformError::DelimiterExhausted)
        ));
    }
}
