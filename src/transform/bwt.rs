//! Forward and inverse Burrows-Wheeler transform of a single block.
//!
//! The forward side appends the delimiter to the block, suffix-sorts the
//! result, and emits the byte before each suffix start. Because the delimiter
//! occurs exactly once and terminates the string, suffix order and rotation
//! order coincide, so no rotation is ever materialized.
//!
//! The inverse side rebuilds the block with the LF-mapping: one scan derives
//! the occurrence table, a 256-entry cumulative table gives each byte's first
//! row, and n-1 hops walk the original string backwards from the delimiter
//! row.

use crate::error::{Result, TransformError};
use crate::transform::suffix_array::SuffixArrayBuilder;

/// Forward transform of one block. `delimiter` must not occur in `block`;
/// the caller guarantees that and a violation is not detected here, it just
/// produces output that will not decode. Output length is `block.len() + 1`.
pub fn bwt_encode(builder: &mut SuffixArrayBuilder, block: &[u8], delimiter: u8) -> Vec<u8> {
    let mut s = Vec::with_capacity(block.len() + 1);
    s.extend_from_slice(block);
    s.push(delimiter);

    let sa = builder.build(&s);
    let n = s.len();

    let mut bwt = Vec::with_capacity(n);
    for &start in sa.iter() {
        if start == 0 {
            bwt.push(s[n - 1]);
        } else {
            bwt.push(s[start - 1]);
        }
    }
    bwt
}

/// Inverse transform of one block. `bwt` must contain `delimiter` exactly
/// once; anything else means the stream is corrupt (or was encoded with a
/// different delimiter) and fails with `DecodeCorruption`.
pub fn bwt_decode(bwt: &[u8], delimiter: u8) -> Result<Vec<u8>> {
    let n = bwt.len();

    // occ[i] counts earlier occurrences of bwt[i]; totals ends up with the
    // full per-byte histogram. The delimiter row falls out of the same scan.
    let mut occ = vec![0_usize; n];
    let mut totals = [0_usize; 256];
    let mut delimiter_row = 0;
    for (i, &b) in bwt.iter().enumerate() {
        occ[i] = totals[b as usize];
        totals[b as usize] += 1;
        if b == delimiter {
            delimiter_row = i;
        }
    }

    if totals[delimiter as usize] != 1 {
        return Err(TransformError::DecodeCorruption(totals[delimiter as usize]));
    }

    // first[c] = how many bytes in the block sort strictly before c.
    let mut first = [0_usize; 256];
    let mut sum = 0;
    for (c, &count) in totals.iter().enumerate() {
        first[c] = sum;
        sum += count;
    }

    // Walk the LF-mapping backwards starting at the row that carries the
    // delimiter (the row of the unrotated string). The delimiter itself is
    // never emitted, hence n-1 steps.
    let mut row = delimiter_row;
    let mut block = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        row = first[bwt[row] as usize] + occ[row];
        block.push(bwt[row]);
    }
    block.reverse();
    Ok(block)
}
