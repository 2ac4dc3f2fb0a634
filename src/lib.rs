//! Block-oriented Burrows-Wheeler Transform with a parallel forward pipeline.
//!
//! Splits input into fixed-size blocks, applies the BWT to each block
//! independently, and writes the transformed blocks in their original order.
//! The forward direction runs on a pool of worker threads fed by a bounded
//! work queue; a windowed reorder buffer puts out-of-order results back into
//! strict block order before they reach the writer. The inverse direction is
//! single threaded, one block at a time.
//!
//! The transform itself is the classic delimiter-terminated BWT: a byte value
//! that never occurs in the input is appended to every block, the suffixes of
//! the extended block are sorted (prefix doubling with counting-sort passes),
//! and the last column of the implied rotation matrix is emitted. Decoding
//! walks the LF-mapping backwards from the delimiter row.
//!
//! Basic usage to transform a file:
//!
//! `$> parbwt big.log big.log.bwt`
//!
//! and to restore it:
//!
//! `$> parbwt -d big.log.bwt big.log.out`
//!
pub mod error;
pub mod pipeline;
pub mod tools;
pub mod transform;
