//! The transform module holds the per-block Burrows-Wheeler machinery.
//!
//! The BWT permutes a block so that bytes with similar right-context end up
//! adjacent. Sorting the suffixes is the "computationally expensive" part, so
//! it lives in its own submodule as an explicit array-of-indices algorithm
//! rather than anything that materializes rotation strings.
//!
//! - suffix_array: prefix-doubling suffix sort with counting-sort passes.
//! - bwt: the forward transform and the LF-mapping inverse.
//!
pub mod bwt;
pub mod suffix_array;
