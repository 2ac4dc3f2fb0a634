//! The tools module provides the helpers around the core transform.
//!
//! The tools are:
//! - cli: Command line interface for parbwt.
//! - freq_count: Byte frequency count and the delimiter discovery pre-pass.
//!
pub mod cli;
pub mod freq_count;
