//! The pipeline module runs the forward transform across many blocks at once.
//!
//! One reader thread splits the input into sequentially numbered blocks and
//! feeds a bounded work queue. A pool of worker threads pops blocks, runs the
//! transform, and delivers results to a windowed reorder buffer. A single
//! writer thread drains the buffer, which releases results strictly in block
//! order no matter what order the workers finish in.
//!
//! - work_queue: blocking FIFO between the reader and the worker pool.
//! - reorder_buffer: circular window that restores block order.
//! - orchestrator: wires reader, workers, and writer together, plus the
//!   file-level entry points for both directions.
//!
pub mod orchestrator;
pub mod reorder_buffer;
pub mod work_queue;
