//! Wires the reader, the worker pool, and the writer into a pipeline, and
//! exposes the file-level entry points for both directions.
//!
//! Forward direction: the reader chunks the source into numbered blocks and
//! pushes them into the work queue; each worker transforms blocks with its
//! own scratch buffers and delivers results to the reorder buffer; the writer
//! drains the buffer in block order. Shutdown is cooperative: the reader
//! closes the queue when the source is exhausted (or unreadable), the
//! orchestrator joins the workers, closes the reorder buffer, then joins the
//! writer. Output already written before a failure stays on disk.
//!
//! Inverse direction: blocks decode one at a time on the calling thread.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::{Result, TransformError};
use crate::pipeline::reorder_buffer::ReorderBuffer;
use crate::pipeline::work_queue::WorkQueue;
use crate::tools::freq_count::find_delimiter;
use crate::transform::bwt::{bwt_decode, bwt_encode};
use crate::transform::suffix_array::SuffixArrayBuilder;

/// Worker count when the OS will not say how many cores are available.
const FALLBACK_WORKERS: usize = 4;

/// How many blocks may sit in the work queue and in the reorder window per
/// worker. Two keeps every worker busy while the writer catches up without
/// letting block buffers pile up.
const DEPTH_PER_WORKER: usize = 2;

/// A block on its way from the reader to a worker.
struct RawBlock {
    seq: usize,
    data: Vec<u8>,
}

/// Resolve the worker count: 0 means one per available core.
pub fn worker_count(requested: usize) -> usize {
    if requested == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_WORKERS)
    } else {
        requested
    }
}

/// Run the forward transform over `input`, writing each transformed block to
/// `output` in block order. The caller has already chosen (and recorded) the
/// delimiter; every block it feeds through here must be free of it.
pub fn encode_stream<R, W>(
    input: R,
    output: W,
    block_size: usize,
    delimiter: u8,
    threads: usize,
) -> Result<()>
where
    R: Read + Send,
    W: Write + Send,
{
    let workers = worker_count(threads);
    let depth = workers * DEPTH_PER_WORKER;
    let queue: WorkQueue<RawBlock> = WorkQueue::new(depth);
    let reorder: ReorderBuffer<Vec<u8>> = ReorderBuffer::new(depth);
    info!("Transforming with {} workers, window of {} blocks.", workers, depth);

    let mut input = input;
    let mut output = output;

    std::thread::scope(|scope| {
        let reader = scope.spawn(|| {
            let result = read_blocks(&mut input, block_size, &queue);
            // Close in every exit path so the workers always drain and stop.
            queue.close();
            result
        });

        let mut worker_handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            worker_handles.push(scope.spawn(|| {
                // Scratch space lives for the whole worker, not per block.
                let mut builder = SuffixArrayBuilder::new();
                while let Some(block) = queue.pop() {
                    let transformed = bwt_encode(&mut builder, &block.data, delimiter);
                    reorder.put(block.seq, transformed);
                }
            }));
        }

        let writer = scope.spawn(|| -> io::Result<()> {
            while let Some(transformed) = reorder.get_next() {
                output.write_all(&transformed)?;
            }
            output.flush()
        });

        let read_result = reader
            .join()
            .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "reader panicked")));

        let mut worker_failed = false;
        for handle in worker_handles {
            if handle.join().is_err() {
                worker_failed = true;
            }
        }
        // Only now can no further block arrive; release the writer.
        reorder.close();

        let write_result = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "writer panicked")));

        read_result?;
        write_result?;
        if worker_failed {
            return Err(TransformError::WorkerFailed);
        }
        Ok(())
    })
}

/// Reader loop: chunk the source into numbered blocks. An I/O error aborts
/// the loop early; blocks already queued still flow through the pipeline.
fn read_blocks<R: Read>(
    input: &mut R,
    block_size: usize,
    queue: &WorkQueue<RawBlock>,
) -> io::Result<()> {
    let mut seq = 0;
    loop {
        let data = read_chunk(input, block_size)?;
        if data.is_empty() {
            debug!("Source exhausted after {} blocks.", seq);
            return Ok(());
        }
        queue.push(RawBlock { seq, data });
        seq += 1;
    }
}

/// Read until `len` bytes are gathered or the source ends. An empty result
/// means end of data.
fn read_chunk<R: Read>(input: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0_u8; len];
    let mut filled = 0;
    while filled < len {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}

/// Inverse-transform a stream framed by `encode_file`: the writer's chunks
/// are each `block_size + 1` bytes (the final one may be shorter). Single
/// threaded; a corrupt block aborts the whole run.
pub fn decode_stream<R, W>(input: R, output: W, block_size: usize, delimiter: u8) -> Result<()>
where
    R: Read,
    W: Write,
{
    let mut input = input;
    let mut output = output;
    let chunk_len = block_size + 1;
    let mut seq = 0;
    loop {
        let chunk = read_chunk(&mut input, chunk_len)?;
        if chunk.is_empty() {
            break;
        }
        let block = bwt_decode(&chunk, delimiter).map_err(|e| {
            debug!("Block {} failed to decode.", seq);
            e
        })?;
        output.write_all(&block)?;
        seq += 1;
    }
    output.flush()?;
    info!("Restored {} blocks.", seq);
    Ok(())
}

/// Forward-transform a whole file. Scans the file once to find an unused
/// byte value for the delimiter, writes that byte as the stream header, then
/// runs the parallel pipeline over the blocks.
pub fn encode_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    block_size: usize,
    threads: usize,
) -> Result<()> {
    let mut fin = File::open(input_path.as_ref())?;
    let delimiter = find_delimiter(&mut fin)?;
    info!("Using delimiter byte {:#04x}.", delimiter);
    fin.seek(SeekFrom::Start(0))?;

    let mut fout = BufWriter::new(File::create(output_path.as_ref())?);
    fout.write_all(&[delimiter])?;
    encode_stream(
        BufReader::new(fin),
        fout,
        block_size,
        delimiter,
        threads,
    )
}

/// Inverse-transform a whole file written by `encode_file`. The leading byte
/// names the delimiter; the rest is transformed blocks in order.
pub fn decode_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    block_size: usize,
) -> Result<()> {
    let mut fin = BufReader::new(File::open(input_path.as_ref())?);
    let fout = BufWriter::new(File::create(output_path.as_ref())?);

    let header = read_chunk(&mut fin, 1)?;
    if header.is_empty() {
        // Nothing was ever transformed; the restored file is empty too.
        return Ok(());
    }
    info!("Using delimiter byte {:#04x}.", header[0]);
    decode_stream(fin, fout, block_size, header[0])
}
