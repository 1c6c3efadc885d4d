//! Parallel processing of input lines.
//!
//! Lines are collected into batches; each batch is split into one chunk per
//! thread and the results are written back in input order.

use std::io::{BufRead, BufWriter, Write};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use indicatif::ProgressBar;
use log::error;

use kpop_name_parser::batch::{process_line, BatchContext, LineRecord};

use crate::Stats;

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub num_threads: usize,
    /// Lines per batch
    pub batch_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self {
            num_threads: cpus,
            batch_size: 1000,
        }
    }
}

/// Write one record and update the counters; true once `limit` is reached
pub fn write_record<W: Write>(
    writer: &mut BufWriter<W>,
    stats: &mut Stats,
    record: &LineRecord,
    limit: Option<usize>,
) -> std::io::Result<bool> {
    stats.lines_processed += 1;
    if record.is_ok() {
        stats.parsed += 1;
    } else {
        stats.failed += 1;
    }
    let json = serde_json::to_string(record)?;
    writeln!(writer, "{}", json)?;
    stats.records_written += 1;
    Ok(limit.is_some_and(|l| stats.records_written >= l))
}

/// Batch-parallel processing using std::thread
pub fn process_batch_parallel<W: Write>(
    reader: impl BufRead,
    writer: &mut BufWriter<W>,
    ctx: &BatchContext,
    config: &ParallelConfig,
    limit: Option<usize>,
    pb: &ProgressBar,
) -> std::io::Result<Stats> {
    let start_time = Instant::now();
    let mut stats = Stats::default();
    let mut batch: Vec<(usize, String)> = Vec::with_capacity(config.batch_size);

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            stats.skipped += 1;
            continue;
        }
        batch.push((i + 1, line));

        if batch.len() >= config.batch_size {
            let results = process_batch_threaded(&batch, ctx, config.num_threads);
            batch.clear();
            for record in &results {
                if write_record(writer, &mut stats, record, limit)? {
                    writer.flush()?;
                    stats.elapsed = start_time.elapsed();
                    return Ok(stats);
                }
            }
            pb.set_message(stats.progress_message(start_time));
        }
    }

    // Process remaining batch
    if !batch.is_empty() {
        let results = process_batch_threaded(&batch, ctx, config.num_threads);
        for record in &results {
            if write_record(writer, &mut stats, record, limit)? {
                break;
            }
        }
    }

    writer.flush()?;
    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

/// Process a batch of lines using multiple threads
fn process_batch_threaded(batch: &[(usize, String)], ctx: &BatchContext, num_threads: usize) -> Vec<LineRecord> {
    if batch.is_empty() {
        return vec![];
    }

    let num_threads = num_threads.min(batch.len()).max(1);
    let chunk_size = batch.len().div_ceil(num_threads);

    let handles: Vec<JoinHandle<Vec<LineRecord>>> = batch
        .chunks(chunk_size)
        .map(|chunk| {
            let chunk = chunk.to_vec();
            let ctx = ctx.clone();
            thread::spawn(move || {
                chunk
                    .into_iter()
                    .map(|(line_no, line)| process_line(&ctx, line_no, &line))
                    .collect()
            })
        })
        .collect();

    // Collect results in chunk order
    let mut results = Vec::with_capacity(batch.len());
    for handle in handles {
        match handle.join() {
            Ok(chunk_results) => results.extend(chunk_results),
            Err(_) => error!("A worker thread panicked; its lines were dropped"),
        }
    }
    results
}
