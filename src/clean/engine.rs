use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use log::{debug, info, warn};

use super::normalizer::{Cleaner, Normalizer};
use super::options::Configuration;
use crate::error::{HarnessError, Result};

/// Upper bound on worker threads per available CPU. Requests above
/// `cpus * MAX_WORKERS_PER_CPU` are clamped.
pub const MAX_WORKERS_PER_CPU: usize = 4;

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

/// Split `0..len` into `parts` contiguous ranges whose sizes differ by at most
/// one. The first `len % parts` ranges carry the extra element. Concatenating
/// the ranges in order reproduces `0..len`.
///
/// `parts` is clamped to `1..=len` so no range is empty unless `len` is 0.
pub fn partition_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let parts = parts.clamp(1, len);
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Worker count to use: the requested one, or one per available CPU.
pub fn effective_workers(requested: Option<usize>) -> Result<usize> {
    match requested {
        Some(0) => Err(HarnessError::Configuration(
            "worker count must be at least 1".into(),
        )),
        Some(n) => Ok(n),
        None => Ok(thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)),
    }
}

// ---------------------------------------------------------------------------
// Fan-out / fan-in
// ---------------------------------------------------------------------------

/// Clean every review across `workers` threads (default: one per CPU).
///
/// Each thread builds its own [`Normalizer`] from `config`; nothing mutable is
/// shared while cleaning. Output index `i` is the cleaned form of input `i`.
pub fn clean_all(
    reviews: &[String],
    config: &Configuration,
    workers: Option<usize>,
) -> Result<Vec<String>> {
    let workers = effective_workers(workers)?;
    clean_partitioned_with(reviews, workers, || Normalizer::new(config))
}

/// Single-threaded path. Produces exactly what [`clean_all`] produces.
pub fn clean_sequential(reviews: &[String], config: &Configuration) -> Result<Vec<String>> {
    let normalizer = Normalizer::new(config)?;
    clean_partition(0, 0, reviews, &normalizer)
}

/// Generic engine: split `reviews` into `workers` partitions, build one
/// cleaner per partition with `build`, run the partitions on scoped threads
/// and concatenate their results by partition index.
///
/// `workers` is clamped to the row count and to
/// `available_parallelism() * MAX_WORKERS_PER_CPU`. A thread the OS refuses
/// to create surfaces as a [`HarnessError::Cleaning`] for that partition.
///
/// The first failing partition (lowest index) determines the returned error.
pub fn clean_partitioned_with<C, B>(
    reviews: &[String],
    workers: usize,
    build: B,
) -> Result<Vec<String>>
where
    C: Cleaner,
    B: Fn() -> Result<C> + Sync,
{
    if workers == 0 {
        return Err(HarnessError::Configuration(
            "worker count must be at least 1".into(),
        ));
    }
    let ranges = partition_ranges(reviews.len(), worker_cap(workers, reviews.len()));
    if ranges.is_empty() {
        return Ok(Vec::new());
    }
    info!(
        "Cleaning {} reviews in {} partition(s)",
        reviews.len(),
        ranges.len()
    );

    let build = &build;
    let partials: Vec<Result<Vec<String>>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .iter()
            .enumerate()
            .map(|(partition, range)| {
                let slice = &reviews[range.clone()];
                let offset = range.start;
                thread::Builder::new()
                    .name(format!("clean-{partition}"))
                    .spawn_scoped(scope, move || {
                        let cleaner = build()?;
                        clean_partition(partition, offset, slice, &cleaner)
                    })
                    .map_err(|e| HarnessError::Cleaning {
                        partition,
                        index: offset,
                        message: format!("failed to spawn worker thread: {e}"),
                    })
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(partition, spawned)| {
                spawned?.join().unwrap_or_else(|payload| {
                    Err(HarnessError::Cleaning {
                        partition,
                        index: ranges[partition].start,
                        message: panic_message(payload.as_ref()),
                    })
                })
            })
            .collect()
    });

    let mut cleaned = Vec::with_capacity(reviews.len());
    for partial in partials {
        cleaned.extend(partial?);
    }
    Ok(cleaned)
}

/// Clamp a requested worker count to the row count and the per-CPU ceiling.
fn worker_cap(requested: usize, rows: usize) -> usize {
    let cpus = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let ceiling = cpus.saturating_mul(MAX_WORKERS_PER_CPU);
    let capped = requested.min(ceiling);
    if capped < requested {
        warn!("Requested {requested} workers, capping at {ceiling} ({cpus} CPUs)");
    }
    if rows > 0 && capped > rows {
        warn!("Requested {capped} workers for {rows} reviews, using {rows}");
    }
    capped
}

/// Map `cleaner` over one partition. `offset` is the global index of the
/// first element so failures point at the original row.
fn clean_partition<C: Cleaner>(
    partition: usize,
    offset: usize,
    slice: &[String],
    cleaner: &C,
) -> Result<Vec<String>> {
    debug!(
        "Partition {partition}: rows {}..{}",
        offset,
        offset + slice.len()
    );
    slice
        .iter()
        .enumerate()
        .map(|(i, review)| {
            panic::catch_unwind(AssertUnwindSafe(|| cleaner.clean(review))).map_err(|payload| {
                HarnessError::Cleaning {
                    partition,
                    index: offset + i,
                    message: panic_message(payload.as_ref()),
                }
            })
        })
        .collect()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "cleaner panicked".to_string()
    }
}
