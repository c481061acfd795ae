use rayon::prelude::*;
use thiserror::Error;

use rasterwarp_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the rows of an image are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Checks the strategy can run, without building any thread pool.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }
}

/// Apply a function to every row of the image together with its row index.
///
/// Each row slice holds `cols * C` elements and is handed to exactly one call of `f`.
///
/// # Arguments
///
/// * `dst` - The image whose rows are visited.
/// * `strategy` - How to schedule the rows.
/// * `f` - The function receiving the row index and the mutable row data.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError>
where
    T: Send,
{
    strategy.validate()?;

    let row_stride = dst.cols() * C;
    if row_stride == 0 {
        return Ok(());
    }

    let dst_slice = dst.as_slice_mut();

    match strategy {
        ExecutionStrategy::Serial => {
            dst_slice
                .chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst_slice
                .par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst_slice
                    .par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(|(y, row)| f(y, row));
            });
        }
    }

    Ok(())
}
