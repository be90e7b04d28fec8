//! Parallel processing utilities

use crate::error::Result;
use rayon::prelude::*;

/// Execute a function in parallel on a collection of items with error handling.
///
/// Results keep the input order. The first error wins and the rest of the
/// batch is discarded.
pub fn parallel_process_with_errors<T, F, R>(items: Vec<T>, f: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Send + Sync,
{
    items.into_par_iter().map(f).collect()
}

/// Like [`parallel_process_with_errors`], but runs on the current thread unless `parallel` is set
pub fn process_with_errors<T, F, R>(items: Vec<T>, parallel: bool, f: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Send + Sync,
{
    if parallel {
        parallel_process_with_errors(items, f)
    } else {
        items.into_iter().map(f).collect()
    }
}
