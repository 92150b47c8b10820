//! Parallel utilities with feature-gated implementations
//!
//! Kernels call these helpers instead of rayon directly so that the crate
//! builds and produces identical results with the `parallel` feature off.
//! Every helper preserves input order in its output.

/// Check if parallel processing is available
#[cfg(feature = "parallel")]
pub fn is_parallel_available() -> bool {
    true
}

/// Check if parallel processing is available
#[cfg(not(feature = "parallel"))]
pub fn is_parallel_available() -> bool {
    false
}

/// Number of worker threads kernels would currently use
#[cfg(feature = "parallel")]
pub fn current_num_threads() -> usize {
    rayon::current_num_threads()
}

/// Number of worker threads kernels would currently use
#[cfg(not(feature = "parallel"))]
pub fn current_num_threads() -> usize {
    1
}

/// Parallel map with index
#[cfg(feature = "parallel")]
pub fn map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

/// Sequential map with index (fallback)
#[cfg(not(feature = "parallel"))]
pub fn map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    F: Fn(usize) -> U,
{
    (0..count).map(f).collect()
}

/// Parallel unstable sort by key
#[cfg(feature = "parallel")]
pub fn sort_unstable_by_key<T, K, F>(data: &mut [T], f: F)
where
    T: Send,
    K: Ord,
    F: Fn(&T) -> K + Sync,
{
    use rayon::prelude::*;
    data.par_sort_unstable_by_key(f);
}

/// Sequential unstable sort (fallback)
#[cfg(not(feature = "parallel"))]
pub fn sort_unstable_by_key<T, K, F>(data: &mut [T], f: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    data.sort_unstable_by_key(f);
}
