//! Progress aggregation.
//!
//! Pure functions that turn per-scene timing into a single completion
//! fraction for the whole vignette.

use crate::catalog::SceneCatalog;

/// Sum of the durations of every scene before `index`.
///
/// Defined for `index` in `0..=catalog.len()`; at `catalog.len()` this is the
/// total duration. Larger indices are clamped to the total.
pub fn cumulative_duration_before(catalog: &SceneCatalog, index: usize) -> u64 {
    let offsets = catalog.offsets();
    match offsets.get(index) {
        Some(&offset) => offset,
        None => {
            tracing::warn!(
                index,
                len = catalog.len(),
                "cumulative duration requested past the end of the catalog"
            );
            catalog.total_duration_ms()
        }
    }
}

/// Fraction of the total duration covered by `elapsed_ms`, in `[0, 1]`.
///
/// A zero total (empty catalog) yields 0.
pub fn global_progress(elapsed_ms: f64, total_ms: u64) -> f64 {
    if total_ms == 0 {
        return 0.0;
    }
    let progress = elapsed_ms / total_ms as f64;
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
