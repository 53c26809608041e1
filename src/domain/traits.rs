// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two seams of the pipeline:
//   - DatasetSource       → where encoded rows come from
//   - StratifiedSplitter  → how rows are sampled into subsets
//
// The application layer only sees these traits, so a seeded
// splitter can be swapped in for tests and another input
// format could feed the same partitioning and serialisation.

use crate::domain::dataset::LoadedDataset;
use crate::domain::error::ConvertError;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Any component that can produce an encoded dataset.
///
/// Implementations:
///   - ArffLoader → parses and encodes an ARFF file
pub trait DatasetSource {
    fn load(&self) -> Result<LoadedDataset, ConvertError>;
}

// ─── StratifiedSplitter ───────────────────────────────────────────────────────
/// Random partition of row indices, stratified by label.
///
/// `split(labels, fraction)` returns `(selected, rest)` covering
/// `0..labels.len()` exactly once. For every label class of size
/// `n >= 2`, `selected` receives `round(n * fraction)` members,
/// clamped to `[1, n - 1]`. Both lists are in ascending order.
///
/// Implementations:
///   - RandomStratifiedSplitter → per-class shuffle with `rand`
pub trait StratifiedSplitter {
    /// Like `split`, but leaves at least `min_rest` members of each
    /// class on the `rest` side when the class is large enough.
    fn split_reserving(
        &mut self,
        labels:   &[&str],
        fraction: f64,
        min_rest: usize,
    ) -> (Vec<usize>, Vec<usize>);

    fn split(&mut self, labels: &[&str], fraction: f64) -> (Vec<usize>, Vec<usize>) {
        self.split_reserving(labels, fraction, 1)
    }
}
