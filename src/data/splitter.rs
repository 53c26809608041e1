// ============================================================
// Layer 4 — Stratified Splitter
// ============================================================
// Splits row indices into two sets while keeping each label's
// share the same on both sides:
//
//   labels:   a a a a b b            fraction = 0.5
//   per class: a → shuffle, take 2    b → shuffle, take 1
//   selected: 2 of the a rows + 1 b row
//   rest:     the other 3 rows
//
// Each class is shuffled with Fisher-Yates via
// rand::seq::SliceRandom. Passing a seed makes the split
// reproducible; without one the RNG is seeded from the OS.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::traits::StratifiedSplitter;

pub struct RandomStratifiedSplitter {
    rng: StdRng,
}

impl RandomStratifiedSplitter {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl StratifiedSplitter for RandomStratifiedSplitter {
    fn split_reserving(
        &mut self,
        labels:   &[&str],
        fraction: f64,
        min_rest: usize,
    ) -> (Vec<usize>, Vec<usize>) {
        // BTreeMap so a seeded run visits classes in a fixed order
        let mut classes: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, label) in labels.iter().enumerate() {
            classes.entry(*label).or_default().push(i);
        }

        let mut selected = Vec::new();
        let mut rest     = Vec::new();

        for (label, mut members) in classes {
            members.shuffle(&mut self.rng);
            let take = selected_count(members.len(), fraction, min_rest);
            tracing::debug!("Class '{}': {} of {} selected", label, take, members.len());

            // split_off(n) leaves [0..n] in `members` and returns the tail
            let tail = members.split_off(take);
            selected.extend(members);
            rest.extend(tail);
        }

        selected.sort_unstable();
        rest.sort_unstable();
        (selected, rest)
    }
}

/// How many of a class of `n` go to the selected side.
pub fn selected_count(n: usize, fraction: f64, min_rest: usize) -> usize {
    if n == 0 || fraction <= 0.0 {
        return 0;
    }
    if fraction >= 1.0 {
        return n;
    }
    let target = ((n as f64) * fraction).round() as usize;
    let upper  = n.saturating_sub(min_rest);
    if upper == 0 {
        return target.min(n);
    }
    target.clamp(1, upper)
}
