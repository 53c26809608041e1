// ============================================================
// Layer 4 — Dataset Partitioner
// ============================================================
// Decides which retained rows go to train, validation and test.
//
//   test_fraction == 0       → one output, the whole dataset
//   test_fraction  > 0       → stratified split: test | remainder
//   validation_fraction > 0  → stratified split of the remainder:
//                              validation | train
//
// validation_fraction is a share of the FULL dataset, so the
// second split uses validation / (1 - test) of the remainder.
//
// Rows whose class is missing ("?" kept by the policy) form a
// pool of their own. The splitter deals that pool out with the
// same fraction, but it is not a label class and is exempt
// from the class-size check.
//
// The sampling itself is delegated to a StratifiedSplitter.

use std::collections::BTreeMap;

use crate::domain::dataset::{Partition, Split};
use crate::domain::error::ConvertError;
use crate::domain::policy::is_missing;
use crate::domain::traits::StratifiedSplitter;

pub struct Partitioner<'a> {
    splitter: &'a mut dyn StratifiedSplitter,
}

impl<'a> Partitioner<'a> {
    pub fn new(splitter: &'a mut dyn StratifiedSplitter) -> Self {
        Self { splitter }
    }

    /// Partition rows by their labels.
    ///
    /// Fails before any sampling happens if a label class is
    /// too small to appear in every requested subset.
    pub fn partition(
        &mut self,
        labels:              &[&str],
        test_fraction:       f64,
        validation_fraction: f64,
    ) -> Result<Partition, ConvertError> {
        check_fraction("test", test_fraction)?;
        check_fraction("validation", validation_fraction)?;

        if test_fraction == 0.0 {
            if validation_fraction > 0.0 {
                tracing::warn!("Validation size ignored because test size is 0");
            }
            return Ok(Partition::Whole((0..labels.len()).collect()));
        }

        if test_fraction + validation_fraction >= 1.0 {
            return Err(ConvertError::Partition(format!(
                "test ({test_fraction}) and validation ({validation_fraction}) sizes leave no training rows"
            )));
        }
        if labels.is_empty() {
            return Err(ConvertError::Partition("no rows left to split".to_string()));
        }

        let with_validation = validation_fraction > 0.0;
        let subsets         = if with_validation { 3 } else { 2 };
        check_class_sizes(labels, subsets)?;

        // Keep enough of every class back for validation and train
        let (test, remainder) = self
            .splitter
            .split_reserving(labels, test_fraction, subsets - 1);

        let (validation, train) = if with_validation {
            let sub_labels: Vec<&str> = remainder.iter().map(|&i| labels[i]).collect();
            let share                 = validation_fraction / (1.0 - test_fraction);
            let (val_local, train_local) = self.splitter.split(&sub_labels, share);
            (
                val_local.iter().map(|&j| remainder[j]).collect(),
                train_local.iter().map(|&j| remainder[j]).collect(),
            )
        } else {
            (Vec::new(), remainder)
        };

        tracing::debug!(
            "Partitioned {} rows: {} train, {} validation, {} test",
            labels.len(),
            train.len(),
            validation.len(),
            test.len(),
        );

        Ok(Partition::Split(Split { train, validation, test }))
    }
}

fn check_fraction(what: &str, fraction: f64) -> Result<(), ConvertError> {
    if (0.0..1.0).contains(&fraction) {
        Ok(())
    } else {
        Err(ConvertError::Config(format!(
            "{what} size must be in [0.0, 1.0), got {fraction}"
        )))
    }
}

fn check_class_sizes(labels: &[&str], subsets: usize) -> Result<(), ConvertError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels.iter().filter(|l| !is_missing(l)) {
        *counts.entry(*label).or_default() += 1;
    }
    match counts.iter().find(|(_, n)| **n < subsets) {
        Some((label, n)) => Err(ConvertError::Partition(format!(
            "class '{label}' has {n} row(s) but {subsets} subsets were requested"
        ))),
        None => Ok(()),
    }
}
