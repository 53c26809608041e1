// ============================================================
// Layer 2 — ConvertUseCase
// ============================================================
// Runs the full conversion in order:
//
//   Step 1: Check the configuration            (this layer)
//   Step 2: Load and encode the ARFF file      (Layer 4 - data)
//   Step 3: Scale a numeric class to [0, 1]    (Layer 3 - domain)
//   Step 4: Work out input/output unit counts  (Layer 6 - infra)
//   Step 5: Partition train/validation/test    (Layer 4 - data)
//   Step 6: Render every PAT file              (Layer 6 - infra)
//   Step 7: Build the report, render its JSON  (Layer 2 / 6)
//   Step 8: Write all files as one batch       (Layer 6 - infra)
//
// Nothing is written until Step 8, and the batch is staged
// before any target is replaced, so a failure anywhere leaves
// the filesystem as it was.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::application::report::{AttributeSummary, ConversionReport, WrittenFile};
use crate::data::{
    loader::{ArffLoader, LoadOptions},
    partitioner::Partitioner,
    splitter::RandomStratifiedSplitter,
};
use crate::domain::dataset::{LoadedDataset, Partition};
use crate::domain::error::ConvertError;
use crate::domain::policy::MissingPolicy;
use crate::domain::traits::{DatasetSource, StratifiedSplitter};
use crate::infra::{
    output_paths::split_paths,
    pat_writer::{timestamp, PatFile, PatLayout},
    report_store::ReportStore,
    staged_write::{write_all, Output},
};

// ─── Conversion Configuration ────────────────────────────────────────────────
// Everything a run needs, fixed before the run starts and
// passed down explicitly. Serialisable so it can go into the
// JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub arff:                PathBuf,
    pub pat:                 PathBuf,
    pub test_fraction:       f64,
    pub validation_fraction: f64,
    pub policy:              MissingPolicy,
    pub class_attribute:     Option<String>,
    pub seed:                Option<u64>,
    pub skip_invalid:        bool,
    pub scale_numeric_class: bool,
    pub all_inputs:          bool,
    pub report:              Option<PathBuf>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            arff:                PathBuf::from("data.arff"),
            pat:                 PathBuf::from("data.pat"),
            test_fraction:       0.33,
            validation_fraction: 0.33,
            policy:              MissingPolicy::default(),
            class_attribute:     None,
            seed:                None,
            skip_invalid:        false,
            scale_numeric_class: true,
            all_inputs:          false,
            report:              None,
        }
    }
}

impl ConvertConfig {
    /// Reject fractions the partitioner could never satisfy.
    pub fn validate(&self) -> Result<(), ConvertError> {
        for (what, v) in [("test", self.test_fraction), ("validation", self.validation_fraction)] {
            if !(0.0..1.0).contains(&v) {
                return Err(ConvertError::Config(format!(
                    "{what} size must be in [0.0, 1.0), got {v}"
                )));
            }
        }
        if self.test_fraction > 0.0 && self.test_fraction + self.validation_fraction >= 1.0 {
            return Err(ConvertError::Config(format!(
                "test ({}) and validation ({}) sizes leave no training rows",
                self.test_fraction, self.validation_fraction
            )));
        }
        Ok(())
    }

    pub fn wants_split(&self) -> bool {
        self.test_fraction > 0.0
    }
}

// ─── ConvertUseCase ───────────────────────────────────────────────────────────
pub struct ConvertUseCase {
    config: ConvertConfig,
}

impl ConvertUseCase {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Run the conversion with the ARFF loader and a random
    /// splitter seeded from the configuration.
    pub fn execute(&self) -> Result<ConversionReport> {
        let cfg = &self.config;
        let loader = ArffLoader::new(
            &cfg.arff,
            LoadOptions {
                policy:          cfg.policy,
                class_attribute: cfg.class_attribute.clone(),
                capture_labels:  cfg.wants_split(),
                skip_invalid:    cfg.skip_invalid,
            },
        );
        let mut splitter = RandomStratifiedSplitter::new(cfg.seed);
        self.execute_with(&loader, &mut splitter)
    }

    /// Run the conversion against any source and splitter.
    pub fn execute_with(
        &self,
        source:   &dyn DatasetSource,
        splitter: &mut dyn StratifiedSplitter,
    ) -> Result<ConversionReport> {
        let cfg = &self.config;

        // ── Step 1: Configuration ────────────────────────────────────────────
        cfg.validate()?;

        // ── Step 2: Load and encode ──────────────────────────────────────────
        let LoadedDataset { mut dataset, class_index, stats } = source.load()?;
        if dataset.is_empty() {
            tracing::warn!("No rows left after encoding");
        }

        // ── Step 3: Numeric class scaling ────────────────────────────────────
        let class_attr = dataset.schema.attributes[class_index].clone();
        if class_attr.is_numeric() && cfg.scale_numeric_class && !dataset.is_empty() {
            tracing::info!("Scaling numeric class '{}' to [0, 1]", class_attr.name());
            let column = dataset.schema.offset_of(class_index);
            dataset.scale_column(column);
        }

        // ── Step 4: Unit counts ──────────────────────────────────────────────
        let width     = dataset.schema.width();
        let is_last   = class_index + 1 == dataset.schema.len();
        let outputs   = if is_last && !cfg.all_inputs { class_attr.width() } else { 0 };
        let layout    = PatLayout { inputs: width - outputs, outputs };
        tracing::debug!("{} input units, {} output units", layout.inputs, layout.outputs);

        // ── Step 5: Partition ────────────────────────────────────────────────
        let labels    = dataset.labels();
        let partition = Partitioner::new(splitter).partition(
            &labels,
            cfg.test_fraction,
            cfg.validation_fraction,
        )?;

        // ── Step 6: Render ───────────────────────────────────────────────────
        let generated_at = timestamp();
        let subsets: Vec<(&str, PathBuf, Vec<usize>)> = match partition {
            Partition::Whole(indices) => vec![("all", cfg.pat.clone(), indices)],
            Partition::Split(split) => {
                let paths    = split_paths(&cfg.pat);
                let mut outs = vec![("train", paths.train, split.train)];
                if cfg.validation_fraction > 0.0 {
                    outs.push(("validation", paths.validation, split.validation));
                }
                outs.push(("test", paths.test, split.test));
                outs
            }
        };

        let files: Vec<PatFile> = subsets
            .iter()
            .map(|(_, path, indices)| {
                PatFile::new(path.clone(), &dataset.select(indices), layout, &generated_at)
            })
            .collect();

        // ── Step 7: Report ───────────────────────────────────────────────────
        let report = ConversionReport {
            relation:        dataset.schema.relation.clone(),
            config:          cfg.clone(),
            class_attribute: class_attr.name().to_string(),
            layout,
            attributes:      AttributeSummary::describe(&dataset.schema, &stats.substitutions),
            stats,
            files: subsets
                .iter()
                .zip(&files)
                .map(|((subset, _, _), file)| WrittenFile {
                    subset:   subset.to_string(),
                    path:     file.path.clone(),
                    patterns: file.patterns,
                })
                .collect(),
        };

        let report_json = match &cfg.report {
            Some(path) => {
                let store = ReportStore::new(path);
                Some((store.render(&report)?, store))
            }
            None => None,
        };

        // ── Step 8: Write ────────────────────────────────────────────────────
        let mut outputs: Vec<Output<'_>> = files
            .iter()
            .map(|file| Output::new(&file.path, file.contents()))
            .collect();
        if let Some((json, store)) = &report_json {
            outputs.push(Output::new(store.path(), json));
        }
        write_all(&outputs)?;

        for file in &files {
            tracing::info!("Wrote '{}' ({} patterns)", file.path.display(), file.patterns);
        }
        if let Some((_, store)) = &report_json {
            tracing::info!("Wrote report '{}'", store.path().display());
        }

        Ok(report)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    /// 12 sunny/rainy rows with a yes/no class, one missing temp.
    fn weather_arff() -> String {
        let mut text = String::from(
            "@relation weather\n\
             @attribute temp numeric\n\
             @attribute outlook {sunny, rainy}\n\
             @attribute play {yes, no}\n\
             @data\n",
        );
        for i in 0..12 {
            let outlook = if i % 2 == 0 { "sunny" } else { "rainy" };
            let play    = if i < 6 { "yes" } else { "no" };
            text.push_str(&format!("{},{},{}\n", 60 + i, outlook, play));
        }
        text.push_str("?,sunny,yes\n");
        text
    }

    fn setup(arff: &str) -> (tempfile::TempDir, ConvertConfig) {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.arff");
        fs::write(&path, arff).unwrap();
        let cfg = ConvertConfig {
            arff: path,
            pat:  dir.path().join("weather.pat"),
            seed: Some(5),
            ..ConvertConfig::default()
        };
        (dir, cfg)
    }

    fn patterns_in(path: &Path) -> usize {
        let text = fs::read_to_string(path).unwrap();
        let line = text.lines().find(|l| l.starts_with("No. of patterns")).unwrap();
        line.rsplit(' ').next().unwrap().parse().unwrap()
    }

    #[test]
    fn test_no_split_writes_single_file() {
        let (dir, cfg) = setup(&weather_arff());
        let cfg        = ConvertConfig { test_fraction: 0.0, ..cfg };
        let report     = ConvertUseCase::new(cfg).execute().unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.stats.discarded_rows, 1);
        assert_eq!(patterns_in(&dir.path().join("weather.pat")), 12);
        assert!(!dir.path().join("weather-train.pat").exists());
    }

    #[test]
    fn test_three_way_split_writes_three_files() {
        let (dir, cfg) = setup(&weather_arff());
        let report     = ConvertUseCase::new(cfg).execute().unwrap();

        let train = patterns_in(&dir.path().join("weather-train.pat"));
        let valid = patterns_in(&dir.path().join("weather-valid.pat"));
        let test  = patterns_in(&dir.path().join("weather-test.pat"));
        assert_eq!(train + valid + test, 12);
        assert!(train > 0 && valid > 0 && test > 0);
        assert_eq!(report.file("validation").unwrap().patterns, valid);
    }

    #[test]
    fn test_two_way_split_has_no_validation_file() {
        let (dir, cfg) = setup(&weather_arff());
        let cfg        = ConvertConfig { validation_fraction: 0.0, ..cfg };
        ConvertUseCase::new(cfg).execute().unwrap();

        assert!(dir.path().join("weather-train.pat").exists());
        assert!(dir.path().join("weather-test.pat").exists());
        assert!(!dir.path().join("weather-valid.pat").exists());
    }

    #[test]
    fn test_class_block_is_output_units() {
        let (_dir, cfg) = setup(&weather_arff());
        let report      = ConvertUseCase::new(ConvertConfig { test_fraction: 0.0, ..cfg }).execute().unwrap();
        assert_eq!(report.layout, PatLayout { inputs: 3, outputs: 2 });
    }

    #[test]
    fn test_all_inputs_and_non_last_class() {
        let (_dir, cfg) = setup(&weather_arff());
        let cfg         = ConvertConfig { test_fraction: 0.0, all_inputs: true, ..cfg };
        let report      = ConvertUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!(report.layout, PatLayout { inputs: 5, outputs: 0 });

        let cfg    = ConvertConfig { all_inputs: false, class_attribute: Some("outlook".into()), ..cfg };
        let report = ConvertUseCase::new(cfg).execute().unwrap();
        assert_eq!(report.layout.outputs, 0);
        assert_eq!(report.class_attribute, "outlook");
    }

    #[test]
    fn test_keep_missing_counts_substitution() {
        let (_dir, cfg) = setup(&weather_arff());
        let cfg = ConvertConfig {
            test_fraction: 0.0,
            policy:        MissingPolicy::keep_all(),
            ..cfg
        };
        let report = ConvertUseCase::new(cfg).execute().unwrap();
        assert_eq!(report.files[0].patterns, 13);
        assert_eq!(report.attributes[0].missing.as_ref().unwrap().count, 1);
        assert!(report.to_string().contains("? -> 0 (1 cases)"));
    }

    #[test]
    fn test_numeric_class_is_scaled() {
        let arff = "@attribute x {a,b}\n@attribute y numeric\n@data\na,10\nb,30\na,20\n";
        let (dir, cfg) = setup(arff);
        ConvertUseCase::new(ConvertConfig { test_fraction: 0.0, ..cfg }).execute().unwrap();

        let text = fs::read_to_string(dir.path().join("weather.pat")).unwrap();
        let data: Vec<&str> = text.lines().skip(7).collect();
        assert_eq!(data, vec!["1 0 0", "0 1 1", "1 0 0.5"]);
    }

    #[test]
    fn test_partition_error_writes_nothing() {
        let arff = "@attribute x numeric\n@attribute c {a,b}\n@data\n1,a\n2,a\n3,a\n4,b\n";
        let (dir, cfg) = setup(arff);
        let err = ConvertUseCase::new(cfg).execute().unwrap_err();

        assert!(matches!(err.downcast_ref::<ConvertError>(), Some(ConvertError::Partition(_))));
        let written: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |x| x == "pat"))
            .collect();
        assert!(written.is_empty());
    }

    #[test]
    fn test_invalid_fractions_rejected_before_loading() {
        let cfg = ConvertConfig {
            arff:                PathBuf::from("/nonexistent.arff"),
            test_fraction:       0.6,
            validation_fraction: 0.5,
            ..ConvertConfig::default()
        };
        let err = ConvertUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(err.downcast_ref::<ConvertError>(), Some(ConvertError::Config(_))));
    }

    #[test]
    fn test_report_saved_as_json() {
        let (dir, cfg) = setup(&weather_arff());
        let path       = dir.path().join("report.json");
        let cfg        = ConvertConfig { report: Some(path.clone()), ..cfg };
        let report     = ConvertUseCase::new(cfg).execute().unwrap();

        let loaded = ReportStore::new(&path).load().unwrap();
        assert_eq!(loaded.files, report.files);
        assert_eq!(loaded.attributes, report.attributes);
        assert_eq!(loaded.relation.as_deref(), Some("weather"));
    }

    #[test]
    fn test_unwritable_report_leaves_no_pattern_files() {
        let (dir, cfg) = setup(&weather_arff());
        let cfg = ConvertConfig {
            test_fraction: 0.0,
            report:        Some(dir.path().join("nodir").join("r.json")),
            ..cfg
        };
        let err = ConvertUseCase::new(cfg).execute().unwrap_err();

        assert!(matches!(err.downcast_ref::<ConvertError>(), Some(ConvertError::Io { .. })));
        assert!(!dir.path().join("weather.pat").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1, "only the input remains");
    }

    #[test]
    fn test_unwritable_report_keeps_earlier_pattern_files() {
        let (dir, cfg) = setup(&weather_arff());
        let train      = dir.path().join("weather-train.pat");
        fs::write(&train, "earlier run").unwrap();
        let cfg = ConvertConfig { report: Some(dir.path().join("nodir").join("r.json")), ..cfg };

        assert!(ConvertUseCase::new(cfg).execute().is_err());
        assert_eq!(fs::read_to_string(&train).unwrap(), "earlier run");
        assert!(!dir.path().join("weather-test.pat").exists());
    }

    #[test]
    fn test_missing_class_rows_kept_and_split() {
        let mut arff = String::from("@attribute x numeric\n@attribute c {a,b}\n@data\n");
        for i in 0..20 {
            arff.push_str(&format!("{i},{}\n", if i % 2 == 0 { "a" } else { "b" }));
        }
        arff.push_str("99,?\n");
        let (dir, cfg) = setup(&arff);
        let cfg = ConvertConfig {
            test_fraction:       0.33,
            validation_fraction: 0.33,
            policy:              MissingPolicy::keep_all(),
            ..cfg
        };
        let report = ConvertUseCase::new(cfg).execute().unwrap();

        let total: usize = report.files.iter().map(|f| f.patterns).sum();
        assert_eq!(total, 21);
        assert!(dir.path().join("weather-valid.pat").exists());
        let kept = ["weather-train.pat", "weather-valid.pat", "weather-test.pat"]
            .iter()
            .map(|name| fs::read_to_string(dir.path().join(name)).unwrap())
            .filter(|text| text.lines().any(|l| l == "99 0 0"))
            .count();
        assert_eq!(kept, 1);
    }

    /// Puts the first `round(n * fraction)` rows on the selected side.
    struct FirstRows;

    impl StratifiedSplitter for FirstRows {
        fn split_reserving(&mut self, labels: &[&str], fraction: f64, _min_rest: usize) -> (Vec<usize>, Vec<usize>) {
            let take = ((labels.len() as f64) * fraction).round() as usize;
            ((0..take).collect(), (take..labels.len()).collect())
        }
    }

    #[test]
    fn test_injected_splitter_decides_subsets() {
        let (dir, cfg) = setup(&weather_arff());
        let cfg        = ConvertConfig { test_fraction: 0.25, validation_fraction: 0.0, ..cfg };
        let loader     = ArffLoader::new(
            &cfg.arff,
            LoadOptions { capture_labels: true, ..LoadOptions::default() },
        );
        let report = ConvertUseCase::new(cfg)
            .execute_with(&loader, &mut FirstRows)
            .unwrap();

        assert_eq!(report.file("test").unwrap().patterns, 3);
        let test = fs::read_to_string(dir.path().join("weather-test.pat")).unwrap();
        // rows 0..3 of the retained set: temps 60, 61, 62
        let first: Vec<&str> = test.lines().skip(7).map(|l| l.split(' ').next().unwrap()).collect();
        assert_eq!(first, vec!["60", "61", "62"]);
    }
}
