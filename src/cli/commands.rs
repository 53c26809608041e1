// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `convert` and `inspect`, and
// all their flags.
//
// clap's derive macros generate the help text, the errors for
// missing arguments, and the string → f64/u64/bool conversions.
// Yes/no flags go through parse_yes_no so "yes", "Y", "true"
// and friends are all accepted.

use std::path::PathBuf;

use clap::{ArgAction, Args, Subcommand};

use crate::application::convert_use_case::ConvertConfig;
use crate::domain::policy::MissingPolicy;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an ARFF file into one or more PAT files
    Convert(ConvertArgs),

    /// Show how the attributes of an ARFF file would be encoded
    Inspect(InspectArgs),
}

/// All arguments for the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// The input ARFF file
    #[arg(long)]
    pub arff: PathBuf,

    /// The output PAT file; with a test split, the base name for
    /// the -train, -valid and -test files
    #[arg(long)]
    pub pat: PathBuf,

    /// Size of the test set as a fraction in [0.0, 1.0); 0 disables splitting
    #[arg(long, default_value_t = 0.33)]
    pub test_size: f64,

    /// Size of the validation set as a fraction of the whole dataset
    #[arg(long, default_value_t = 0.33)]
    pub validation_size: f64,

    /// Drop rows with a missing numeric value (yes/no);
    /// otherwise the value becomes 0
    #[arg(long, default_value = "yes", value_parser = parse_yes_no, action = ArgAction::Set)]
    pub discard_missing_numeric: bool,

    /// Drop rows with a missing nominal value (yes/no);
    /// otherwise the value becomes all zeros
    #[arg(long, default_value = "yes", value_parser = parse_yes_no, action = ArgAction::Set)]
    pub discard_missing_nominal: bool,

    /// Attribute to stratify on and emit as output units
    /// (defaults to the last attribute)
    #[arg(long)]
    pub class_attribute: Option<String>,

    /// Seed for reproducible splits
    #[arg(long)]
    pub seed: Option<u64>,

    /// Drop rows that cannot be encoded instead of failing
    #[arg(long)]
    pub skip_invalid: bool,

    /// Keep a numeric class as-is instead of scaling it to [0, 1]
    #[arg(long)]
    pub no_scale_class: bool,

    /// Treat every unit as an input (output units = 0)
    #[arg(long)]
    pub all_inputs: bool,

    /// Also write the conversion report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Convert CLI ConvertArgs into the application-layer ConvertConfig.
/// The application layer never sees clap types.
impl From<ConvertArgs> for ConvertConfig {
    fn from(a: ConvertArgs) -> Self {
        ConvertConfig {
            arff:                a.arff,
            pat:                 a.pat,
            test_fraction:       a.test_size,
            validation_fraction: a.validation_size,
            policy:              MissingPolicy::new(a.discard_missing_numeric, a.discard_missing_nominal),
            class_attribute:     a.class_attribute,
            seed:                a.seed,
            skip_invalid:        a.skip_invalid,
            scale_numeric_class: !a.no_scale_class,
            all_inputs:          a.all_inputs,
            report:              a.report,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// The ARFF file to inspect
    #[arg(long)]
    pub arff: PathBuf,
}

/// Parse a yes-like or no-like word.
pub fn parse_yes_no(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "1" => Ok(true),
        "no" | "n" | "false" | "f" | "0" => Ok(false),
        other => Err(format!("expected yes or no, got '{other}'")),
    }
}
