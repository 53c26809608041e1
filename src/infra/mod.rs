// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the output side of the filesystem:
//
//   pat_writer.rs   — renders rows as SNNS/JavaNNS pattern
//                     files
//
//   staged_write.rs — writes a batch of outputs all-or-nothing
//
//   output_paths.rs — derives the -train / -valid / -test
//                     file names from the destination path
//
//   report_store.rs — renders the conversion report as JSON

/// PAT rendering
pub mod pat_writer;

/// All-or-nothing writing of a batch of files
pub mod staged_write;

/// Train/validation/test file naming
pub mod output_paths;

/// Conversion report serialization
pub mod report_store;
