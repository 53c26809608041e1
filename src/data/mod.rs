// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from ARFF text to partitioned, encoded rows.
//
//   .arff file
//       │
//       ▼
//   schema        → attribute declarations → Schema
//       │
//       ▼
//   encoder       → one data line → EncodedRow (or dropped)
//       │
//       ▼
//   loader        → runs the two above over a whole file
//       │
//       ▼
//   partitioner   → train / validation / test row indices,
//                   sampled by a stratified splitter
//
// Each module does exactly one step and is tested on its own.

/// Parses the ARFF header into a Schema
pub mod schema;

/// Encodes data rows under a Schema and MissingPolicy
pub mod encoder;

/// Reads an ARFF file into a LoadedDataset
pub mod loader;

/// Stratified random sampling of row indices
pub mod splitter;

/// Builds the train/validation/test partition
pub mod partitioner;
