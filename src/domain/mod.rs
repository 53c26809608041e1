// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing a tabular dataset
// on its way from ARFF to PAT.
//
// Rules for this layer:
//   - NO file I/O
//   - NO clap, tracing subscriber, or other outer-layer types
//   - Only structs, enums, traits and the error taxonomy
//
// Everything else in the crate is written in terms of these
// types: the data layer produces them, the infra layer
// serialises them.

// Attribute descriptors and the parsed schema
pub mod attribute;

// Encoded rows, datasets and train/validation/test splits
pub mod dataset;

// Missing-value handling policy
pub mod policy;

// The error taxonomy shared by every layer below the CLI
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
