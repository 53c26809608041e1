// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal:
//
//   convert_use_case — ARFF in, one or three PAT files out
//   inspect_use_case — print how an ARFF header would be encoded
//   report           — what a run did, for printing and JSON
//
// Rules for this layer:
//   - No parsing or encoding logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination

// The conversion workflow
pub mod convert_use_case;

// The schema inspection workflow
pub mod inspect_use_case;

// Run summaries
pub mod report;
