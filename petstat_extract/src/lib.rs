#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Chat log decoding and pet stat extraction.

pub mod decoder;
pub mod engine;
pub mod patterns;
pub mod pipeline;

pub use decoder::{DecodedText, LOSSY_LABEL, decode_bytes, read_text_auto};
pub use engine::{ExtractionConfig, ExtractionEngine};
pub use patterns::{CompiledPatterns, PatternSet};
pub use pipeline::{MergeCounts, RunOutcome, RunReport, RunRequest, run};
