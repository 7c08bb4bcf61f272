//! One run: decode, extract, optionally merge, write.

use petstat_core::{Result, load_record_set, merge_into, write_record_set};
use std::path::PathBuf;
use tracing::info;

use crate::decoder::read_text_auto;
use crate::engine::ExtractionEngine;

/// Paths for a single run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Persisted record set to merge the extraction into.
    pub merge_base: Option<PathBuf>,
}

/// Record counts before and after a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCounts {
    pub before: usize,
    pub after: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub encoding: &'static str,
    pub extracted: usize,
    pub merged: Option<MergeCounts>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written(RunReport),
    /// Nothing complete was found; no file was written.
    Empty { encoding: &'static str },
}

/// Execute one run.
///
/// # Errors
/// Fails on I/O errors, an unparsable stat number, or a missing/malformed
/// merge base. An empty extraction is an outcome, not an error.
pub fn run(engine: &ExtractionEngine, request: &RunRequest) -> Result<RunOutcome> {
    let decoded = read_text_auto(&request.input)?;
    let records = engine.extract(&decoded.text)?;
    if records.is_empty() {
        return Ok(RunOutcome::Empty {
            encoding: decoded.encoding,
        });
    }
    info!(
        "Encoding: {}, extracted records: {}",
        decoded.encoding,
        records.len()
    );

    let merged = match &request.merge_base {
        Some(path) => {
            let base = load_record_set(path)?;
            let result = merge_into(&base, &records)?;
            let counts = MergeCounts {
                before: base.len(),
                after: result.len(),
            };
            info!("Merged: {} existing -> {} after merge", counts.before, counts.after);
            write_record_set(&request.output, &result)?;
            Some(counts)
        }
        None => {
            write_record_set(&request.output, &records)?;
            None
        }
    };
    info!("Saved {}", request.output.display());

    Ok(RunOutcome::Written(RunReport {
        encoding: decoded.encoding,
        extracted: records.len(),
        merged,
        output: request.output.clone(),
    }))
}
