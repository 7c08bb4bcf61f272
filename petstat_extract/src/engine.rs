//! Extraction engine turning decoded chat text into a record set.
//!
//! The scan is a fold over lines. The only state carried between lines is the
//! name from the most recent header and the partial records seen so far.

use petstat_core::{PetRecord, RecordSet, Result, StatBlock, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::patterns::{CompiledPatterns, PatternSet};

/// Configuration for the extraction engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Line patterns to apply.
    #[serde(default)]
    pub patterns: PatternSet,
}

/// Stats collected for one name so far.
#[derive(Debug, Default)]
struct Draft {
    s0: Option<StatBlock>,
    sg: Option<StatBlock>,
}

impl Draft {
    fn slot(&mut self, kind: StatKind) -> &mut Option<StatBlock> {
        match kind {
            StatKind::Initial => &mut self.s0,
            StatKind::Growth => &mut self.sg,
        }
    }

    fn complete(&self) -> Option<PetRecord> {
        Some(PetRecord {
            s0: self.s0?,
            sg: self.sg?,
        })
    }
}

#[derive(Debug, Default)]
struct ScanState {
    current: Option<usize>,
    drafts: Vec<(String, Draft)>,
    index: HashMap<String, usize>,
}

impl ScanState {
    fn enter(&mut self, name: &str) {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.index.insert(name.to_string(), self.drafts.len());
                self.drafts.push((name.to_string(), Draft::default()));
                self.drafts.len() - 1
            }
        };
        self.current = Some(idx);
    }

    fn into_records(self) -> RecordSet {
        self.drafts
            .into_iter()
            .filter_map(|(name, draft)| {
                let record = draft.complete();
                if record.is_none() {
                    debug!("Dropping incomplete record {name}");
                }
                record.map(|r| (name, r))
            })
            .collect()
    }
}

/// Extraction engine for pet stat records.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    patterns: CompiledPatterns,
}

impl ExtractionEngine {
    /// Create a new extraction engine from configuration.
    ///
    /// # Errors
    /// Returns an error if a pattern does not compile or lacks a required group.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            patterns: config.patterns.build()?,
        })
    }

    /// Create an extraction engine with the default Korean patterns.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ExtractionConfig::default())
    }

    /// Extract every record that has both initial and growth stats.
    ///
    /// Lines before the first header are ignored. For each name the first
    /// initial line and the first growth line win; later repeats are ignored.
    ///
    /// # Errors
    /// Returns [`petstat_core::Error::InvalidNumber`] if a matched stat line
    /// holds a number that does not parse.
    pub fn extract(&self, text: &str) -> Result<RecordSet> {
        let state = split_lines(text).enumerate().try_fold(
            ScanState::default(),
            |state, (idx, line)| self.step(state, idx + 1, line),
        )?;
        Ok(state.into_records())
    }

    fn step(&self, mut state: ScanState, line_no: usize, line: &str) -> Result<ScanState> {
        if let Some(name) = self.patterns.header_name(line) {
            if name.is_empty() {
                debug!("Line {line_no}: header without a name, stats ignored until the next one");
                state.current = None;
            } else {
                state.enter(name);
            }
            return Ok(state);
        }
        let Some(idx) = state.current else {
            return Ok(state);
        };

        let draft = &mut state.drafts[idx].1;
        for kind in [StatKind::Initial, StatKind::Growth] {
            let slot = draft.slot(kind);
            if slot.is_some() {
                continue;
            }
            if let Some(block) = self.patterns.stats(kind, line, line_no)? {
                *slot = Some(block);
                break;
            }
        }
        Ok(state)
    }
}

/// Characters that end a line. `\r\n` counts as a single break.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split on every line break a chat log may contain: `\n`, `\r\n`, a lone
/// `\r`, vertical tab, form feed, the file/group/record separators, NEL and
/// the Unicode line/paragraph separators.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        if let Some(pos) = current.find(LINE_BREAKS) {
            let (line, tail) = current.split_at(pos);
            let mut chars = tail.chars();
            let brk = chars.next();
            let tail = chars.as_str();
            rest = Some(if brk == Some('\r') {
                tail.strip_prefix('\n').unwrap_or(tail)
            } else {
                tail
            });
            Some(line)
        } else {
            rest = None;
            (!current.is_empty()).then_some(current)
        }
    })
}
