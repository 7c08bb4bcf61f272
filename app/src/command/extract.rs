//! Default command: extract pet stats from one chat log.

use petstat_config::Config;
use petstat_extract::{ExtractionEngine, RunOutcome, RunRequest, run};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use super::EXIT_NO_RESULT;
use crate::picker::{InputPicker, Resolution, TerminalPicker, find_candidates, resolve_input};

const USAGE: &str = "Usage: petstat CHAT_*.TXT [-o out.json] [--merge pets.json]";

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone, Default)]
pub struct ExtractInput {
    /// Chat log to read; resolved interactively when absent.
    pub input: Option<PathBuf>,
    /// Output path override.
    pub out: Option<PathBuf>,
    /// Persisted record set to merge into.
    pub merge: Option<PathBuf>,
    /// Config file override.
    pub config: Option<PathBuf>,
}

/// Strategy for executing a single extraction run.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<ExitCode> {
        let config = match &input.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        let chat_path = match input.input {
            Some(path) => path,
            None => match chosen_path(choose_input(&config)?) {
                Ok(path) => path,
                Err(status) => return Ok(ExitCode::from(status)),
            },
        };

        let engine = ExtractionEngine::new(&config.extraction)?;
        let request = RunRequest {
            output: input
                .out
                .unwrap_or_else(|| config.output.output_path(&chat_path)),
            input: chat_path,
            merge_base: input.merge,
        };
        info!(
            "Extracting {} -> {}",
            request.input.display(),
            request.output.display()
        );

        let outcome = run(&engine, &request)?;
        print_outcome(&outcome);
        Ok(ExitCode::from(outcome_status(&outcome)))
    }
}

/// The path to extract from, or the exit status when there is none.
fn chosen_path(resolution: Resolution) -> Result<PathBuf, u8> {
    match resolution {
        Resolution::Inferred(path) | Resolution::Chosen(path) => Ok(path),
        Resolution::NotChosen => {
            println!("No file selected.");
            Err(EXIT_NO_RESULT)
        }
        Resolution::Unavailable => {
            eprintln!("{USAGE}");
            Err(EXIT_NO_RESULT)
        }
    }
}

const fn outcome_status(outcome: &RunOutcome) -> u8 {
    match outcome {
        RunOutcome::Written(_) => 0,
        RunOutcome::Empty { .. } => EXIT_NO_RESULT,
    }
}

fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Written(report) => {
            if let Some(counts) = report.merged {
                println!(
                    "[OK] merged {} records ({} existing -> {})",
                    report.extracted, counts.before, counts.after
                );
            }
            println!(
                "[OK] saved {} ({} records, read as {})",
                report.output.display(),
                report.extracted,
                report.encoding
            );
        }
        RunOutcome::Empty { encoding } => {
            println!("Extraction result is empty (read as {encoding}). Check the chat log format.");
        }
    }
}

fn choose_input(config: &Config) -> anyhow::Result<Resolution> {
    let cwd = std::env::current_dir()?;
    let candidates = find_candidates(&cwd, &config.input.candidate_glob)?;
    let mut picker = TerminalPicker::stdin();
    resolve_input(
        &candidates,
        picker.as_mut().map(|p| p as &mut dyn InputPicker),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use petstat_extract::{MergeCounts, RunReport};

    fn written(merged: Option<MergeCounts>) -> RunOutcome {
        RunOutcome::Written(RunReport {
            encoding: "cp949",
            extracted: 2,
            merged,
            output: PathBuf::from("CHAT_250926.pets.json"),
        })
    }

    #[test]
    fn written_outcome_exits_successfully() {
        assert_eq!(outcome_status(&written(None)), 0);
        let counts = MergeCounts {
            before: 3,
            after: 4,
        };
        assert_eq!(outcome_status(&written(Some(counts))), 0);
    }

    #[test]
    fn empty_outcome_exits_with_no_result() {
        let outcome = RunOutcome::Empty { encoding: "utf-8" };
        assert_eq!(outcome_status(&outcome), EXIT_NO_RESULT);
    }

    #[test]
    fn resolved_input_is_used() {
        let path = PathBuf::from("CHAT_250926.TXT");
        assert_eq!(chosen_path(Resolution::Inferred(path.clone())), Ok(path.clone()));
        assert_eq!(chosen_path(Resolution::Chosen(path.clone())), Ok(path));
    }

    #[test]
    fn unresolved_input_exits_with_no_result() {
        assert_eq!(chosen_path(Resolution::NotChosen), Err(EXIT_NO_RESULT));
        assert_eq!(chosen_path(Resolution::Unavailable), Err(EXIT_NO_RESULT));
    }
}
