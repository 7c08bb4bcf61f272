//! Choosing an input file when none was given on the command line.
//!
//! Selection is a capability: a picker only exists when someone can answer it
//! (stdin is a terminal). Without one the caller prints usage instead.

use glob::{MatchOptions, Pattern};
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Interactive source of an input path.
pub trait InputPicker {
    /// Ask for a chat log. `Ok(None)` means nothing was chosen.
    fn pick(&mut self, candidates: &[PathBuf]) -> anyhow::Result<Option<PathBuf>>;
}

/// Prompts on a line-oriented terminal. Candidates are listed by number; the
/// answer is either a number or a path.
pub struct TerminalPicker<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> TerminalPicker<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl TerminalPicker<std::io::StdinLock<'static>, std::io::Stdout> {
    /// A picker on the process terminal, or `None` when stdin is not interactive.
    pub fn stdin() -> Option<Self> {
        let stdin = std::io::stdin();
        stdin
            .is_terminal()
            .then(|| Self::new(stdin.lock(), std::io::stdout()))
    }
}

impl<R: BufRead, W: Write> InputPicker for TerminalPicker<R, W> {
    fn pick(&mut self, candidates: &[PathBuf]) -> anyhow::Result<Option<PathBuf>> {
        if !candidates.is_empty() {
            writeln!(self.writer, "Chat logs in the current directory:")?;
            for (i, path) in candidates.iter().enumerate() {
                writeln!(self.writer, "  {}. {}", i + 1, path.display())?;
            }
        }
        write!(self.writer, "Select a CHAT_*.TXT file (number or path, empty to cancel): ")?;
        self.writer.flush()?;

        let mut answer = String::new();
        if self.reader.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(interpret_answer(answer.trim(), candidates))
    }
}

fn interpret_answer(answer: &str, candidates: &[PathBuf]) -> Option<PathBuf> {
    if answer.is_empty() {
        return None;
    }
    if let Ok(n) = answer.parse::<usize>() {
        if let Some(path) = n.checked_sub(1).and_then(|i| candidates.get(i)) {
            return Some(path.clone());
        }
    }
    // Paths dragged into a terminal often arrive quoted.
    let unquoted = answer.trim_matches(|c| c == '"' || c == '\'');
    Some(PathBuf::from(unquoted))
}

/// Result of resolving a missing input path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one candidate existed and was used without asking.
    Inferred(PathBuf),
    Chosen(PathBuf),
    /// The picker ran but the user chose nothing.
    NotChosen,
    /// Nothing to infer and no picker available.
    Unavailable,
}

pub fn resolve_input(
    candidates: &[PathBuf],
    picker: Option<&mut dyn InputPicker>,
) -> anyhow::Result<Resolution> {
    if let [only] = candidates {
        info!("Using the only chat log found: {}", only.display());
        return Ok(Resolution::Inferred(only.clone()));
    }
    let Some(picker) = picker else {
        return Ok(Resolution::Unavailable);
    };
    Ok(picker
        .pick(candidates)?
        .map_or(Resolution::NotChosen, Resolution::Chosen))
}

/// Files in `dir` whose names match `pattern`, ignoring case, sorted by name.
pub fn find_candidates(dir: &Path, pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = Pattern::new(pattern)
        .map_err(|e| anyhow::anyhow!("Invalid candidate glob {pattern:?}: {e}"))?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if path.is_file() && pattern.matches_with(&name, options) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("petstat_{tag}_{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn pick_with(answer: &str, candidates: &[PathBuf]) -> (Option<PathBuf>, String) {
        let mut out = Vec::new();
        let mut picker = TerminalPicker::new(Cursor::new(answer.as_bytes()), &mut out);
        let picked = picker.pick(candidates).unwrap();
        (picked, String::from_utf8(out).unwrap())
    }

    #[test]
    fn finds_candidates_case_insensitively() {
        let dir = temp_dir("picker_find");
        for name in ["CHAT_250926.TXT", "chat_250927.txt", "notes.txt", "CHAT_old.json"] {
            std::fs::write(dir.join(name), "").unwrap();
        }
        std::fs::create_dir(dir.join("CHAT_dir.TXT")).unwrap();

        let found = find_candidates(&dir, "CHAT_*.TXT").unwrap();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["CHAT_250926.TXT", "chat_250927.txt"]);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn single_candidate_is_inferred() {
        let only = vec![PathBuf::from("CHAT_1.TXT")];
        assert_eq!(
            resolve_input(&only, None).unwrap(),
            Resolution::Inferred(PathBuf::from("CHAT_1.TXT"))
        );
    }

    #[test]
    fn no_picker_is_unavailable() {
        let many = vec![PathBuf::from("a.TXT"), PathBuf::from("b.TXT")];
        assert_eq!(resolve_input(&many, None).unwrap(), Resolution::Unavailable);
        assert_eq!(resolve_input(&[], None).unwrap(), Resolution::Unavailable);
    }

    #[test]
    fn picker_accepts_number_or_path() {
        let many = vec![PathBuf::from("a.TXT"), PathBuf::from("b.TXT")];

        let (picked, prompt) = pick_with("2\n", &many);
        assert_eq!(picked, Some(PathBuf::from("b.TXT")));
        assert!(prompt.contains("  1. a.TXT"));

        let (picked, _) = pick_with("\"C:\\logs\\CHAT_1.TXT\"\n", &many);
        assert_eq!(picked, Some(PathBuf::from("C:\\logs\\CHAT_1.TXT")));

        // Out-of-range numbers are taken as file names.
        let (picked, _) = pick_with("7\n", &many);
        assert_eq!(picked, Some(PathBuf::from("7")));
    }

    #[test]
    fn empty_answer_or_eof_chooses_nothing() {
        let many = vec![PathBuf::from("a.TXT"), PathBuf::from("b.TXT")];
        assert_eq!(pick_with("\n", &many).0, None);
        assert_eq!(pick_with("", &many).0, None);

        let mut out = Vec::new();
        let mut picker = TerminalPicker::new(Cursor::new(&b"   \n"[..]), &mut out);
        assert_eq!(
            resolve_input(&many, Some(&mut picker)).unwrap(),
            Resolution::NotChosen
        );
    }
}
