//! Line patterns for pet search announcements.
//!
//! The defaults match the Korean client's `[알림]` system messages. They can be
//! replaced through configuration for other locales, as long as the required
//! named groups are present.

use petstat_core::{Error, Result, StatBlock, StatKind};
use regex::{Captures, Regex};
use std::borrow::Cow;
use serde::{Deserialize, Serialize};

/// Named group carrying the pet name in the header pattern.
pub const NAME_GROUP: &str = "name";

/// Raw pattern strings, one per line kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
    /// Header line naming the pet, e.g. `[알림][파베로스]페트 검색 결과 입니다.`
    #[serde(default = "PatternSet::default_header")]
    pub header: String,

    /// Level 1 stats, e.g. `[알림]√초기 : 레벨 1, 내구력 55.08, 공격력 11.90, 방어력 6.93, 순발력 9.00`
    #[serde(default = "PatternSet::default_initial")]
    pub initial: String,

    /// Growth stats, e.g. `[알림]√성장 : 내구력 9.98 공격력 2.16, 방어력 1.26, 순발력 1.63, (…)`
    #[serde(default = "PatternSet::default_growth")]
    pub growth: String,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            header: Self::default_header(),
            initial: Self::default_initial(),
            growth: Self::default_growth(),
        }
    }
}

impl PatternSet {
    fn default_header() -> String {
        r"^\[알림\]\[(?P<name>.+?)\]\s*페트\s*검색\s*결과".to_string()
    }

    fn default_initial() -> String {
        concat!(
            r"^\[알림\]\s*√초기\s*:\s*레벨\s*1[^,]*,",
            r"\s*내구력\s*(?P<hp>\d+(?:\.\d+)?)\s*,",
            r"\s*공격력\s*(?P<atk>\d+(?:\.\d+)?)\s*,",
            r"\s*방어력\s*(?P<def>\d+(?:\.\d+)?)\s*,",
            r"\s*순발력\s*(?P<agi>\d+(?:\.\d+)?)",
        )
        .to_string()
    }

    fn default_growth() -> String {
        // The client omits the comma after the hp value on some builds.
        concat!(
            r"^\[알림\]\s*√성장\s*:",
            r"\s*내구력\s*(?P<hp>\d+(?:\.\d+)?)\s*[,]?",
            r"\s*공격력\s*(?P<atk>\d+(?:\.\d+)?)\s*,",
            r"\s*방어력\s*(?P<def>\d+(?:\.\d+)?)\s*,",
            r"\s*순발력\s*(?P<agi>\d+(?:\.\d+)?)",
        )
        .to_string()
    }

    /// Compile and validate all three patterns.
    pub fn build(&self) -> Result<CompiledPatterns> {
        Ok(CompiledPatterns {
            header: compile("header", &self.header, &[NAME_GROUP])?,
            initial: compile("initial", &self.initial, &StatBlock::FIELDS)?,
            growth: compile("growth", &self.growth, &StatBlock::FIELDS)?,
            digit: compile("digit", r"^\d$", &[])?,
        })
    }
}

fn compile(kind: &str, pattern: &str, required: &[&str]) -> Result<Regex> {
    let re = Regex::new(pattern).map_err(|e| Error::Pattern(format!("{kind}: {e}")))?;
    for group in required {
        if !re.capture_names().flatten().any(|name| name == *group) {
            return Err(Error::Pattern(format!(
                "{kind}: missing named group `{group}`"
            )));
        }
    }
    Ok(re)
}

/// Compiled, validated patterns.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    header: Regex,
    initial: Regex,
    growth: Regex,
    /// Any Unicode decimal digit, the same class `\d` matches in the patterns.
    digit: Regex,
}

impl CompiledPatterns {
    /// The trimmed pet name if `line` is a header line.
    #[must_use]
    pub fn header_name<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.header
            .captures(line)
            .and_then(|caps| caps.name(NAME_GROUP))
            .map(|m| m.as_str().trim())
    }

    /// Parse the stats of `kind` from `line`, if it is such a line.
    ///
    /// `line_no` is 1-based and only used for error reporting.
    pub fn stats(&self, kind: StatKind, line: &str, line_no: usize) -> Result<Option<StatBlock>> {
        let re = match kind {
            StatKind::Initial => &self.initial,
            StatKind::Growth => &self.growth,
        };
        re.captures(line)
            .map(|caps| self.stat_block(&caps, line_no))
            .transpose()
    }

    fn stat_block(&self, caps: &Captures<'_>, line_no: usize) -> Result<StatBlock> {
        let field = |name: &'static str| -> Result<f64> {
            let value = caps.name(name).map_or("", |m| m.as_str());
            self.ascii_digits(value)
                .parse()
                .map_err(|_| Error::InvalidNumber {
                    line: line_no,
                    field: name,
                    value: value.to_string(),
                })
        };
        Ok(StatBlock::new(
            field("hp")?,
            field("atk")?,
            field("def")?,
            field("agi")?,
        ))
    }

    /// Rewrite every non-ASCII decimal digit in `value` as its ASCII form.
    ///
    /// Unicode encodes each decimal digit set as a contiguous run starting at
    /// zero, and adjacent sets are always complete, so a digit's value is its
    /// distance from the start of its run modulo ten.
    fn ascii_digits<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if value.is_ascii() {
            return Cow::Borrowed(value);
        }
        let is_digit = |c: char| self.digit.is_match(c.encode_utf8(&mut [0; 4]));
        value
            .chars()
            .map(|c| {
                if c.is_ascii() || !is_digit(c) {
                    return c;
                }
                let mut start = u32::from(c);
                while start
                    .checked_sub(1)
                    .and_then(char::from_u32)
                    .is_some_and(is_digit)
                {
                    start -= 1;
                }
                char::from_digit((u32::from(c) - start) % 10, 10).unwrap_or(c)
            })
            .collect::<String>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> CompiledPatterns {
        PatternSet::default()
            .build()
            .expect("default patterns should build")
    }

    #[test]
    fn header_captures_trimmed_name() {
        let patterns = defaults();
        assert_eq!(
            patterns.header_name("[알림][파베로스]페트 검색 결과 입니다."),
            Some("파베로스")
        );
        assert_eq!(
            patterns.header_name("[알림][ 우르 ] 페트  검색 결과"),
            Some("우르")
        );
        assert_eq!(patterns.header_name("  [알림][파베로스]페트 검색 결과"), None);
        assert_eq!(patterns.header_name("[알림][파베로스]펫 정보"), None);
    }

    #[test]
    fn initial_line_parses_four_fields() {
        let patterns = defaults();
        let line = "[알림]√초기 : 레벨 1, 내구력 55.08, 공격력 11.90, 방어력 6.93, 순발력 9.00";
        let block = patterns
            .stats(StatKind::Initial, line, 1)
            .expect("numbers should parse");
        assert_eq!(block, Some(StatBlock::new(55.08, 11.9, 6.93, 9.0)));
        assert_eq!(
            patterns.stats(StatKind::Growth, line, 1).expect("no error"),
            None
        );
    }

    #[test]
    fn growth_line_tolerates_missing_comma() {
        let patterns = defaults();
        let line = "[알림]√성장 : 내구력 9.98 공격력 2.16, 방어력 1.26, 순발력 1.63, (…)";
        let block = patterns
            .stats(StatKind::Growth, line, 1)
            .expect("numbers should parse");
        assert_eq!(block, Some(StatBlock::new(9.98, 2.16, 1.26, 1.63)));
    }

    #[test]
    fn unicode_digits_parse_as_ascii() {
        let patterns = defaults();
        let line = "[알림]√성장 : 내구력 ٥٥, 공격력 ２.５, 방어력 𝟏, 순발력 ১";
        let block = patterns
            .stats(StatKind::Growth, line, 7)
            .expect("unicode digits should parse");
        assert_eq!(block, Some(StatBlock::new(55.0, 2.5, 1.0, 1.0)));
    }

    #[test]
    fn ascii_digits_maps_each_digit_set() {
        let patterns = defaults();
        assert!(matches!(patterns.ascii_digits("12.5"), Cow::Borrowed("12.5")));
        assert_eq!(patterns.ascii_digits("٩"), "9");
        assert_eq!(patterns.ascii_digits("۱۲"), "12");
        assert_eq!(patterns.ascii_digits("０.９"), "0.9");
        // Mathematical digits are five complete sets back to back.
        assert_eq!(patterns.ascii_digits("𝟎𝟗𝟘𝟡𝟿"), "09099");
        assert_eq!(patterns.ascii_digits("x½"), "x½");
    }

    #[test]
    fn unparsable_capture_is_reported() {
        let set = PatternSet {
            initial: r"^I (?P<hp>\S+) (?P<atk>\S+) (?P<def>\S+) (?P<agi>\S+)$".to_string(),
            ..PatternSet::default()
        };
        let patterns = set.build().expect("patterns should build");
        let err = patterns
            .stats(StatKind::Initial, "I 1 2.5 3 n/a", 7)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidNumber { line: 7, field: "agi", ref value } if value == "n/a"
        ));
    }

    #[test]
    fn missing_named_group_is_rejected() {
        let set = PatternSet {
            header: r"^\[(.+)\]".to_string(),
            ..PatternSet::default()
        };
        let err = set.build().unwrap_err();
        assert!(err.to_string().contains("missing named group `name`"));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let set = PatternSet {
            growth: r"(?P<hp>\d+".to_string(),
            ..PatternSet::default()
        };
        assert!(matches!(set.build(), Err(Error::Pattern(_))));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let set: PatternSet = serde_json::from_str(r#"{"header": "^== (?P<name>.+) ==$"}"#)
            .expect("valid JSON should deserialize");
        assert_eq!(set.header, "^== (?P<name>.+) ==$");
        assert_eq!(set.initial, PatternSet::default().initial);

        let patterns = set.build().expect("patterns should build");
        assert_eq!(patterns.header_name("== Rex =="), Some("Rex"));
    }
}
