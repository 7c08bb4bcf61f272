//! Text decoding for chat logs of unknown encoding.
//!
//! Game clients have written logs as UTF-8 (with and without BOM), CP949 and
//! UTF-16 over the years. Candidates are tried strictly in a fixed order; the
//! order must not change or older logs may decode differently.

use encoding_rs::{EUC_KR, Encoding, UTF_8, UTF_16BE, UTF_16LE};
use petstat_core::{Error, Result};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info, warn};

/// Label reported when every candidate failed and replacement was used.
pub const LOSSY_LABEL: &str = "utf-8*replace";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Utf8Sig,
    Utf8,
    Cp949,
    EucKr,
    Utf16,
    Utf16Le,
    Utf16Be,
}

impl Candidate {
    const ORDER: [Self; 7] = [
        Self::Utf8Sig,
        Self::Utf8,
        Self::Cp949,
        Self::EucKr,
        Self::Utf16,
        Self::Utf16Le,
        Self::Utf16Be,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Utf8Sig => "utf-8-sig",
            Self::Utf8 => "utf-8",
            Self::Cp949 => "cp949",
            Self::EucKr => "euc-kr",
            Self::Utf16 => "utf-16",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
        }
    }

    fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        let (encoding, payload): (&'static Encoding, &[u8]) = match self {
            Self::Utf8Sig => (UTF_8, bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)),
            Self::Utf8 => (UTF_8, bytes),
            // WHATWG EUC-KR is the Windows-949 superset.
            Self::Cp949 | Self::EucKr => (EUC_KR, bytes),
            Self::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => (UTF_16BE, rest),
                [0xFF, 0xFE, rest @ ..] => (UTF_16LE, rest),
                _ => (UTF_16LE, bytes),
            },
            Self::Utf16Le => (UTF_16LE, bytes),
            Self::Utf16Be => (UTF_16BE, bytes),
        };
        encoding.decode_without_bom_handling_and_without_replacement(payload)
    }
}

/// Decoded text plus the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static str,
    /// True when no candidate decoded cleanly and U+FFFD was substituted.
    pub lossy: bool,
}

/// Decode `bytes` with the first candidate encoding that accepts them.
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    for candidate in Candidate::ORDER {
        if let Some(text) = candidate.decode(bytes) {
            debug!("Decoded {} bytes as {}", bytes.len(), candidate.label());
            return DecodedText {
                text: text.into_owned(),
                encoding: candidate.label(),
                lossy: false,
            };
        }
    }

    warn!("No candidate encoding fits; decoding as UTF-8 with replacement");
    let (text, _) = UTF_8.decode_without_bom_handling(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding: LOSSY_LABEL,
        lossy: true,
    }
}

/// Read a whole file and decode it. Only the read itself can fail.
pub fn read_text_auto(path: &Path) -> Result<DecodedText> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let decoded = decode_bytes(&bytes);
    info!("Read {} using {}", path.display(), decoded.encoding);
    Ok(decoded)
}
