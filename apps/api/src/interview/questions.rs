//! Question normalization — turns raw model output into an ordered list of questions.
//!
//! Lines are the only delimiter. What happens to blank lines is governed by
//! [`BlankLinePolicy`], because it changes how many questions a record stores.

use std::str::FromStr;

use anyhow::anyhow;

/// How blank lines in the model output are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlankLinePolicy {
    /// Trim every line and drop the ones left empty.
    #[default]
    Drop,
    /// Keep every line verbatim, including empty ones and trailing `\r`.
    Preserve,
}

impl FromStr for BlankLinePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "preserve" => Ok(Self::Preserve),
            other => Err(anyhow!(
                "unknown QUESTION_BLANK_LINES '{other}' (expected 'drop' or 'preserve')"
            )),
        }
    }
}

/// Splits generated text into questions on line breaks.
///
/// `Preserve` is a plain split on `\n`, so it inverts `lines.join("\n")` for any
/// non-empty list of lines without `\n` in them (empty output yields `[""]`).
/// `Drop` trims each line, which also removes the `\r` of CRLF output, and
/// returns no questions for blank output.
pub fn normalize_questions(raw: &str, policy: BlankLinePolicy) -> Vec<String> {
    let lines = raw.split('\n');

    match policy {
        BlankLinePolicy::Preserve => lines.map(str::to_string).collect(),
        BlankLinePolicy::Drop => lines
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
