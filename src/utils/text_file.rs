//! Labeled text files with one example per line.
//!
//! Each line holds an integer class label followed by the example text, separated by whitespace
//! (a space or a tab). The text is every token after the label, re-joined with single spaces.
//!
//! ```text
//! 1	the rock is destined to be the 21st century's new conan
//! 0	simplistic , silly and tedious .
//! ```

use std::{num::IntErrorKind, path::Path};

use log::debug;

use crate::datasets::{DatasetError, Sample};

use super::files::read_lines_from;

/// Parse every line of the file at `path` after the first `offset` lines.
///
/// Skipped lines are never parsed. An `offset` past the end of the file yields no samples.
pub async fn load_text_file<L>(path: &Path, offset: usize) -> Result<Vec<Sample<L>>, DatasetError>
where
    L: TryFrom<i64>,
{
    let lines = read_lines_from(path, offset)
        .await
        .map_err(|source| DatasetError::from_io(path, source))?;

    let samples = lines
        .iter()
        .enumerate()
        .map(|(i, line)| parse_line(offset + i + 1, line))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Parsed {} samples from {} starting at line {}",
        samples.len(),
        path.display(),
        offset.saturating_add(1)
    );

    Ok(samples)
}

/// Parse a single `label text...` line. `line` is the 1-based line number, used for errors.
pub fn parse_line<L>(line: usize, raw: &str) -> Result<Sample<L>, ParseError>
where
    L: TryFrom<i64>,
{
    let mut tokens = raw.split_whitespace();

    let token = tokens.next().ok_or(ParseError::MissingLabel { line })?;

    let out_of_range = || ParseError::LabelOutOfRange {
        line,
        token: token.to_string(),
    };

    let value = token.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => ParseError::InvalidLabel {
            line,
            token: token.to_string(),
        },
    })?;

    let label = L::try_from(value).map_err(|_| out_of_range())?;

    Ok(Sample::new(tokens.collect::<Vec<_>>().join(" "), label))
}

/// Parse Error
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is blank
    #[error("line {line}: missing label")]
    MissingLabel {
        /// 1-based line number
        line: usize,
    },

    /// The first token is not an integer
    #[error("line {line}: label {token:?} is not an integer")]
    InvalidLabel {
        /// 1-based line number
        line: usize,
        /// The offending token
        token: String,
    },

    /// The label is an integer outside the dataset's classes
    #[error("line {line}: label {token} is not a known class")]
    LabelOutOfRange {
        /// 1-based line number
        line: usize,
        /// The offending token
        token: String,
    },
}
