//! Passage selection against the current working text.
//!
//! Two input forms are accepted: a 1-based inclusive line range such as
//! `5-8`, or a literal pasted passage. Resolution always yields byte
//! offsets of the first occurrence so the later splice touches exactly
//! the selected span.

use std::fmt;

/// Parsed but not yet resolved user selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionInput {
    LineRange { start: usize, end: usize },
    Literal(String),
}

impl SelectionInput {
    /// Classifies raw input. Anything shaped like `N-M` is a line range;
    /// everything else is a literal passage that must meet the minimum
    /// length so short fragments do not match incidental words.
    pub fn parse(raw: &str, min_literal: usize) -> Result<Self, SelectionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::Empty);
        }
        if let Some((left, right)) = trimmed.split_once('-') {
            if let (Ok(start), Ok(end)) =
                (left.trim().parse::<usize>(), right.trim().parse::<usize>())
            {
                if start == 0 || end < start {
                    return Err(SelectionError::MalformedRange);
                }
                return Ok(Self::LineRange { start, end });
            }
        }
        if trimmed.chars().count() < min_literal {
            return Err(SelectionError::TooShort { min: min_literal });
        }
        Ok(Self::Literal(trimmed.to_string()))
    }
}

/// A resolved contiguous span of the working text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    pub text: String,
    /// Byte offset of the span start in the working text.
    pub start: usize,
    /// Byte offset one past the span end.
    pub end: usize,
}

/// Recoverable selection failures; the interactive loop re-prompts on these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    Empty,
    MalformedRange,
    OutOfBounds { lines: usize },
    TooShort { min: usize },
    NotFound,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Selection is empty."),
            Self::MalformedRange => {
                write!(f, "Invalid line range. Use the form START-END, e.g. 5-8.")
            }
            Self::OutOfBounds { lines } => {
                write!(f, "Line range out of bounds; the essay has {lines} lines.")
            }
            Self::TooShort { min } => write!(
                f,
                "Pasted passages must be at least {min} characters; use a line range for short spans."
            ),
            Self::NotFound => write!(f, "Text not found in the essay. Check your selection."),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Resolves a selection to byte offsets in `working`.
pub fn resolve_selection(
    working: &str,
    input: &SelectionInput,
) -> Result<Passage, SelectionError> {
    match input {
        SelectionInput::LineRange { start, end } => {
            let lines: Vec<&str> = working.split('\n').collect();
            if *start == 0 || *end > lines.len() || start > end {
                return Err(SelectionError::OutOfBounds { lines: lines.len() });
            }
            // Byte offset of the first selected line: preceding lines plus
            // one separator each.
            let offset: usize = lines[..start - 1]
                .iter()
                .map(|line| line.len() + 1)
                .sum();
            let text = lines[start - 1..*end].join("\n");
            Ok(Passage {
                start: offset,
                end: offset + text.len(),
                text,
            })
        }
        SelectionInput::Literal(literal) => {
            let start = working.find(literal).ok_or(SelectionError::NotFound)?;
            Ok(Passage {
                text: literal.clone(),
                start,
                end: start + literal.len(),
            })
        }
    }
}
