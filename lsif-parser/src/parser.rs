use lsif_type::{schema, Entry, Violation};
use serde_json::Value;
use std::iter::Enumerate;
use std::str::Lines;
use tracing::{debug, warn};

/// Why a single line of a dump was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("schema violation: {0}")]
    Schema(#[from] Violation),
    #[error("element does not narrow into its variant: {0}")]
    Narrow(#[source] serde_json::Error),
}

/// A decoding error that occurred on one line of the dump.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct Error {
    /// 1-based line number.
    pub line: usize,
    pub kind: ErrorKind,
}

/// Decode a single element.
pub fn decode_line(text: &str) -> Result<Entry, ErrorKind> {
    let value: Value = serde_json::from_str(text).map_err(ErrorKind::Syntax)?;
    schema::check(&value)?;
    serde_json::from_value(value).map_err(ErrorKind::Narrow)
}

/// Decode a whole dump.
///
/// Decoding does not stop at malformed lines. Instead errors are collected
/// with their line numbers, and the remaining lines are still decoded, so a
/// caller can report every problem of a dump at once. Use
/// [`Parse::into_result`] to reject the dump on its first error.
pub fn parse(text: &str) -> Parse {
    Parser::new(text).parse()
}

/// The result of decoding a dump.
#[derive(Debug, Default)]
pub struct Parse {
    /// Well-formed elements in dump order.
    pub entries: Vec<Entry>,
    /// Errors in line order.
    pub errors: Vec<Error>,
}

impl Parse {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The decoded elements, or the first error.
    pub fn into_result(self) -> Result<Vec<Entry>, Error> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.entries),
        }
    }
}

struct Parser<'p> {
    lines: Enumerate<Lines<'p>>,
    entries: Vec<Entry>,
    errors: Vec<Error>,
}

impl<'p> Parser<'p> {
    fn new(source: &'p str) -> Self {
        Parser {
            lines: source.lines().enumerate(),
            entries: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn parse(mut self) -> Parse {
        while let Some((index, line)) = self.next_line() {
            match decode_line(line) {
                Ok(entry) => self.entries.push(entry),
                Err(kind) => self.error(index + 1, kind),
            }
        }
        debug!(
            entries = self.entries.len(),
            errors = self.errors.len(),
            "decoded dump"
        );
        Parse {
            entries: self.entries,
            errors: self.errors,
        }
    }

    /// Next non-blank line with its 0-based index.
    fn next_line(&mut self) -> Option<(usize, &'p str)> {
        self.lines.find(|(_, line)| !line.trim().is_empty())
    }

    fn error(&mut self, line: usize, kind: ErrorKind) {
        warn!(line, error = %kind, "rejected element");
        self.errors.push(Error { line, kind });
    }
}
