//! LDIF line classifier and entry aggregator

use crate::table::{Directory, Entry, DN};

/// Separator between an attribute name and its value
const DELIMITER: &str = ": ";

/// How a single input line is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Starts with `#`
    Comment,
    /// `key: value`, split on the first delimiter only
    Data { key: &'a str, value: &'a str },
    /// Blank, continuation or otherwise unparseable
    Ignored,
}

/// Classify one line of LDIF
pub fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with('#') {
        return LineKind::Comment;
    }

    match line.split_once(DELIMITER) {
        Some((key, value)) if !key.is_empty() => LineKind::Data { key, value },
        _ => LineKind::Ignored,
    }
}

/// Fold state: the entry being built plus every entry closed so far
#[derive(Debug, Default)]
struct Aggregator {
    current: Entry,
    closed: Vec<Entry>,
}

impl Aggregator {
    fn push(mut self, line: &str) -> Self {
        match classify(line) {
            LineKind::Comment => {}
            LineKind::Ignored => tracing::trace!(line, "dropping unparseable line"),
            LineKind::Data { key, value } if key == DN => {
                if !self.current.is_empty() {
                    self.closed.push(std::mem::take(&mut self.current));
                }
                self.current.insert(DN, value);
            }
            LineKind::Data { key, value } => {
                if self.current.contains(DN) {
                    self.current.insert(key, value);
                } else {
                    tracing::debug!(key, "dropping attribute outside of an entry");
                }
            }
        }
        self
    }

    fn finish(mut self) -> Vec<Entry> {
        // The trailing entry is always kept, even when empty, so the row
        // count is always one more than the number of closed entries.
        self.closed.push(self.current);
        self.closed
    }
}

/// Group lines into entries and collect the union of their attribute names
pub fn parse_lines<I, S>(lines: I) -> Directory
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let entries = lines
        .into_iter()
        .fold(Aggregator::default(), |acc, line| acc.push(line.as_ref()))
        .finish();

    tracing::debug!(entries = entries.len(), "parsed entries");
    Directory::new(entries)
}

/// Parse LDIF from a string (useful for testing)
pub fn parse_str(content: &str) -> Directory {
    parse_lines(content.lines())
}
