//! Provides the `Aggregate` structure, which maps each distinct line to the
//! sources it was read from.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::io::BufRead;

/// Identifies a source registered with `Aggregate::add_source`. Line records
/// store these rather than copies of the source's name.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SourceId(usize);

/// The bookkeeping for one distinct line: every source the line was read
/// from, once per occurrence, in the order the occurrences were read. The
/// line's count is the length of that list, so it is never zero.
#[derive(Clone, Debug, Default)]
pub struct LineRecord {
    sources: Vec<SourceId>,
}

impl LineRecord {
    /// The number of times the line has been seen
    #[must_use]
    pub fn count(&self) -> usize {
        self.sources.len()
    }
}

/// An `Aggregate` maps each distinct line (without its line terminator) to a
/// `LineRecord`.
/// * Keys are byte strings. Lines need not be UTF-8, and the empty line is a
///   line like any other.
/// * The map is an `IndexMap`, so keys come out in order of first appearance,
///   but nothing downstream should count on that.
/// * Source names are interned in `names`; `SourceId(n)` is `names[n]`.
#[derive(Default)]
pub struct Aggregate {
    lines: IndexMap<Vec<u8>, LineRecord, FxBuildHasher>,
    names: Vec<String>,
}

// Drops a trailing `\n` and then a trailing `\r`
fn trim_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// One entry of the report: a line seen more than once, how many times, and
/// the name of the source for each sighting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Duplicate<'a> {
    /// Number of occurrences, always at least 2
    pub count: usize,
    /// The line itself, without its terminator
    pub text: &'a [u8],
    /// One source name per occurrence, in the order read
    pub sources: Vec<&'a str>,
}

impl Aggregate {
    /// Registers a source name and returns the id to use for lines read from it
    pub fn add_source(&mut self, name: &str) -> SourceId {
        self.names.push(name.to_owned());
        SourceId(self.names.len() - 1)
    }

    /// Count one occurrence of `line`, attributed to `source`
    pub fn record_line(&mut self, source: SourceId, line: &[u8]) {
        match self.lines.get_mut(line) {
            Some(record) => record.sources.push(source),
            None => {
                self.lines.insert(line.to_vec(), LineRecord { sources: vec![source] });
            }
        }
    }

    /// Record every line of `reader`, in order.
    ///
    /// If reading fails partway through, we stop reading this source and keep
    /// what we already have, including an unterminated line that was pending
    /// when the error hit. The error is traced at debug level and otherwise
    /// dropped: a mid-read failure never reaches the caller.
    pub fn process_source(&mut self, source: SourceId, mut reader: impl BufRead) {
        let mut lines_read = 0_usize;
        let mut line = Vec::new();
        let result = loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break Ok(()),
                Ok(_) => {}
                Err(error) => {
                    if !line.is_empty() {
                        self.record_line(source, trim_terminator(&line));
                        lines_read += 1;
                    }
                    break Err(error);
                }
            }
            self.record_line(source, trim_terminator(&line));
            lines_read += 1;
        };
        let name = self.name(source);
        match result {
            Ok(()) => tracing::debug!(source = name, lines_read, "finished source"),
            Err(error) => {
                tracing::debug!(source = name, lines_read, %error, "stopped reading source");
            }
        }
    }

    /// The name registered for `source`
    #[must_use]
    pub fn name(&self, source: SourceId) -> &str {
        &self.names[source.0]
    }

    /// The record for `line`, if it has been seen at all
    #[must_use]
    pub fn get(&self, line: &[u8]) -> Option<&LineRecord> {
        self.lines.get(line)
    }

    /// Number of distinct lines seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if no lines have been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the lines seen more than once. Nothing is consumed, so calling
    /// `report` again gives the same entries.
    pub fn report(&self) -> impl Iterator<Item = Duplicate<'_>> + '_ {
        self.lines.iter().filter(|(_, record)| record.count() > 1).map(|(line, record)| Duplicate {
            count: record.count(),
            text: line.as_slice(),
            sources: record.sources.iter().map(|&id| self.name(id)).collect(),
        })
    }
}
