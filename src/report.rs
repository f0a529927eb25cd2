//! Writes the `Aggregate`'s report, one line per duplicated line:
//! the count, a tab, the line itself, a tab, and the names of the sources it
//! came from in square brackets, e.g. `3\tx\t[a.txt a.txt b.txt]`.
use anyhow::Result;
use std::io;

use crate::aggregate::Duplicate;

/// Writes each of `duplicates` to `out` and flushes it.
pub fn write_report<'a>(
    duplicates: impl IntoIterator<Item = Duplicate<'a>>,
    mut out: impl io::Write,
) -> Result<()> {
    for duplicate in duplicates {
        write_one(&duplicate, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_one(duplicate: &Duplicate, out: &mut impl io::Write) -> io::Result<()> {
    write!(out, "{}\t", duplicate.count)?;
    out.write_all(duplicate.text)?;
    write!(out, "\t[{}]", duplicate.sources.join(" "))?;
    out.write_all(b"\n")
}
