//! Turns aggregated rows back into text: `join_rows` for a single string,
//! `output_to` for a writer.
use anyhow::{Context, Result};
use bstr::BString;
use std::io;

use crate::aggregate::Counted;

/// The line terminator used on output. We copy whatever the first input
/// report used on its first line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineTerminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineTerminator {
    /// The terminator's bytes
    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineTerminator::Lf => b"\n",
            LineTerminator::CrLf => b"\r\n",
        }
    }
}

/// Joins `rows` into one string, with `terminator` between rows (not after the
/// last one). No rows gives the empty string.
#[must_use]
pub fn join_rows(rows: &[Counted], terminator: LineTerminator) -> BString {
    let mut joined = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            joined.extend_from_slice(terminator.as_bytes());
        }
        joined.extend_from_slice(&row.to_line());
    }
    BString::from(joined)
}

/// Writes each of `rows` followed by `terminator`, then flushes.
pub fn output_to(
    rows: &[Counted],
    terminator: LineTerminator,
    mut out: impl io::Write,
) -> Result<()> {
    for row in rows {
        out.write_all(&row.to_line()).context("Can't write result")?;
        out.write_all(terminator.as_bytes()).context("Can't write result")?;
    }
    out.flush().context("Can't flush output")?;
    Ok(())
}
