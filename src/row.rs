//! Provides the `Row` type: one line of a count report, split on tabs into a
//! count cell, a value cell, and zero or more annotation cells.
//!
//! Rows borrow from the report text they were split from, so building one is
//! just a `memchr` for the first tab.
use bstr::ByteSlice;
use memchr::memchr;

const TAB: u8 = b'\t';

/// Returns the `index`-th cell of `line` (counting from 1), or `None` if `line`
/// has fewer cells than that. Cell `0` doesn't exist.
#[must_use]
pub fn cell(line: &[u8], index: usize) -> Option<&[u8]> {
    let skip = index.checked_sub(1)?;
    line.split_str("\t").nth(skip)
}

/// Does `line` carry data? Lines without a tab are headers, blank lines, or
/// other noise.
#[must_use]
pub fn has_tab(line: &[u8]) -> bool {
    memchr(TAB, line).is_some()
}

/// A `Row` is a line with at least one tab. The bytes before the first tab are
/// the count cell, the bytes between the first and second tab (or end of line)
/// are the value cell, and anything after that is annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row<'data> {
    line: &'data [u8],
    tab: usize,
}

impl<'data> Row<'data> {
    /// Returns `None` for a line that has no tab.
    #[must_use]
    pub fn parse(line: &'data [u8]) -> Option<Self> {
        memchr(TAB, line).map(|tab| Row { line, tab })
    }

    /// The raw line this row was parsed from
    #[must_use]
    pub fn line(&self) -> &'data [u8] {
        self.line
    }

    /// The first cell, unparsed
    #[must_use]
    pub fn count_cell(&self) -> &'data [u8] {
        &self.line[..self.tab]
    }

    /// The count, or `None` if the count cell isn't a non-negative integer.
    #[must_use]
    pub fn count(&self) -> Option<u64> {
        parse_count(self.count_cell())
    }

    /// The second cell: the value whose count this row reports. May be empty.
    #[must_use]
    pub fn value(&self) -> &'data [u8] {
        let rest = &self.line[self.tab + 1..];
        match memchr(TAB, rest) {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    /// Cells 3 and up
    pub fn annotations(&self) -> impl Iterator<Item = &'data [u8]> {
        self.line.split_str("\t").skip(2)
    }

    /// Same as the free function `cell`, applied to this row's line
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&'data [u8]> {
        cell(self.line, index)
    }
}

/// Counts are decimal, non-negative, and may be padded with ASCII whitespace
/// (`uniq -c` right-aligns its counts).
fn parse_count(cell: &[u8]) -> Option<u64> {
    cell.trim_with(|c| c.is_ascii_whitespace()).to_str().ok()?.parse::<u64>().ok()
}
