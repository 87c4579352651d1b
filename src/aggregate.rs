//! Houses the aggregator, the engine under every set operation: group rows by
//! value, sum their counts, and sort the result.
use anyhow::Result;
use bstr::ByteSlice;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

use crate::pattern::MatchPattern;
use crate::row::Row;

/// An aggregated row: a value and the sum of the valid counts of every input
/// row carrying that value. Values from the input are borrowed when possible.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Counted<'data> {
    /// Sum of the valid counts
    pub count: u64,
    /// The value cell shared by the summed rows
    pub value: Cow<'data, [u8]>,
}

impl<'data> Counted<'data> {
    /// Creates a `Counted` borrowing `value`
    #[must_use]
    pub fn new(count: u64, value: &'data [u8]) -> Self {
        Counted { count, value: Cow::Borrowed(value) }
    }

    /// Detach from the input the value was borrowed from
    #[must_use]
    pub fn into_owned(self) -> Counted<'static> {
        Counted { count: self.count, value: Cow::Owned(self.value.into_owned()) }
    }

    /// The two-cell line `count\tvalue`, without a line terminator
    #[must_use]
    pub fn to_line(&self) -> Vec<u8> {
        let mut line = self.count.to_string().into_bytes();
        line.push(b'\t');
        line.extend_from_slice(&self.value);
        line
    }

    /// The canonical output order: count descending, then value ascending
    /// byte by byte. No two distinct values compare equal, so the order is
    /// total.
    #[must_use]
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        other.count.cmp(&self.count).then_with(|| self.value.cmp(&other.value))
    }
}

impl fmt::Display for Counted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.count, self.value.as_bstr())
    }
}

/// Bookkeeping for one distinct value while aggregating. `sum` stays `None`
/// until a row with a valid count turns up; `rows` counts every row seen,
/// valid count or not.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Tally {
    sum: Option<u64>,
    rows: usize,
}

impl Tally {
    fn add(&mut self, count: Option<u64>) {
        self.rows += 1;
        if let Some(n) = count {
            self.sum = Some(self.sum.map_or(n, |sum| sum.saturating_add(n)));
        }
    }
}

type TallySet<'data> = IndexMap<&'data [u8], Tally, FxBuildHasher>;

fn tally<'data>(rows: impl IntoIterator<Item = &'data [u8]>) -> TallySet<'data> {
    let mut set = TallySet::default();
    for row in rows.into_iter().filter_map(Row::parse) {
        let count = row.count();
        if count.is_none() {
            trace!(row = %row.line().as_bstr(), "ignoring invalid count");
        }
        set.entry(row.value()).or_default().add(count);
    }
    set
}

/// Merges `rows` by value. Each distinct value becomes one `Counted` whose
/// count is the sum of the valid counts of the rows carrying it, and the
/// result is sorted by count (largest first), then by value.
///
/// * Lines without a tab are skipped.
/// * Rows whose count isn't a non-negative integer add nothing to the sum.
/// * A value with no valid count at all is left out of the result.
/// * No rows in, no rows out.
pub fn aggregate<'data>(rows: impl IntoIterator<Item = &'data [u8]>) -> Vec<Counted<'data>> {
    finish(tally(rows))
}

fn finish(set: TallySet<'_>) -> Vec<Counted<'_>> {
    let mut result: Vec<Counted> = set
        .into_iter()
        .filter_map(|(value, tally)| tally.sum.map(|sum| Counted::new(sum, value)))
        .collect();
    result.sort_unstable_by(Counted::canonical_cmp);
    result
}

/// Like `aggregate`, but first restricts `rows` to values that occur in
/// exactly `coverage` rows. Intersection uses this with `coverage` equal to
/// the number of reports, so it keeps the values seen once per report.
///
/// The occurrence count is of rows, not of reports: a value repeated within
/// one report counts once for each repetition.
pub fn aggregate_with_coverage<'data>(
    rows: impl IntoIterator<Item = &'data [u8]>,
    coverage: usize,
) -> Result<Vec<Counted<'data>>> {
    let rows: Vec<&'data [u8]> = rows.into_iter().collect();
    let occurrences = tally(rows.iter().copied());
    let covered = occurrences.iter().filter(|(_, t)| t.rows == coverage).map(|(value, _)| *value);
    let covered: Vec<&'data [u8]> = covered.collect();
    if covered.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = MatchPattern::new(covered)?;
    Ok(aggregate(rows.into_iter().filter(|line| pattern.matches(line))))
}
