//! Houses the set operations, and the `calculate` function that runs one of
//! them on files named on the command line.
//!
//! Every operation ends with `aggregate`, so every result has unique values,
//! summed counts, and the canonical order (count descending, then value).
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::aggregate::{aggregate, aggregate_with_coverage, Counted};
use crate::args::OpName;
use crate::output::{output_to, LineTerminator};
use crate::pattern::MatchPattern;
use crate::report::{display_paths, Report};

/// Loads and runs the set operation named by `operation`, then writes the
/// result to `out`:
///
/// * `OpName::Union` sums the counts of every value in any of `files`,
/// * `OpName::Intersect` keeps the values found in every one of `files`, and
/// * `OpName::Diff` keeps the values of `files` not found in any of `exclude`.
///
/// `exclude` is ignored except by `Diff`. Output uses the line terminator of
/// the first file.
pub fn calculate(
    operation: OpName,
    files: &[PathBuf],
    exclude: &[PathBuf],
    out: impl io::Write,
) -> Result<()> {
    let reports = Report::load_all(files);
    let terminator = reports.first().map_or(LineTerminator::default(), Report::line_terminator);

    let result = match operation {
        OpName::Union => union(&reports),
        OpName::Intersect => intersect(&reports)?,
        OpName::Diff => {
            let excluded = Report::load_all(exclude);
            debug!(excluded = %display_paths(exclude), "diff");
            difference(&reports, &excluded)?
        }
    };
    debug!(?operation, files = %display_paths(files), values = result.len(), "calculated");
    output_to(&result, terminator, out)
}

/// Union of `reports`: all their rows, merged by value.
#[must_use]
pub fn union(reports: &[Report]) -> Vec<Counted<'_>> {
    aggregate(reports.iter().flat_map(Report::rows))
}

/// Intersection of `reports`. See `intersect_rows`.
pub fn intersect(reports: &[Report]) -> Result<Vec<Counted<'_>>> {
    intersect_rows(reports.iter().map(Report::rows))
}

/// Set difference: the union of `included`, minus every value in the union of
/// `excluded`.
pub fn difference<'r>(included: &'r [Report], excluded: &[Report]) -> Result<Vec<Counted<'r>>> {
    difference_rows(
        included.iter().flat_map(Report::rows),
        excluded.iter().flat_map(Report::rows),
    )
}

/// Pools the rows of every operand (each operand being the rows of one
/// report), keeps the values whose number of rows in the pool equals the
/// number of operands, and aggregates the rows carrying those values.
///
/// When no operand repeats a value, that's exactly the values present in
/// every operand. A value repeated within an operand is counted once per
/// row, so duplicates can push a value over (or up to) the operand count.
pub fn intersect_rows<'data, O>(
    operands: impl IntoIterator<Item = O>,
) -> Result<Vec<Counted<'data>>>
where
    O: IntoIterator<Item = &'data [u8]>,
{
    let mut operand_count = 0_usize;
    let mut pool = Vec::new();
    for operand in operands {
        operand_count += 1;
        pool.extend(operand);
    }
    aggregate_with_coverage(pool, operand_count)
}

/// Aggregates `included` and `excluded` separately, then drops every
/// aggregated row of `included` whose value appears in aggregated `excluded`.
/// If `excluded` has no values, the result is just aggregated `included`.
pub fn difference_rows<'data, 'x>(
    included: impl IntoIterator<Item = &'data [u8]>,
    excluded: impl IntoIterator<Item = &'x [u8]>,
) -> Result<Vec<Counted<'data>>> {
    let mut kept = aggregate(included);
    let excluded = aggregate(excluded);
    if excluded.is_empty() {
        return Ok(kept);
    }
    let pattern = MatchPattern::new(excluded.iter().map(|c| &*c.value))?;
    kept.retain(|c| !pattern.contains(&c.value));
    Ok(kept)
}

/// Loads `paths` and returns their union. Missing files count as empty.
#[must_use]
pub fn union_reports<P: AsRef<Path>>(paths: &[P]) -> Vec<Counted<'static>> {
    owned(union(&Report::load_all(paths)))
}

/// Loads `paths` and returns their intersection. Missing files count as
/// empty, so a single missing file empties the intersection.
pub fn intersect_reports<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Counted<'static>>> {
    Ok(owned(intersect(&Report::load_all(paths))?))
}

/// Loads both sides and returns the union of `included` minus the values in
/// the union of `excluded`. Missing files count as empty.
pub fn difference_reports<P: AsRef<Path>, Q: AsRef<Path>>(
    included: &[P],
    excluded: &[Q],
) -> Result<Vec<Counted<'static>>> {
    let included = Report::load_all(included);
    let excluded = Report::load_all(excluded);
    Ok(owned(difference(&included, &excluded)?))
}

fn owned(rows: Vec<Counted>) -> Vec<Counted<'static>> {
    rows.into_iter().map(Counted::into_owned).collect()
}
