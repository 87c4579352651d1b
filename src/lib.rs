//! Set operations on count reports. A count report is a text file whose data
//! lines look like `count<TAB>value`, the sort of thing `sort | uniq -c`
//! produces once its padding is turned into a tab.
//!
//! The `aggregate` function is the kernel of the library: it merges rows by
//! value, sums their counts, and sorts the result by count (largest first) and
//! then by value. `operations` builds union, intersection, and set difference
//! on top of it, the `report` module hides file I/O details, and the `args`
//! module parses the command line.
//!
//! Values are compared as raw bytes, and ties on count are broken by byte
//! order, so results don't depend on the locale.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![deny(missing_docs)]

pub mod aggregate;
pub mod args;
pub mod operations;
pub mod output;
pub mod pattern;
pub mod report;
pub mod row;

pub use crate::aggregate::{aggregate, aggregate_with_coverage, Counted};
pub use crate::operations::{
    calculate, difference, difference_reports, difference_rows, intersect, intersect_reports,
    intersect_rows, union, union_reports,
};
pub use crate::output::{join_rows, output_to, LineTerminator};
pub use crate::pattern::MatchPattern;
pub use crate::report::{load_report, Report};
pub use crate::row::{cell, Row};
