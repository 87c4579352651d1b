//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the parsed command line: the `Args` return value's `op` field is the set operation
/// desired, `files` holds the reports to take as operands, and `exclude` the reports whose
/// values `diff` should remove.
#[must_use]
pub fn parsed() -> Args {
    Args::from(CliArgs::parse())
}

/// The parsed command line
#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    /// `op` is the set operation requested
    pub op: OpName,
    /// `files` is the list of reports from the command line
    pub files: Vec<PathBuf>,
    /// `exclude` is the list of reports given to `diff --exclude`; empty otherwise
    pub exclude: Vec<PathBuf>,
    /// `verbose` asks for debug logging on stderr
    pub verbose: bool,
}

/// Name of a set operation
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum OpName {
    /// Sum the counts of every value in any report
    Union,
    /// Keep the values present in every report
    Intersect,
    /// Keep the values present in the reports but not in the excluded reports
    Diff,
}

#[derive(Debug, Parser)]
#[command(name = "countset", version)]
/// Union, intersection and set difference of count reports: tab-separated
/// lines whose first cell is a count and second cell a value. Counts of equal
/// values are summed, and results are sorted by count, largest first.
struct CliArgs {
    #[arg(short, long, global = true)]
    /// Log what's going on to stderr (RUST_LOG overrides this)
    verbose: bool,
    #[command(subcommand)]
    op: CliOp,
}

#[derive(Debug, Subcommand)]
enum CliOp {
    /// Sum the counts of every value in any report
    Union {
        #[arg(value_name = "REPORT")]
        files: Vec<PathBuf>,
    },
    /// Keep the values present in every report, summing their counts
    Intersect {
        #[arg(value_name = "REPORT")]
        files: Vec<PathBuf>,
    },
    /// Keep the values of the reports that aren't in any excluded report
    Diff {
        #[arg(value_name = "REPORT", required = true)]
        files: Vec<PathBuf>,
        #[arg(short = 'x', long, value_name = "REPORT", required = true, num_args = 1..)]
        /// Reports whose values are removed from the result
        exclude: Vec<PathBuf>,
    },
}

impl From<CliArgs> for Args {
    fn from(parsed: CliArgs) -> Self {
        let verbose = parsed.verbose;
        let (op, files, exclude) = match parsed.op {
            CliOp::Union { files } => (OpName::Union, files, Vec::new()),
            CliOp::Intersect { files } => (OpName::Intersect, files, Vec::new()),
            CliOp::Diff { files, exclude } => (OpName::Diff, files, exclude),
        };
        Args { op, files, exclude, verbose }
    }
}
