//! Provides `Report`, the in-memory contents of one count report file.
//!
//! Loading never fails. A report that can't be read is treated as an empty
//! report, so a union over many files isn't derailed by one missing file.
use bstr::ByteSlice;
use memchr::memchr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::output::LineTerminator;
use crate::row::has_tab;

/// The decoded (UTF-8, BOM stripped) contents of a count report, plus the line
/// terminator its first line used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    contents: Vec<u8>,
    line_terminator: LineTerminator,
}

impl Report {
    /// Reads the report at `path`. If `path` doesn't name a readable file, the
    /// problem is logged and the result is an empty report.
    #[must_use]
    pub fn load(path: &Path) -> Report {
        if !path.is_file() {
            warn!(path = %path.display(), "report unavailable, treating it as empty");
            return Report::default();
        }
        match fs::read(path) {
            Ok(contents) => {
                let report = Report::from_bytes(contents);
                debug!(path = %path.display(), rows = report.rows().count(), "loaded report");
                report
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "can't read report, treating it as empty"
                );
                Report::default()
            }
        }
    }

    /// Loads each of `paths` in order
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Vec<Report> {
        paths.iter().map(|p| Report::load(p.as_ref())).collect()
    }

    /// Builds a report from raw file contents. UTF-16 (with a Byte Order Mark)
    /// is translated to UTF-8, and a UTF-8 Byte Order Mark is dropped so it
    /// can't end up glued to the first count.
    #[must_use]
    pub fn from_bytes(contents: Vec<u8>) -> Report {
        let mut contents = decode_if_utf16(contents);
        if has_bom(&contents) {
            contents = contents[BOM_BYTES.len()..].to_vec();
        }
        let line_terminator = line_terminator_of(&contents);
        Report { contents, line_terminator }
    }

    /// The report's data rows: every line containing a tab, with its line
    /// terminator removed. Other lines are dropped.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.contents.lines().filter(|line| has_tab(line))
    }

    /// `\r\n` if the report's first line ended that way, otherwise `\n`
    #[must_use]
    pub fn line_terminator(&self) -> LineTerminator {
        self.line_terminator
    }

    /// True if the report has no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows().next().is_none()
    }
}

/// The rows of the report at `path`, owned. An unavailable report has no rows.
#[must_use]
pub fn load_report(path: &Path) -> Vec<Vec<u8>> {
    Report::load(path).rows().map(<[u8]>::to_vec).collect()
}

impl From<&str> for Report {
    fn from(contents: &str) -> Self {
        Report::from_bytes(contents.as_bytes().to_vec())
    }
}

/// Paths as given on the command line, for log messages
pub(crate) fn display_paths(paths: &[PathBuf]) -> String {
    let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    names.join(" ")
}

/// Decode UTF-16 to UTF-8 if we see a UTF-16 Byte Order Mark at the beginning of `candidate`.
/// Otherwise return `candidate` unchanged
fn decode_if_utf16(candidate: Vec<u8>) -> Vec<u8> {
    // Note: `decode_without_bom_handling` changes malformed sequences to the
    // Unicode REPLACEMENT CHARACTER. The BOM itself comes through as a UTF-8
    // BOM, which `from_bytes` then strips.
    if let Some((enc, _)) = encoding_rs::Encoding::for_bom(&candidate) {
        if [encoding_rs::UTF_16LE, encoding_rs::UTF_16BE].contains(&enc) {
            let (translated, _had_malformed_sequences) =
                enc.decode_without_bom_handling(&candidate);
            return translated.into_owned().into_bytes();
        }
    }
    candidate
}

/// `\r\n` if the first line of `contents` ends with `\r\n`, and `\n` if it
/// ends just with `\n` (or is the only line and has no terminator).
fn line_terminator_of(contents: &[u8]) -> LineTerminator {
    match memchr(b'\n', contents) {
        Some(n) if n > 0 && contents[n - 1] == b'\r' => LineTerminator::CrLf,
        _ => LineTerminator::Lf,
    }
}

const BOM_0: u8 = b'\xEF';
const BOM_1: u8 = b'\xBB';
const BOM_2: u8 = b'\xBF';
const BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";
/// Does `contents` begin with a (UTF-8) Byte Order Mark?
fn has_bom(contents: &[u8]) -> bool {
    contents.len() >= 3 && contents[0] == BOM_0 && contents[1] == BOM_1 && contents[2] == BOM_2
}
