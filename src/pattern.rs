//! Provides `MatchPattern`, the membership test used by intersection and set
//! difference to ask "is this row's value one of these?"
use anyhow::{bail, Result};
use fxhash::FxHashSet;

use crate::row::Row;

/// A non-empty set of values. A row matches when its value cell is exactly
/// one of them. Values are compared as raw bytes, so characters like `|`, `.`
/// or `*` have no special meaning, and `cat` never matches `bobcat`.
#[derive(Clone, Debug)]
pub struct MatchPattern<'v> {
    values: FxHashSet<&'v [u8]>,
}

impl<'v> MatchPattern<'v> {
    /// Builds a pattern from `values`. An empty set of values is an error:
    /// there's nothing to match against.
    pub fn new(values: impl IntoIterator<Item = &'v [u8]>) -> Result<Self> {
        let values: FxHashSet<&'v [u8]> = values.into_iter().collect();
        if values.is_empty() {
            bail!("Can't build a match pattern from an empty set of values");
        }
        Ok(MatchPattern { values })
    }

    /// Is `value` one of the pattern's values?
    #[must_use]
    pub fn contains(&self, value: &[u8]) -> bool {
        self.values.contains(value)
    }

    /// Does the value cell of `line` belong to the pattern? A line without a
    /// tab has no value cell, so it never matches.
    #[must_use]
    pub fn matches(&self, line: &[u8]) -> bool {
        Row::parse(line).map_or(false, |row| self.contains(row.value()))
    }

    /// Number of distinct values in the pattern
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; `new` refuses to build an empty pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    fn pattern<'v>(values: &[&'v str]) -> MatchPattern<'v> {
        MatchPattern::new(values.iter().map(|v| v.as_bytes())).unwrap()
    }

    #[test]
    fn empty_value_set_is_an_error() {
        let err = MatchPattern::new(std::iter::empty()).unwrap_err();
        assert!(err.to_string().contains("empty set of values"), "got: {err}");
    }

    #[test]
    fn matches_whole_values_only() {
        let p = pattern(&["cat", "dog"]);
        assert!(p.matches(b"3\tcat"));
        assert!(p.matches(b"1\tdog\twoof"));
        assert!(!p.matches(b"3\tbobcat"));
        assert!(!p.matches(b"3\tcats"));
        assert!(!p.matches(b"3\tca"));
        assert!(!p.matches(b"3\tdog woof"));
    }

    #[test]
    fn only_the_value_cell_is_tested() {
        let p = pattern(&["cat"]);
        assert!(!p.matches(b"cat\tdog"));
        assert!(!p.matches(b"1\tdog\tcat"));
        assert!(!p.matches(b"cat"));
    }

    #[test]
    fn pattern_metacharacters_are_literal() {
        let p = pattern(&["a|b", ".*", "(x)", "c\\d"]);
        assert!(p.matches(b"1\ta|b"));
        assert!(p.matches(b"1\t.*"));
        assert!(p.matches(b"1\t(x)"));
        assert!(p.matches(b"1\tc\\d"));
        assert!(!p.matches(b"1\ta"));
        assert!(!p.matches(b"1\tb"));
        assert!(!p.matches(b"1\tanything"));
        assert!(!p.matches(b"1\tx"));
        assert!(!p.matches(b"1\tc7"));
    }

    #[test]
    fn the_empty_value_can_be_matched() {
        let p = pattern(&[""]);
        assert!(p.matches(b"5\t"));
        assert!(!p.matches(b"5\tx"));
    }

    #[test]
    fn duplicate_values_collapse() {
        let p = pattern(&["x", "x", "y"]);
        assert_eq!(p.len(), 2);
        assert!(!p.is_empty());
    }
}
