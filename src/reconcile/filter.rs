//! Restriction-tag filtering.
//!
//! With no tags requested every entry is returned, restricted or not. Once
//! any tag is requested only entries restricted to one of those tags remain;
//! unrestricted entries drop out.

use std::collections::BTreeSet;

use super::matcher::ReportEntry;

/// A set of requested restriction tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restrictions {
    tags: BTreeSet<String>,
}

impl Restrictions {
    /// No restriction requested.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from tag strings. Blank tags are ignored.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Whether an entry carrying `tag` survives this filter.
    pub fn admits(&self, tag: Option<&str>) -> bool {
        self.is_empty() || tag.is_some_and(|t| self.contains(t))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Restrictions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tags(iter)
    }
}

/// Narrow a report to the requested restriction tags.
///
/// `None` or an empty set returns the report unchanged. Order is preserved.
pub fn apply_restriction(
    report: Vec<ReportEntry>,
    requested: Option<&Restrictions>,
) -> Vec<ReportEntry> {
    match requested {
        Some(tags) if !tags.is_empty() => report
            .into_iter()
            .filter(|row| tags.admits(row.restricted_to()))
            .collect(),
        _ => report,
    }
}
