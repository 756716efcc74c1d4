//! Advisory cross-reference checks.
//!
//! Assembly passes structure through without comparing sidebar prefixes
//! against navigation targets. These checks run afterwards and report
//! authoring defects without rejecting the configuration.

use std::collections::HashSet;
use std::fmt;

use crate::assemble::SiteConfiguration;

/// Authoring defect found by [`check_references`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceIssue {
    /// No navigation target falls under this sidebar prefix.
    DanglingSidebar { prefix: String },
    /// Two top-level navigation items share a label.
    DuplicateNavLabel { label: String },
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingSidebar { prefix } => {
                write!(f, "sidebar {prefix:?} has no navigation entry under it")
            }
            Self::DuplicateNavLabel { label } => {
                write!(f, "navigation label {label:?} is used more than once")
            }
        }
    }
}

/// Report dangling sidebar sections and duplicate navigation labels.
///
/// Issues are returned in declaration order. An empty result means the
/// configuration is consistent.
pub fn check_references(config: &SiteConfiguration) -> Vec<ReferenceIssue> {
    let mut issues = Vec::new();

    let targets: Vec<&str> = config.nav().iter().flat_map(|item| item.targets()).collect();
    for prefix in config.sidebar().keys() {
        if !targets.iter().any(|target| target.starts_with(prefix.as_str())) {
            issues.push(ReferenceIssue::DanglingSidebar {
                prefix: prefix.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for item in config.nav() {
        let label = item.text();
        if !seen.insert(label) && reported.insert(label) {
            issues.push(ReferenceIssue::DuplicateNavLabel {
                label: label.to_owned(),
            });
        }
    }

    if !issues.is_empty() {
        tracing::debug!(count = issues.len(), "Found reference issues");
    }
    issues
}
