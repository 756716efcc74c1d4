//! Override resolution for values supplied by the build environment.
//!
//! The site build accepts exactly two external knobs: a base path and a
//! version label. Both are read once by the caller (the CLI reads them from
//! `DOCS_BASE` and `DOCS_VERSION`) and passed in through [`Overrides`];
//! nothing in this crate touches the process environment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Version label used when no version override is supplied.
pub const DEFAULT_VERSION_LABEL: &str = "dev";

/// Base path used when the declaration does not set `base`.
pub const DEFAULT_BASE_PATH: &str = "/";

/// Externally supplied values applied on top of the site declaration.
///
/// All fields are optional. Absent or empty values select the declared
/// fallback, they are never an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Base path override (`DOCS_BASE`).
    pub base_path: Option<String>,
    /// Version label override (`DOCS_VERSION`).
    pub version: Option<String>,
    /// Build year substituted for `{year}` in the footer copyright.
    pub year: Option<i32>,
}

/// Pick the base path for this build.
///
/// Returns `override_value` when it is present and non-empty, otherwise
/// `fallback`. The result is not validated here; [`BasePath::new`] does that
/// during assembly.
pub fn resolve_base_path(override_value: Option<&str>, fallback: &str) -> String {
    pick(override_value, fallback)
}

/// Pick the label of the currently active documentation version.
///
/// Version labels are opaque strings: no parsing or ordering is applied.
pub fn resolve_version_label(override_value: Option<&str>, sentinel: &str) -> String {
    pick(override_value, sentinel)
}

fn pick(override_value: Option<&str>, fallback: &str) -> String {
    match override_value {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => fallback.to_owned(),
    }
}

/// URL path prefix the whole site is served under.
///
/// Always starts and ends with `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BasePath(String);

impl BasePath {
    /// Validate a resolved base path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBasePath` unless the value starts and ends
    /// with `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if !value.starts_with('/') || !value.ends_with('/') {
            return Err(ConfigError::InvalidBasePath(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Served URL for a link target.
    ///
    /// Root-relative targets are placed under the base path, absolute URLs
    /// are returned unchanged.
    #[must_use]
    pub fn join(&self, target: &str) -> String {
        if crate::is_external(target) {
            return target.to_owned();
        }
        format!("{}{}", self.0, target.trim_start_matches('/'))
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self(DEFAULT_BASE_PATH.to_owned())
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BasePath {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BasePath> for String {
    fn from(base: BasePath) -> Self {
        base.0
    }
}
