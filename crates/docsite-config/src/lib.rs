//! Site configuration for documentation sites.
//!
//! Turns a `site.toml` declaration plus a couple of build-time overrides into
//! one immutable [`SiteConfiguration`] that a static site renderer consumes.
//!
//! ## Pipeline
//!
//! 1. [`SiteDeclaration::load`] parses the authored literals (with
//!    auto-discovery of `site.toml` in parent directories).
//! 2. [`SiteDeclaration::build`] resolves the [`Overrides`] (base path,
//!    version label, build year) and calls [`assemble_configuration`], which
//!    fails fast on the first malformed literal.
//! 3. [`check_references`] reports advisory problems, such as sidebar
//!    prefixes that no navigation entry points into. These never fail
//!    assembly on their own.
//!
//! ## Overrides
//!
//! The library never reads the process environment. Callers read the
//! overrides once and pass them in:
//!
//! ```
//! use docsite_config::{Overrides, SiteDeclaration};
//!
//! let declaration = SiteDeclaration::from_toml_str(r#"
//! title = "kubeOP Documentation"
//! description = "Operator-powered application platform"
//! base = "/kubeOP/"
//!
//! [[nav]]
//! text = "Getting Started"
//! link = "/getting-started"
//! "#)?;
//!
//! let config = declaration.build(&Overrides {
//!     base_path: Some("/preview/".to_owned()),
//!     ..Overrides::default()
//! })?;
//! assert_eq!(config.base().as_str(), "/preview/");
//! assert_eq!(config.versions().current, "dev");
//! # Ok::<(), docsite_config::ConfigError>(())
//! ```

mod assemble;
mod declaration;
mod model;
mod references;
mod resolve;

use std::path::PathBuf;

pub use assemble::{
    ConfigurationParts, SiteConfiguration, assemble_configuration, build_navigation,
    build_sidebar,
};
pub use declaration::{CONFIG_FILENAME, SiteDeclaration};
pub use model::{
    EditLink, Footer, Link, NavGroup, NavItem, PATH_PLACEHOLDER, Sidebar, SidebarGroup,
    SidebarItem, SiteAssets, SiteMetadata, SocialLink, VersionSelector,
};
pub use references::{ReferenceIssue, check_references};
pub use resolve::{
    BasePath, DEFAULT_BASE_PATH, DEFAULT_VERSION_LABEL, Overrides, resolve_base_path,
    resolve_version_label,
};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Required literal is empty, absent, or has the wrong shape.
    #[error("Malformed {field}: {reason}")]
    MalformedLiteral {
        /// Dotted field path (e.g. `nav[2].link`).
        field: String,
        reason: String,
    },
    /// Resolved base path does not start and end with `/`.
    #[error("Invalid base path {0:?}: must start and end with '/'")]
    InvalidBasePath(String),
}

impl ConfigError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedLiteral {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Whether a link target is an absolute URL rather than a site path.
pub(crate) fn is_external(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::malformed(field, "cannot be empty"));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(url, field)?;
    if !is_external(url) {
        return Err(ConfigError::malformed(
            field,
            "must start with http:// or https://",
        ));
    }
    Ok(())
}

/// Require a link target to be an absolute URL or a root-relative path.
pub(crate) fn require_target(target: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(target, field)?;
    if !is_external(target) && !target.starts_with('/') {
        return Err(ConfigError::malformed(
            field,
            format!("{target:?} must be an absolute URL or start with '/'"),
        ));
    }
    Ok(())
}
