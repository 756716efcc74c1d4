//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod sidebar;

use std::path::PathBuf;

use chrono::Datelike;
use clap::Args;
use docsite_config::{Overrides, SiteConfiguration, SiteDeclaration};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use sidebar::SidebarArgs;

/// Arguments shared by every command that assembles the site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to the site declaration (default: auto-discover site.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base path the site is served under (overrides `base` in site.toml).
    #[arg(long, env = "DOCS_BASE")]
    base: Option<String>,

    /// Label of the documentation version being built (default: dev).
    #[arg(long = "version-label", env = "DOCS_VERSION")]
    version_label: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Overrides for this invocation, stamped with the given build year.
    fn overrides(&self, year: i32) -> Overrides {
        Overrides {
            base_path: self.base.clone(),
            version: self.version_label.clone(),
            year: Some(year),
        }
    }

    /// Load the declaration and assemble the configuration.
    pub(crate) fn assemble(&self) -> Result<SiteConfiguration, CliError> {
        let declaration = SiteDeclaration::load(self.config.as_deref())?;
        if let Some(path) = declaration.source_path() {
            tracing::info!(path = %path.display(), "Using site declaration");
        }
        let year = chrono::Utc::now().year();
        Ok(declaration.build(&self.overrides(year))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides_from_args() {
        let args = SiteArgs {
            config: None,
            base: Some("/preview/".to_owned()),
            version_label: None,
            verbose: false,
        };

        assert_eq!(
            args.overrides(2026),
            Overrides {
                base_path: Some("/preview/".to_owned()),
                version: None,
                year: Some(2026),
            }
        );
    }

    #[test]
    fn test_assemble_from_explicit_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "title = \"T\"\ndescription = \"D\"\nbase = \"/kubeOP/\"\n").unwrap();
        let args = SiteArgs {
            config: Some(path),
            base: None,
            version_label: Some("v2".to_owned()),
            verbose: false,
        };

        let config = args.assemble().unwrap();

        assert_eq!(config.base().as_str(), "/kubeOP/");
        assert_eq!(config.versions().current, "v2");
    }

    #[test]
    fn test_assemble_missing_config_fails() {
        let args = SiteArgs {
            config: Some(PathBuf::from("/nonexistent/site.toml")),
            base: None,
            version_label: None,
            verbose: false,
        };

        let err = args.assemble().unwrap_err();

        assert!(err.to_string().contains("not found"), "got: {err}");
    }
}
