//! `docsite check` command implementation.

use clap::Args;
use docsite_config::{ReferenceIssue, SiteConfiguration, check_references};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Treat reference issues (dangling sidebars, duplicate labels) as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration is invalid, or if `--strict` is
    /// set and reference issues were found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.assemble()?;

        for line in summary(&config) {
            output.info(&line);
        }

        let issues = check_references(&config);
        for issue in &issues {
            tracing::warn!(%issue, "Reference issue");
            output.warning(&format!("warning: {issue}"));
        }

        strict_result(&issues, self.strict)?;
        output.success("Site configuration is valid");
        Ok(())
    }
}

fn summary(config: &SiteConfiguration) -> Vec<String> {
    vec![
        format!("Title: {}", config.metadata().title),
        format!("Base path: {}", config.base()),
        format!("Version: {}", config.versions().current),
        format!("Navigation items: {}", config.nav().len()),
        format!("Sidebar sections: {}", config.sidebar().len()),
    ]
}

fn strict_result(issues: &[ReferenceIssue], strict: bool) -> Result<(), CliError> {
    if strict && !issues.is_empty() {
        return Err(CliError::Validation(format!(
            "{} reference issue(s) found",
            issues.len()
        )));
    }
    Ok(())
}
