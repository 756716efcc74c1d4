//! `docsite sidebar` command implementation.

use clap::Args;
use docsite_config::SidebarItem;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Page path relative to the site root (e.g. /guide/install).
    page: String,
}

impl SidebarArgs {
    /// Execute the sidebar command.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.assemble()?;

        match config.sidebar_for(&self.page) {
            Some(items) => {
                output.highlight(&format!("Sidebar for {}", self.page));
                for line in outline(items, |link| config.base().join(link)) {
                    output.info(&line);
                }
            }
            None => output.info(&format!("No sidebar for {}", self.page)),
        }
        Ok(())
    }
}

/// Indented outline of sidebar entries, with links resolved by `resolve`.
fn outline(items: &[SidebarItem], resolve: impl Fn(&str) -> String) -> Vec<String> {
    fn walk(
        items: &[SidebarItem],
        depth: usize,
        resolve: &dyn Fn(&str) -> String,
        lines: &mut Vec<String>,
    ) {
        let indent = "  ".repeat(depth);
        for item in items {
            match item {
                SidebarItem::Link(link) => {
                    lines.push(format!("{indent}{} -> {}", link.text, resolve(&link.link)));
                }
                SidebarItem::Group(group) => {
                    let marker = if group.collapsed == Some(true) {
                        " (collapsed)"
                    } else {
                        ""
                    };
                    lines.push(format!("{indent}{}{marker}", group.text));
                    walk(&group.items, depth + 1, resolve, lines);
                }
            }
        }
    }

    let mut lines = Vec::new();
    walk(items, 0, &resolve, &mut lines);
    lines
}
