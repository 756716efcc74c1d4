//! Assembly of the final [`SiteConfiguration`].
//!
//! Assembly is a single pass over already-resolved parts. Every required
//! literal is checked on the way through and the first defect aborts the
//! build, so a partially valid configuration never reaches the renderer.
//! Cross-references between sidebar prefixes and navigation targets are not
//! checked here; see [`check_references`](crate::check_references).

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::model::{
    EditLink, Footer, Link, NavItem, PATH_PLACEHOLDER, Sidebar, SidebarItem, SiteAssets,
    SiteMetadata, SocialLink, VersionSelector,
};
use crate::resolve::BasePath;
use crate::{ConfigError, require_http_url, require_non_empty, require_target};

/// Resolved pieces of a site configuration, ready for assembly.
#[derive(Clone, Debug)]
pub struct ConfigurationParts {
    pub metadata: SiteMetadata,
    /// Base path after override resolution.
    pub base_path: String,
    pub assets: SiteAssets,
    pub nav: Vec<NavItem>,
    pub sidebar: Sidebar,
    pub versions: VersionSelector,
    pub social_links: Vec<SocialLink>,
    pub edit_link: Option<EditLink>,
    pub footer: Option<Footer>,
}

/// Complete configuration consumed by the site renderer.
///
/// Built once per site build and never modified afterwards. Deserializing
/// runs the same checks as [`assemble_configuration`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSiteConfiguration")]
pub struct SiteConfiguration {
    #[serde(flatten)]
    metadata: SiteMetadata,
    base: BasePath,
    #[serde(flatten)]
    assets: SiteAssets,
    nav: Vec<NavItem>,
    sidebar: Sidebar,
    versions: VersionSelector,
    social_links: Vec<SocialLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edit_link: Option<EditLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    footer: Option<Footer>,
}

/// Unchecked serialized form of [`SiteConfiguration`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSiteConfiguration {
    #[serde(flatten)]
    metadata: SiteMetadata,
    base: String,
    #[serde(flatten)]
    assets: SiteAssets,
    nav: Vec<NavItem>,
    sidebar: Sidebar,
    versions: VersionSelector,
    social_links: Vec<SocialLink>,
    #[serde(default)]
    edit_link: Option<EditLink>,
    #[serde(default)]
    footer: Option<Footer>,
}

impl TryFrom<RawSiteConfiguration> for SiteConfiguration {
    type Error = ConfigError;

    fn try_from(raw: RawSiteConfiguration) -> Result<Self, Self::Error> {
        assemble_configuration(ConfigurationParts {
            metadata: raw.metadata,
            base_path: raw.base,
            assets: raw.assets,
            nav: raw.nav,
            sidebar: raw.sidebar,
            versions: raw.versions,
            social_links: raw.social_links,
            edit_link: raw.edit_link,
            footer: raw.footer,
        })
    }
}

impl SiteConfiguration {
    /// Title, description, language and last-updated flag.
    #[must_use]
    pub fn metadata(&self) -> &SiteMetadata {
        &self.metadata
    }

    /// Base path the site is served under.
    #[must_use]
    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// Logo and source/output directories.
    #[must_use]
    pub fn assets(&self) -> &SiteAssets {
        &self.assets
    }

    /// Top-level navigation in declaration order.
    #[must_use]
    pub fn nav(&self) -> &[NavItem] {
        &self.nav
    }

    /// Sidebar sections keyed by URL prefix.
    #[must_use]
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Version selector with the active label.
    #[must_use]
    pub fn versions(&self) -> &VersionSelector {
        &self.versions
    }

    #[must_use]
    pub fn social_links(&self) -> &[SocialLink] {
        &self.social_links
    }

    /// "Edit this page" template, if configured.
    #[must_use]
    pub fn edit_link(&self) -> Option<&EditLink> {
        self.edit_link.as_ref()
    }

    #[must_use]
    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }

    /// Sidebar shown on a page.
    ///
    /// Picks the longest declared prefix of `page_path`. Pages outside every
    /// prefix get no sidebar, which is the normal case and not an error.
    #[must_use]
    pub fn sidebar_for(&self, page_path: &str) -> Option<&[SidebarItem]> {
        let path: Cow<'_, str> = if page_path.starts_with('/') {
            Cow::Borrowed(page_path)
        } else {
            Cow::Owned(format!("/{page_path}"))
        };

        self.sidebar
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, items)| items.as_slice())
    }
}

/// Validate navigation entries, keeping declaration order.
///
/// Duplicate labels are allowed here and reported by
/// [`check_references`](crate::check_references).
///
/// # Errors
///
/// Returns `ConfigError::MalformedLiteral` for an empty label, an empty
/// group, or a target that is neither an absolute URL nor root-relative.
pub fn build_navigation(entries: Vec<NavItem>) -> Result<Vec<NavItem>, ConfigError> {
    for (i, entry) in entries.iter().enumerate() {
        let field = format!("nav[{i}]");
        match entry {
            NavItem::Link(link) => validate_link(link, &field)?,
            NavItem::Group(group) => {
                require_non_empty(&group.text, &format!("{field}.text"))?;
                if group.items.is_empty() {
                    return Err(ConfigError::malformed(
                        format!("{field}.items"),
                        "group must contain at least one link",
                    ));
                }
                for (j, link) in group.items.iter().enumerate() {
                    validate_link(link, &format!("{field}.items[{j}]"))?;
                }
            }
        }
    }
    Ok(entries)
}

/// Validate sidebar sections, keeping key order and per-prefix order.
///
/// # Errors
///
/// Returns `ConfigError::MalformedLiteral` for a prefix that does not start
/// with `/`, an empty section, or a malformed entry.
pub fn build_sidebar(sections: Sidebar) -> Result<Sidebar, ConfigError> {
    for (prefix, items) in &sections {
        let field = format!("sidebar[{prefix:?}]");
        if !prefix.starts_with('/') {
            return Err(ConfigError::malformed(field, "prefix must start with '/'"));
        }
        if items.is_empty() {
            return Err(ConfigError::malformed(
                field,
                "section must contain at least one entry",
            ));
        }
        validate_sidebar_items(items, &field)?;
    }
    Ok(sections)
}

fn validate_sidebar_items(items: &[SidebarItem], parent: &str) -> Result<(), ConfigError> {
    for (i, item) in items.iter().enumerate() {
        let field = format!("{parent}[{i}]");
        match item {
            SidebarItem::Link(link) => validate_link(link, &field)?,
            SidebarItem::Group(group) => {
                require_non_empty(&group.text, &format!("{field}.text"))?;
                if group.items.is_empty() {
                    return Err(ConfigError::malformed(
                        format!("{field}.items"),
                        "group must contain at least one link",
                    ));
                }
                validate_sidebar_items(&group.items, &format!("{field}.items"))?;
            }
        }
    }
    Ok(())
}

fn validate_link(link: &Link, field: &str) -> Result<(), ConfigError> {
    require_non_empty(&link.text, &format!("{field}.text"))?;
    require_target(&link.link, &format!("{field}.link"))
}

/// Combine resolved parts into the final configuration.
///
/// # Errors
///
/// Returns `ConfigError::InvalidBasePath` if the base path does not start and
/// end with `/`, and `ConfigError::MalformedLiteral` for the first empty or
/// malformed required field.
pub fn assemble_configuration(
    parts: ConfigurationParts,
) -> Result<SiteConfiguration, ConfigError> {
    let ConfigurationParts {
        metadata,
        base_path,
        assets,
        nav,
        sidebar,
        versions,
        social_links,
        edit_link,
        footer,
    } = parts;

    require_non_empty(&metadata.title, "title")?;
    require_non_empty(&metadata.description, "description")?;
    require_non_empty(&metadata.lang, "lang")?;
    let base = BasePath::new(base_path)?;

    if let Some(logo) = &assets.logo {
        require_target(logo, "logo")?;
    }

    let nav = build_navigation(nav)?;
    let sidebar = build_sidebar(sidebar)?;

    require_non_empty(&versions.current, "versions.current")?;
    for (i, link) in versions.items.iter().enumerate() {
        validate_link(link, &format!("versions.items[{i}]"))?;
    }

    for (i, social) in social_links.iter().enumerate() {
        require_non_empty(&social.icon, &format!("social_links[{i}].icon"))?;
        require_http_url(&social.link, &format!("social_links[{i}].link"))?;
    }

    if let Some(edit) = &edit_link {
        require_http_url(&edit.pattern, "edit_link.pattern")?;
        if !edit.pattern.contains(PATH_PLACEHOLDER) {
            return Err(ConfigError::malformed(
                "edit_link.pattern",
                format!("must contain the {PATH_PLACEHOLDER} placeholder"),
            ));
        }
    }

    if let Some(footer) = &footer {
        require_non_empty(&footer.message, "footer.message")?;
        require_non_empty(&footer.copyright, "footer.copyright")?;
    }

    tracing::debug!(
        base = %base,
        version = %versions.current,
        nav_items = nav.len(),
        sidebar_sections = sidebar.len(),
        "Assembled site configuration"
    );

    Ok(SiteConfiguration {
        metadata,
        base,
        assets,
        nav,
        sidebar,
        versions,
        social_links,
        edit_link,
        footer,
    })
}
