//! Value types handed to the site renderer.
//!
//! Every type serializes to the plain structure the renderer consumes:
//! navigation and sidebar entries are `{text, link}` objects, groups are
//! `{text, items}` objects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder in [`EditLink::pattern`] replaced with the page path.
pub const PATH_PLACEHOLDER: &str = ":path";

/// Mapping from URL prefix to the sidebar shown for pages under it.
///
/// Keys keep their declaration order.
pub type Sidebar = IndexMap<String, Vec<SidebarItem>>;

/// Site-wide metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    /// Language tag (e.g. `en-US`).
    pub lang: String,
    /// Show "last updated" timestamps on pages.
    pub last_updated: bool,
}

/// Labeled link target.
///
/// The target is either an absolute URL or a path relative to the site
/// root (leading `/`), which the renderer places under the base path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub text: String,
    pub link: String,
}

impl Link {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

/// Dropdown in the navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavGroup {
    pub text: String,
    pub items: Vec<Link>,
}

/// Top-level navigation bar item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavItem {
    Link(Link),
    Group(NavGroup),
}

impl NavItem {
    /// Display label.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Group(group) => &group.text,
        }
    }

    /// Targets of all leaf links under this item, in order.
    #[must_use]
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Link(link) => vec![link.link.as_str()],
            Self::Group(group) => group.items.iter().map(|l| l.link.as_str()).collect(),
        }
    }
}

/// Titled block of sidebar entries, optionally collapsible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroup {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    pub items: Vec<SidebarItem>,
}

/// Sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    Link(Link),
    Group(SidebarGroup),
}

impl SidebarItem {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Group(group) => &group.text,
        }
    }
}

/// Documentation versions the reader can switch between.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSelector {
    /// Label of the version being built.
    pub current: String,
    pub items: Vec<Link>,
}

/// Icon link shown in the navigation bar (e.g. GitHub).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Icon identifier understood by the renderer.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub link: String,
}

/// "Edit this page" link template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditLink {
    /// URL containing [`PATH_PLACEHOLDER`].
    #[serde(default)]
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EditLink {
    /// Edit URL for a page, given its path relative to the source directory.
    #[must_use]
    pub fn url_for(&self, relative_path: &str) -> String {
        self.pattern
            .replace(PATH_PLACEHOLDER, relative_path.trim_start_matches('/'))
    }
}

/// Page footer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footer {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub copyright: String,
}

/// Renderer inputs that are neither navigation nor metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAssets {
    /// Logo path relative to the site root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Markdown source directory, relative to the docs root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<String>,
    /// Output directory for the rendered site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}
