//! The authored `site.toml` declaration.
//!
//! Declarations are parsed with serde and converted into the explicit
//! model types. Navigation and sidebar entries are written as TOML tables
//! that carry either `link` or `items`; the conversion rejects tables that
//! carry both or neither instead of guessing.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::ConfigError;
use crate::assemble::{ConfigurationParts, SiteConfiguration, assemble_configuration};
use crate::model::{
    EditLink, Footer, Link, NavGroup, NavItem, Sidebar, SidebarGroup, SidebarItem, SiteAssets,
    SiteMetadata, SocialLink, VersionSelector,
};
use crate::resolve::{
    DEFAULT_BASE_PATH, DEFAULT_VERSION_LABEL, Overrides, resolve_base_path, resolve_version_label,
};

/// Declaration filename to search for.
pub const CONFIG_FILENAME: &str = "site.toml";

/// Placeholder in the footer copyright replaced with the build year.
const YEAR_PLACEHOLDER: &str = "{year}";

/// Site declaration as authored in `site.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteDeclaration {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_lang")]
    lang: String,
    #[serde(default)]
    last_updated: bool,
    /// Base path used when no override is supplied.
    #[serde(default = "default_base")]
    base: String,
    logo: Option<String>,
    src_dir: Option<String>,
    out_dir: Option<String>,
    #[serde(default)]
    nav: Vec<NavItemDecl>,
    #[serde(default)]
    sidebar: IndexMap<String, Vec<SidebarItemDecl>>,
    #[serde(default)]
    versions: VersionsDecl,
    #[serde(default)]
    social_links: Vec<SocialLink>,
    edit_link: Option<EditLink>,
    footer: Option<Footer>,

    /// Path to the declaration file (set after loading).
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

fn default_lang() -> String {
    "en-US".to_owned()
}

fn default_base() -> String {
    DEFAULT_BASE_PATH.to_owned()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinkDecl {
    #[serde(default)]
    text: String,
    #[serde(default)]
    link: String,
}

impl From<&LinkDecl> for Link {
    fn from(decl: &LinkDecl) -> Self {
        Link::new(decl.text.clone(), decl.link.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NavItemDecl {
    #[serde(default)]
    text: String,
    link: Option<String>,
    items: Option<Vec<LinkDecl>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SidebarItemDecl {
    #[serde(default)]
    text: String,
    link: Option<String>,
    items: Option<Vec<SidebarItemDecl>>,
    collapsed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct VersionsDecl {
    #[serde(default)]
    items: Vec<LinkDecl>,
}

impl NavItemDecl {
    fn to_item(&self, field: &str) -> Result<NavItem, ConfigError> {
        match (&self.link, &self.items) {
            (Some(link), None) => Ok(NavItem::Link(Link::new(self.text.clone(), link.clone()))),
            (None, Some(items)) => Ok(NavItem::Group(NavGroup {
                text: self.text.clone(),
                items: items.iter().map(Link::from).collect(),
            })),
            (Some(_), Some(_)) => Err(ConfigError::malformed(
                field,
                "cannot have both link and items",
            )),
            (None, None) => Err(ConfigError::malformed(field, "requires link or items")),
        }
    }
}

impl SidebarItemDecl {
    fn to_item(&self, field: &str) -> Result<SidebarItem, ConfigError> {
        match (&self.link, &self.items) {
            (Some(link), None) => {
                if self.collapsed.is_some() {
                    return Err(ConfigError::malformed(
                        field,
                        "collapsed only applies to groups",
                    ));
                }
                Ok(SidebarItem::Link(Link::new(self.text.clone(), link.clone())))
            }
            (None, Some(items)) => {
                let items = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| item.to_item(&format!("{field}.items[{i}]")))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SidebarItem::Group(SidebarGroup {
                    text: self.text.clone(),
                    collapsed: self.collapsed,
                    items,
                }))
            }
            (Some(_), Some(_)) => Err(ConfigError::malformed(
                field,
                "cannot have both link and items",
            )),
            (None, None) => Err(ConfigError::malformed(field, "requires link or items")),
        }
    }
}

impl SiteDeclaration {
    /// Load a declaration.
    ///
    /// If `path` is provided, loads from that file. Otherwise, searches for
    /// `site.toml` in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the explicit path does not exist or
    /// no declaration is discovered, and a parse error for invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from_file(path)
            }
            None => {
                let cwd = std::env::current_dir()?;
                let discovered = Self::discover_from(&cwd)
                    .ok_or_else(|| ConfigError::NotFound(cwd.join(CONFIG_FILENAME)))?;
                Self::load_from_file(&discovered)
            }
        }
    }

    /// Parse a declaration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for invalid TOML or unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Path the declaration was loaded from, if it came from a file.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Base path used when no override is supplied.
    #[must_use]
    pub fn fallback_base(&self) -> &str {
        &self.base
    }

    /// Search for a declaration in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut declaration = Self::from_toml_str(&content)?;
        declaration.source_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded site declaration");
        Ok(declaration)
    }

    /// Resolve overrides and assemble the site configuration.
    ///
    /// # Errors
    ///
    /// Returns the first malformed literal or an invalid base path.
    pub fn build(&self, overrides: &Overrides) -> Result<SiteConfiguration, ConfigError> {
        let base_path = resolve_base_path(overrides.base_path.as_deref(), &self.base);
        let current = resolve_version_label(overrides.version.as_deref(), DEFAULT_VERSION_LABEL);
        if base_path != self.base {
            tracing::info!(base = %base_path, fallback = %self.base, "Using base path override");
        }

        let nav = self
            .nav
            .iter()
            .enumerate()
            .map(|(i, item)| item.to_item(&format!("nav[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sidebar = Sidebar::with_capacity(self.sidebar.len());
        for (prefix, items) in &self.sidebar {
            let items = items
                .iter()
                .enumerate()
                .map(|(i, item)| item.to_item(&format!("sidebar[{prefix:?}][{i}]")))
                .collect::<Result<Vec<_>, _>>()?;
            sidebar.insert(prefix.clone(), items);
        }

        let footer = self.footer.as_ref().map(|footer| Footer {
            message: footer.message.clone(),
            copyright: match overrides.year {
                Some(year) => footer
                    .copyright
                    .replace(YEAR_PLACEHOLDER, &year.to_string()),
                None => footer.copyright.clone(),
            },
        });

        assemble_configuration(ConfigurationParts {
            metadata: SiteMetadata {
                title: self.title.clone(),
                description: self.description.clone(),
                lang: self.lang.clone(),
                last_updated: self.last_updated,
            },
            base_path,
            assets: SiteAssets {
                logo: self.logo.clone(),
                src_dir: self.src_dir.clone(),
                out_dir: self.out_dir.clone(),
            },
            nav,
            sidebar,
            versions: VersionSelector {
                current,
                items: self.versions.items.iter().map(Link::from).collect(),
            },
            social_links: self.social_links.clone(),
            edit_link: self.edit_link.clone(),
            footer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const KUBEOP_SITE: &str = r#"
title = "kubeOP Documentation"
description = "Operator-powered multi-tenant application platform for Kubernetes"
last_updated = true
base = "/kubeOP/"
logo = "/logo.svg"

[[nav]]
text = "Getting Started"
link = "/getting-started"

[[nav]]
text = "Guide"
link = "/guide/install"

[[nav]]
text = "Reference"
items = [
  { text = "API Reference", link = "/api-reference" },
  { text = "CRDs", link = "/crds" },
]

[sidebar]
"/guide/" = [
  { text = "Install", link = "/guide/install" },
  { text = "Advanced", collapsed = true, items = [
    { text = "Production Hardening", link = "/guide/production-hardening" },
  ] },
]

[versions]
items = [{ text = "v0.9", link = "/v0.9/" }]

[[social_links]]
icon = "github"
link = "https://github.com/example/kubeOP"

[edit_link]
pattern = "https://github.com/example/kubeOP/edit/main/docs/:path"
text = "Edit this page on GitHub"

[footer]
message = "Released under the MIT License."
copyright = "© {year} kubeOP contributors"
"#;

    fn kubeop() -> SiteDeclaration {
        SiteDeclaration::from_toml_str(KUBEOP_SITE).unwrap()
    }

    fn assert_malformed_field(result: Result<SiteConfiguration, ConfigError>, expected: &str) {
        match result {
            Err(ConfigError::MalformedLiteral { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected MalformedLiteral for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn test_build_without_overrides_uses_fallbacks() {
        let config = kubeop().build(&Overrides::default()).unwrap();

        assert_eq!(config.base().as_str(), "/kubeOP/");
        assert_eq!(config.versions().current, "dev");
        assert_eq!(config.metadata().lang, "en-US");
        assert!(config.metadata().last_updated);
    }

    #[test]
    fn test_build_with_base_override() {
        let overrides = Overrides {
            base_path: Some("/preview/".to_owned()),
            ..Overrides::default()
        };

        let config = kubeop().build(&overrides).unwrap();

        assert_eq!(config.base().as_str(), "/preview/");
    }

    #[test]
    fn test_build_with_empty_base_override_uses_fallback() {
        let overrides = Overrides {
            base_path: Some(String::new()),
            ..Overrides::default()
        };

        let config = kubeop().build(&overrides).unwrap();

        assert_eq!(config.base().as_str(), "/kubeOP/");
    }

    #[test]
    fn test_build_with_invalid_base_override_fails() {
        let overrides = Overrides {
            base_path: Some("preview".to_owned()),
            ..Overrides::default()
        };

        let err = kubeop().build(&overrides).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidBasePath(_)));
    }

    #[test]
    fn test_build_with_version_override() {
        let overrides = Overrides {
            version: Some("v1.0".to_owned()),
            ..Overrides::default()
        };

        let config = kubeop().build(&overrides).unwrap();

        assert_eq!(config.versions().current, "v1.0");
        assert_eq!(config.versions().items, vec![Link::new("v0.9", "/v0.9/")]);
    }

    #[test]
    fn test_build_substitutes_year() {
        let overrides = Overrides {
            year: Some(2026),
            ..Overrides::default()
        };

        let config = kubeop().build(&overrides).unwrap();

        assert_eq!(
            config.footer().unwrap().copyright,
            "© 2026 kubeOP contributors"
        );
    }

    #[test]
    fn test_build_without_year_keeps_template() {
        let config = kubeop().build(&Overrides::default()).unwrap();

        assert_eq!(
            config.footer().unwrap().copyright,
            "© {year} kubeOP contributors"
        );
    }

    #[test]
    fn test_build_keeps_nav_declaration_order() {
        let config = kubeop().build(&Overrides::default()).unwrap();

        let labels: Vec<&str> = config.nav().iter().map(NavItem::text).collect();
        assert_eq!(labels, vec!["Getting Started", "Guide", "Reference"]);
        assert!(matches!(&config.nav()[2], NavItem::Group(g) if g.items.len() == 2));
    }

    #[test]
    fn test_build_keeps_sidebar_groups() {
        let config = kubeop().build(&Overrides::default()).unwrap();

        let items = config.sidebar_for("/guide/install").unwrap();
        assert_eq!(items[0], SidebarItem::Link(Link::new("Install", "/guide/install")));
        let SidebarItem::Group(group) = &items[1] else {
            panic!("expected group, got {:?}", items[1]);
        };
        assert_eq!(group.collapsed, Some(true));
        assert_eq!(group.items[0].text(), "Production Hardening");
    }

    #[test]
    fn test_sidebar_keys_keep_toml_order() {
        let declaration = SiteDeclaration::from_toml_str(
            r#"
title = "T"
description = "D"

[[nav]]
text = "Z"
link = "/z/"

[sidebar]
"/z/" = [{ text = "Z", link = "/z/" }]
"/a/" = [{ text = "A", link = "/a/" }]
"/m/" = [{ text = "M", link = "/m/" }]
"#,
        )
        .unwrap();

        let config = declaration.build(&Overrides::default()).unwrap();

        assert_eq!(
            config.sidebar().keys().collect::<Vec<_>>(),
            vec!["/z/", "/a/", "/m/"]
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let declaration = kubeop();
        let overrides = Overrides {
            base_path: Some("/preview/".to_owned()),
            version: Some("v1.0".to_owned()),
            year: Some(2026),
        };

        assert_eq!(
            declaration.build(&overrides).unwrap(),
            declaration.build(&overrides).unwrap()
        );
    }

    #[test]
    fn test_minimal_declaration_defaults() {
        let declaration =
            SiteDeclaration::from_toml_str("title = \"T\"\ndescription = \"D\"\n").unwrap();

        let config = declaration.build(&Overrides::default()).unwrap();

        assert_eq!(config.base().as_str(), "/");
        assert!(config.nav().is_empty());
        assert!(config.sidebar().is_empty());
        assert!(config.versions().items.is_empty());
        assert!(config.edit_link().is_none());
        assert!(config.footer().is_none());
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let declaration = SiteDeclaration::from_toml_str("description = \"D\"\n").unwrap();

        assert_malformed_field(declaration.build(&Overrides::default()), "title");
    }

    #[test]
    fn test_nav_item_with_link_and_items_is_malformed() {
        let declaration = SiteDeclaration::from_toml_str(
            r#"
title = "T"
description = "D"

[[nav]]
text = "Both"
link = "/both"
items = [{ text = "Child", link = "/child" }]
"#,
        )
        .unwrap();

        assert_malformed_field(declaration.build(&Overrides::default()), "nav[0]");
    }

    #[test]
    fn test_nav_item_without_link_or_items_is_malformed() {
        let declaration = SiteDeclaration::from_toml_str(
            "title = \"T\"\ndescription = \"D\"\n[[nav]]\ntext = \"Nothing\"\n",
        )
        .unwrap();

        assert_malformed_field(declaration.build(&Overrides::default()), "nav[0]");
    }

    #[test]
    fn test_nav_link_without_text_is_malformed() {
        let declaration = SiteDeclaration::from_toml_str(
            "title = \"T\"\ndescription = \"D\"\n[[nav]]\nlink = \"/a\"\n",
        )
        .unwrap();

        assert_malformed_field(declaration.build(&Overrides::default()), "nav[0].text");
    }

    #[test]
    fn test_collapsed_link_is_malformed() {
        let declaration = SiteDeclaration::from_toml_str(
            r#"
title = "T"
description = "D"

[sidebar]
"/" = [{ text = "Home", link = "/", collapsed = true }]
"#,
        )
        .unwrap();

        assert_malformed_field(
            declaration.build(&Overrides::default()),
            "sidebar[\"/\"][0]",
        );
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = SiteDeclaration::from_toml_str("title = \"T\"\ndescripton = \"typo\"\n")
            .unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let err = SiteDeclaration::load(Some(Path::new("/nonexistent/site.toml"))).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(ref p) if p == Path::new("/nonexistent/site.toml")));
    }

    #[test]
    fn test_load_explicit_path_records_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, KUBEOP_SITE).unwrap();

        let declaration = SiteDeclaration::load(Some(&path)).unwrap();

        assert_eq!(declaration.source_path(), Some(path.as_path()));
        assert_eq!(declaration.fallback_base(), "/kubeOP/");
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), KUBEOP_SITE).unwrap();
        let nested = dir.path().join("docs").join("guide");
        std::fs::create_dir_all(&nested).unwrap();

        let found = SiteDeclaration::discover_from(&nested);

        assert_eq!(found, Some(dir.path().join(CONFIG_FILENAME)));
    }
}
