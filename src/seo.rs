//! Document head tags: page title, description, and social-card metadata.
//!
//! Every page carries the same set of tags, derived from the fixed
//! [`SiteMetadata`] object. Only the page title varies: the homepage uses
//! the site title as-is, other pages prefix it (`Work | coding&&community`).
//! `og:title` follows the page title while `twitter:title` always carries the
//! site title.

use crate::config::SiteMetadata;
use maud::{Markup, html};

/// A single `<meta>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaTag {
    /// `<meta name=.. content=..>`
    Name { name: &'static str, content: String },
    /// `<meta property=.. content=..>` (Open Graph)
    Property {
        property: &'static str,
        content: String,
    },
}

/// Title and meta tags for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub title: String,
    pub meta: Vec<MetaTag>,
}

impl Head {
    /// Head for a page. `page` is `None` for the homepage.
    pub fn for_page(page: Option<&str>, site: &SiteMetadata) -> Self {
        let title = match page {
            Some(page) => format!("{page} | {}", site.title),
            None => site.title.clone(),
        };
        let meta = vec![
            MetaTag::Name {
                name: "description",
                content: site.description.clone(),
            },
            MetaTag::Property {
                property: "og:title",
                content: title.clone(),
            },
            MetaTag::Property {
                property: "og:description",
                content: site.description.clone(),
            },
            MetaTag::Property {
                property: "og:type",
                content: "website".to_string(),
            },
            MetaTag::Name {
                name: "twitter:card",
                content: "summary".to_string(),
            },
            MetaTag::Name {
                name: "twitter:creator",
                content: site.author.clone(),
            },
            MetaTag::Name {
                name: "twitter:title",
                content: site.title.clone(),
            },
            MetaTag::Name {
                name: "twitter:description",
                content: site.description.clone(),
            },
        ];
        Self { title, meta }
    }

    /// Look up a tag's content by name or property.
    #[cfg(test)]
    fn content(&self, key: &str) -> Option<&str> {
        self.meta.iter().find_map(|tag| match tag {
            MetaTag::Name { name, content } if *name == key => Some(content.as_str()),
            MetaTag::Property { property, content } if *property == key => {
                Some(content.as_str())
            }
            _ => None,
        })
    }

    pub fn render(&self) -> Markup {
        html! {
            title { (self.title) }
            @for tag in &self.meta {
                @match tag {
                    MetaTag::Name { name, content } => {
                        meta name=(name) content=(content);
                    }
                    MetaTag::Property { property, content } => {
                        meta property=(property) content=(content);
                    }
                }
            }
        }
    }
}
