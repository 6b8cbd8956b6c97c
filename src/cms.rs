//! CMS export loading and record types.
//!
//! The site is built from an export of the headless CMS: the JSON result of
//! running the page queries (see [`crate::query`]) against it, saved as
//! `cms.json` in the content root. Both the bare result and the GraphQL
//! response envelope are accepted:
//!
//! ```json
//! { "prismic": { "allHomepages": { "edges": [...] }, ... } }
//! { "data": { "prismic": { ... } } }
//! ```
//!
//! ## Absent vs. empty
//!
//! A connection (`allProjects`, `allCompanys`, ...) that is missing, `null`,
//! or has `"edges": null` is *absent*. A connection with `"edges": []` is
//! *empty*. Pages render nothing for absent data but do render for empty
//! lists, so the two are kept distinct as `Option<Vec<_>>`.
//!
//! Record fields are all optional except the project uid, which is the
//! rendering key for project cards. Unknown fields are ignored so one export
//! can carry the data for every page.

use crate::rich_text::RichText;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the export file inside the content root.
pub const EXPORT_FILENAME: &str = "cms.json";

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CMS export does not match the {page} query: {source}")]
    Query {
        page: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The loaded CMS export, with any `data` envelope removed.
#[derive(Debug, Clone)]
pub struct CmsExport {
    data: serde_json::Value,
}

impl CmsExport {
    pub fn from_value(value: serde_json::Value) -> Self {
        let data = match value {
            serde_json::Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or_default()
            }
            other => other,
        };
        Self { data }
    }

    pub fn from_json(json: &str) -> Result<Self, CmsError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// The query result the page queries deserialize from.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

/// Load `cms.json` from the content root.
pub fn load_export(root: &Path) -> Result<CmsExport, CmsError> {
    let path = root.join(EXPORT_FILENAME);
    let content = fs::read_to_string(&path)?;
    let export = CmsExport::from_json(&content)?;
    tracing::debug!(path = %path.display(), "loaded CMS export");
    Ok(export)
}

/// Deserialize `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Connection wrappers
// ============================================================================

/// A list of records as returned by the CMS: `{ "edges": [{ "node": ... }] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub edges: Option<Vec<Edge<T>>>,
}

impl<T> Connection<T> {
    /// The records in query order, or `None` when the list is absent.
    pub fn nodes(&self) -> Option<impl Iterator<Item = &T>> {
        self.edges.as_ref().map(|edges| edges.iter().map(|e| &e.node))
    }

    /// The first record, if the list is present and non-empty.
    pub fn first(&self) -> Option<&T> {
        self.edges.as_ref()?.first().map(|e| &e.node)
    }
}

/// A single record inside a [`Connection`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

// ============================================================================
// Field types
// ============================================================================

/// An image field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub dimensions: Option<ImageDimensions>,
}

impl ImageRef {
    /// Intrinsic `(width, height)` in pixels, when the CMS reports them.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.dimensions
            .filter(|d| d.width > 0 && d.height > 0)
            .map(|d| (d.width, d.height))
    }

    pub fn alt_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.alt.as_deref().filter(|a| !a.is_empty()).unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

const DOCUMENT_LINK: &str = "Link.document";

/// A link field.
///
/// Only external, web, and media links carry a `url`. Document links point
/// at CMS pages this site does not route, so they have no `href` even when
/// the export includes a `url` for them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    #[serde(rename = "_linkType", default)]
    pub link_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Link {
    pub fn href(&self) -> Option<&str> {
        if self.link_type.as_deref() == Some(DOCUMENT_LINK) {
            return None;
        }
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// System metadata attached to every document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Meta {
    /// Stable unique identifier of the document.
    pub uid: String,
}

// ============================================================================
// Records
// ============================================================================

/// The homepage document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HomeNode {
    #[serde(default)]
    pub hero_title: Option<RichText>,
    #[serde(default)]
    pub hero_button_text: Option<RichText>,
    #[serde(default)]
    pub hero_button_link: Option<Link>,
    #[serde(default)]
    pub hero_image: Option<ImageRef>,
    /// Main body copy.
    #[serde(default)]
    pub content: Option<RichText>,
    #[serde(default)]
    pub about_title: Option<RichText>,
    #[serde(default)]
    pub about_bio: Option<RichText>,
    /// Social links shown beside the bio.
    #[serde(default, deserialize_with = "null_as_default")]
    pub about_links: Vec<AboutLink>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AboutLink {
    #[serde(default)]
    pub about_link: Option<RichText>,
}

/// A project summary, as listed on the homepage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectNode {
    #[serde(default)]
    pub project_title: Option<RichText>,
    #[serde(default)]
    pub project_preview_description: Option<RichText>,
    #[serde(default)]
    pub project_preview_thumbnail: Option<ImageRef>,
    #[serde(default)]
    pub project_category: Option<RichText>,
    #[serde(default)]
    pub project_post_date: Option<String>,
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

/// A partner company, as listed on the work page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyNode {
    #[serde(default)]
    pub company_logo: Option<ImageRef>,
    #[serde(default)]
    pub company_name: Option<RichText>,
    #[serde(default)]
    pub company_website: Option<Link>,
}
