//! Page content queries.
//!
//! Each page declares the exact field set it needs from the CMS as a
//! [`PageQuery`]: a result type that deserializes that shape, paired with the
//! GraphQL text that requests it. The GraphQL is what an export script runs
//! against the CMS to produce `cms.json` (print it with
//! `community-site query <page>`); the result type is how the build reads the
//! answer back. Keeping both in one place keeps them from drifting apart.

use crate::cms::{
    CmsError, CmsExport, CompanyNode, Connection, HomeNode, ProjectNode, null_as_default,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// A page's declared CMS query.
pub trait PageQuery: DeserializeOwned {
    /// Page name used on the command line and in logs.
    const PAGE: &'static str;
    /// GraphQL requesting exactly the fields `Self` reads.
    const GRAPHQL: &'static str;

    /// Read this page's result out of a CMS export.
    fn run(export: &CmsExport) -> Result<Self, CmsError> {
        Self::deserialize(export.data()).map_err(|source| CmsError::Query {
            page: Self::PAGE,
            source,
        })
    }
}

// ============================================================================
// Home
// ============================================================================

/// Homepage content plus the project list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HomeQuery {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prismic: HomeResult,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HomeResult {
    #[serde(rename = "allHomepages", default)]
    pub all_homepages: Option<Connection<HomeNode>>,
    #[serde(rename = "allProjects", default)]
    pub all_projects: Option<Connection<ProjectNode>>,
}

impl PageQuery for HomeQuery {
    const PAGE: &'static str = "home";
    const GRAPHQL: &'static str = r#"{
    prismic {
        allHomepages {
            edges {
                node {
                    hero_title
                    hero_button_text
                    hero_image
                    hero_button_link {
                        ... on PRISMIC__ExternalLink {
                            _linkType
                            url
                        }
                    }
                    content
                    about_title
                    about_bio
                    about_links {
                        about_link
                    }
                }
            }
        }
        allProjects {
            edges {
                node {
                    project_title
                    project_preview_description
                    project_preview_thumbnail
                    project_category
                    project_post_date
                    _meta {
                        uid
                    }
                }
            }
        }
    }
}
"#;
}

// ============================================================================
// Work
// ============================================================================

/// The partner company list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkQuery {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prismic: WorkResult,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkResult {
    #[serde(rename = "allCompanys", default)]
    pub all_companys: Option<Connection<CompanyNode>>,
}

impl PageQuery for WorkQuery {
    const PAGE: &'static str = "work";
    const GRAPHQL: &'static str = r#"{
    prismic {
        allCompanys {
            edges {
                node {
                    company_logo
                    company_name
                    company_website {
                        _linkType
                        ... on PRISMIC__ExternalLink {
                            _linkType
                            url
                        }
                    }
                }
            }
        }
    }
}
"#;
}
