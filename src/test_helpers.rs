//! Shared test utilities.
//!
//! Builders for CMS edges and query results (as JSON, the way they arrive in
//! an export), fixture setup, and extractors over assembled views.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let query = home_query(json!({
//!     "allHomepages": { "edges": [home_edge("Welcome")] },
//!     "allProjects": { "edges": [project_edge("One", "one")] }
//! }));
//! let view = assemble_home(&query).unwrap();
//! assert_eq!(card_uids(&view), vec!["one"]);
//! ```

use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;

use crate::assemble::{HomeView, WorkView};
use crate::cms::{CmsExport, ProjectNode, load_export};
use crate::config::SiteConfig;
use crate::generate::SiteContext;
use crate::query::{HomeQuery, WorkQuery};
use crate::rich_text::text_of;

// =========================================================================
// Fixture setup
// =========================================================================

fn fixtures_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir(), tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// The fixture `cms.json`, loaded in place.
pub fn fixture_export() -> CmsExport {
    load_export(&fixtures_dir()).unwrap()
}

/// Render context with a fixed stylesheet href.
pub fn test_site(config: &SiteConfig) -> SiteContext<'_> {
    SiteContext {
        config,
        stylesheet_href: "/style.test.css".to_string(),
    }
}

// =========================================================================
// Edge builders
// =========================================================================

/// A homepage edge whose hero title is `title`.
pub fn home_edge(title: &str) -> Value {
    json!({ "node": {
        "hero_title": [{ "type": "heading1", "text": title, "spans": [] }],
        "about_bio": [{ "type": "paragraph", "text": "About us.", "spans": [] }],
        "about_links": []
    } })
}

/// A project edge with a plain-string title.
pub fn project_edge(title: &str, uid: &str) -> Value {
    json!({ "node": { "project_title": title, "_meta": { "uid": uid } } })
}

/// A company edge, with an external website link when `website` is set.
pub fn company_edge(name: &str, website: Option<&str>) -> Value {
    match website {
        Some(url) => json!({ "node": {
            "company_name": name,
            "company_website": { "_linkType": "Link.web", "url": url }
        } }),
        None => json!({ "node": { "company_name": name } }),
    }
}

pub fn project_node(value: Value) -> ProjectNode {
    serde_json::from_value(value).unwrap()
}

/// Build a home query result from the contents of its `prismic` object.
pub fn home_query(prismic: Value) -> HomeQuery {
    serde_json::from_value(json!({ "prismic": prismic })).unwrap()
}

/// Build a work query result from the contents of its `prismic` object.
pub fn work_query(prismic: Value) -> WorkQuery {
    serde_json::from_value(json!({ "prismic": prismic })).unwrap()
}

// =========================================================================
// View extractors
// =========================================================================

/// Card uids in render order.
pub fn card_uids(view: &HomeView) -> Vec<&str> {
    view.projects.iter().map(|c| c.uid.as_str()).collect()
}

/// Card titles in render order.
pub fn card_titles(view: &HomeView) -> Vec<&str> {
    view.projects.iter().map(|c| c.title.as_str()).collect()
}

/// Company names in render order.
pub fn company_names(view: &WorkView) -> Vec<String> {
    view.companies
        .iter()
        .map(|c| text_of(c.company_name.as_ref()))
        .collect()
}
