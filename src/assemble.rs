//! View assembly: CMS query results → page view-models.
//!
//! Each page-level assembler takes its query result, checks that the data it
//! cannot render without is present, and projects the records into the props
//! the renderers in [`crate::generate`] consume. Absent data is a normal
//! outcome, reported as a [`Blank`] reason, and the page is not rendered.
//!
//! Order is significant everywhere: cards and companies keep the order the
//! CMS returned them in.

use crate::cms::{CompanyNode, HomeNode, ImageRef, ProjectNode};
use crate::query::{HomeQuery, WorkQuery};
use crate::rich_text::{RichText, text_of};
use std::collections::HashSet;
use std::fmt;

/// Where the homepage's "see more" link points.
pub const WORK_LINK: &str = "/work/";

/// Why a page rendered nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blank {
    /// The export holds no homepage document.
    MissingHomeRecord,
    /// The project list is absent (not merely empty).
    MissingProjects,
    /// The company list is absent (not merely empty).
    MissingCompanies,
}

impl fmt::Display for Blank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Blank::MissingHomeRecord => "no homepage record",
            Blank::MissingProjects => "project list absent",
            Blank::MissingCompanies => "company list absent",
        };
        f.write_str(reason)
    }
}

/// Card props for one project on the homepage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub category: String,
    pub title: String,
    pub description: Option<RichText>,
    pub thumbnail: Option<ImageRef>,
    /// Rendering key, the document uid.
    pub uid: String,
}

impl From<&ProjectNode> for ProjectCard {
    fn from(node: &ProjectNode) -> Self {
        Self {
            category: text_of(node.project_category.as_ref()),
            title: text_of(node.project_title.as_ref()),
            description: node.project_preview_description.clone(),
            thumbnail: node.project_preview_thumbnail.clone(),
            uid: node.meta.uid.clone(),
        }
    }
}

/// Everything the homepage renders.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub home: HomeNode,
    /// Hero background image URL.
    pub hero_background: Option<String>,
    pub projects: Vec<ProjectCard>,
    pub work_link: &'static str,
}

/// Everything the work page renders. Companies pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkView {
    pub companies: Vec<CompanyNode>,
}

/// Assemble the homepage from its query result.
///
/// Uses the first homepage record. Both the record and the project list must
/// be present; an empty project list still assembles.
pub fn assemble_home(query: &HomeQuery) -> Result<HomeView, Blank> {
    let home = query
        .prismic
        .all_homepages
        .as_ref()
        .and_then(|c| c.first())
        .ok_or(Blank::MissingHomeRecord)?;
    let projects = query
        .prismic
        .all_projects
        .as_ref()
        .and_then(|c| c.nodes())
        .ok_or(Blank::MissingProjects)?
        .map(ProjectCard::from)
        .collect();

    Ok(HomeView {
        hero_background: home.hero_image.as_ref().map(|img| img.url.clone()),
        home: home.clone(),
        projects,
        work_link: WORK_LINK,
    })
}

/// Assemble the work page from its query result.
pub fn assemble_work(query: &WorkQuery) -> Result<WorkView, Blank> {
    let companies = query
        .prismic
        .all_companys
        .as_ref()
        .and_then(|c| c.nodes())
        .ok_or(Blank::MissingCompanies)?
        .cloned()
        .collect();
    Ok(WorkView { companies })
}

/// Card uids that appear more than once, in first-seen order.
///
/// Duplicate keys still render; `check` reports them so they can be fixed in
/// the CMS.
pub fn duplicate_uids(cards: &[ProjectCard]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for card in cards {
        let uid = card.uid.as_str();
        if !seen.insert(uid) && reported.insert(uid) {
            duplicates.push(uid);
        }
    }
    duplicates
}
