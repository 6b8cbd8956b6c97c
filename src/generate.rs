//! HTML site generation.
//!
//! Final stage of the build. Runs each page's query against the CMS export,
//! assembles the view-models, renders them with Maud, and writes the result.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, project cards, "see more work" link, about
//! - **Work** (`/work/index.html`): role, educator, partner companies, join
//!
//! A page whose required data is absent is not written (and a stale copy
//! from an earlier build is removed); the build itself still succeeds. A page
//! whose data does not match its query fails on its own: the other pages are
//! still written and the report marks the failure.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── style.1a2b3c4d.css          # Fingerprinted stylesheet
//! ├── work/
//! │   └── index.html
//! └── ...                          # Everything under content/assets/
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and prefixed with the
//! custom properties and breakpoint rules generated from config. The file
//! name carries the first 8 hex digits of the SHA-256 of its contents, so a
//! style change always busts caches. Stylesheets left by earlier builds are
//! removed when a new one is written.

use crate::assemble::{self, HomeView, ProjectCard, WorkView};
use crate::cms::{CmsExport, CompanyNode, HomeNode, ImageRef};
use crate::config::{self, SiteConfig};
use crate::footer::render_footer;
use crate::query::{HomeQuery, PageQuery, WorkQuery};
use crate::rich_text::text_of;
use crate::seo::Head;
use maud::{DOCTYPE, Markup, html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Asset path error: {0}")]
    AssetPath(#[from] std::path::StripPrefixError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Static assets directory inside the content root.
pub const ASSETS_DIR: &str = "assets";

/// Page name and output path, relative to the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub name: &'static str,
    pub path: &'static str,
    /// Singular and plural noun for the entries the page lists.
    pub entries: (&'static str, &'static str),
}

pub const HOME_PAGE: PageSpec = PageSpec {
    name: "Home",
    path: "index.html",
    entries: ("project", "projects"),
};

pub const WORK_PAGE: PageSpec = PageSpec {
    name: "Work",
    path: "work/index.html",
    entries: ("company", "companies"),
};

/// Result of rendering one page.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rendered {
        /// One display line per listed entry (project or company), in order.
        entries: Vec<String>,
        html: String,
    },
    Blank(assemble::Blank),
    /// The export did not match the page's query.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub spec: PageSpec,
    pub outcome: Outcome,
}

impl RenderedPage {
    pub fn html(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Rendered { html, .. } => Some(html),
            Outcome::Blank(_) | Outcome::Failed(_) => None,
        }
    }

    /// The query error, when the page failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// What a build wrote.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub pages: Vec<RenderedPage>,
    /// Stylesheet file name, relative to the output root.
    pub stylesheet: String,
    pub assets_copied: usize,
}

impl GenerateReport {
    /// Names of the pages whose query failed.
    pub fn failed_pages(&self) -> Vec<&'static str> {
        failed_pages(&self.pages)
    }
}

/// Names of the pages whose query failed.
pub fn failed_pages(pages: &[RenderedPage]) -> Vec<&'static str> {
    pages
        .iter()
        .filter(|p| p.failure().is_some())
        .map(|p| p.spec.name)
        .collect()
}

/// The generated stylesheet and its fingerprinted file name.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    pub filename: String,
    pub contents: String,
}

impl Stylesheet {
    pub fn build(config: &SiteConfig) -> Self {
        let contents = format!("{}\n\n{}", config::generate_theme_css(config), CSS_STATIC);
        let digest = Sha256::digest(contents.as_bytes());
        let fingerprint: String = digest[..4].iter().map(|b| format!("{b:02x}")).collect();
        Self {
            filename: format!("style.{fingerprint}.css"),
            contents,
        }
    }

    pub fn href(&self) -> String {
        format!("/{}", self.filename)
    }
}

/// Shared inputs for every page renderer.
pub struct SiteContext<'a> {
    pub config: &'a SiteConfig,
    pub stylesheet_href: String,
}

/// Render every page from the export without touching the filesystem.
///
/// Each page runs its own query, so an export that breaks one page's query
/// leaves the others unaffected.
pub fn render_site(export: &CmsExport, site: &SiteContext) -> Vec<RenderedPage> {
    let home = page_outcome(export, |query: HomeQuery| {
        match assemble::assemble_home(&query) {
            Ok(view) => {
                for uid in assemble::duplicate_uids(&view.projects) {
                    tracing::warn!(uid, "duplicate project uid");
                }
                Outcome::Rendered {
                    entries: view.projects.iter().map(card_line).collect(),
                    html: render_home_page(&view, site).into_string(),
                }
            }
            Err(blank) => Outcome::Blank(blank),
        }
    });

    let work = page_outcome(export, |query: WorkQuery| {
        match assemble::assemble_work(&query) {
            Ok(view) => Outcome::Rendered {
                entries: view.companies.iter().map(company_name).collect(),
                html: render_work_page(&view, site).into_string(),
            },
            Err(blank) => Outcome::Blank(blank),
        }
    });

    vec![
        RenderedPage {
            spec: HOME_PAGE,
            outcome: home,
        },
        RenderedPage {
            spec: WORK_PAGE,
            outcome: work,
        },
    ]
}

fn page_outcome<Q: PageQuery>(
    export: &CmsExport,
    render: impl FnOnce(Q) -> Outcome,
) -> Outcome {
    match Q::run(export) {
        Ok(query) => render(query),
        Err(err) => {
            tracing::error!(page = Q::PAGE, error = %err, "page query failed");
            Outcome::Failed(err.to_string())
        }
    }
}

/// Build the site into `output_dir`.
///
/// `source` is the content root; its `assets/` directory is copied verbatim.
pub fn generate(
    source: &Path,
    output_dir: &Path,
    config: &SiteConfig,
    export: &CmsExport,
) -> Result<GenerateReport, GenerateError> {
    let stylesheet = Stylesheet::build(config);
    let site = SiteContext {
        config,
        stylesheet_href: stylesheet.href(),
    };
    let pages = render_site(export, &site);

    fs::create_dir_all(output_dir)?;
    remove_old_stylesheets(output_dir, &stylesheet.filename)?;
    fs::write(output_dir.join(&stylesheet.filename), &stylesheet.contents)?;

    for page in &pages {
        let target = output_dir.join(page.spec.path);
        match &page.outcome {
            Outcome::Rendered { html, entries } => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&target, html)?;
                tracing::info!(
                    page = page.spec.name,
                    entries = entries.len(),
                    path = page.spec.path,
                    "generated"
                );
            }
            Outcome::Blank(reason) => {
                if target.exists() {
                    fs::remove_file(&target)?;
                }
                tracing::warn!(page = page.spec.name, %reason, "page rendered nothing, skipped");
            }
            Outcome::Failed(_) => {
                if target.exists() {
                    fs::remove_file(&target)?;
                }
            }
        }
    }

    let assets_copied = copy_assets(&source.join(ASSETS_DIR), output_dir)?;

    Ok(GenerateReport {
        pages,
        stylesheet: stylesheet.filename,
        assets_copied,
    })
}

/// True for names [`Stylesheet::build`] produces: `style.<8 hex>.css`.
fn is_fingerprinted_stylesheet(name: &str) -> bool {
    name.strip_prefix("style.")
        .and_then(|rest| rest.strip_suffix(".css"))
        .is_some_and(|hash| hash.len() == 8 && hash.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Delete fingerprinted stylesheets in the output root other than `keep`.
fn remove_old_stylesheets(output_dir: &Path, keep: &str) -> Result<(), GenerateError> {
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if is_fingerprinted_stylesheet(name) && name != keep && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            tracing::debug!(file = name, "removed old stylesheet");
        }
    }
    Ok(())
}

/// Copy every file under `src` into `dst`, keeping relative paths.
///
/// Returns the number of files copied; a missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(src)?;
        let target: PathBuf = dst.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied += 1;
    }
    tracing::debug!(copied, from = %src.display(), "copied assets");
    Ok(copied)
}

fn card_line(card: &ProjectCard) -> String {
    format!("{} ({})", card.title, card.uid)
}

fn company_name(company: &CompanyNode) -> String {
    let name = text_of(company.company_name.as_ref());
    if name.is_empty() {
        "(unnamed)".to_string()
    } else {
        name
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document: head tags, header, page content, footer.
fn base_document(head: &Head, site: &SiteContext, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (head.render())
                link rel="stylesheet" href=(site.stylesheet_href);
            }
            body class=(body_class) {
                (site_header())
                main {
                    (content)
                }
                (render_footer(&site.config.footer))
            }
        }
    }
}

fn site_header() -> Markup {
    html! {
        header.site-header {
            div.header-content {
                a.header-logo href="/" aria-label="Home" {
                    span.outline-logo {}
                }
                nav.header-links {
                    a href="/work/" { "Work" }
                }
            }
        }
    }
}

/// Percent-encode the characters that could end a quoted CSS `url()`.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '"' | '\'' | '(' | ')' | '\\' | '<' | '>' => {
                out.push_str(&format!("%{:02X}", ch as u32));
            }
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

fn hero(home: &HomeNode, background: Option<&str>) -> Markup {
    let style = background.map(|url| format!("background-image: url(\"{}\")", css_url(url)));
    let button_href = home.hero_button_link.as_ref().and_then(|l| l.href());
    html! {
        section.hero style=[style] {
            div.hero-content {
                @if let Some(title) = home.hero_title.as_ref().filter(|t| !t.is_empty()) {
                    div.hero-title { (title.render()) }
                }
                @if let Some(content) = home.content.as_ref().filter(|c| !c.is_empty()) {
                    div.hero-body { (content.render()) }
                }
                @if let (Some(text), Some(href)) = (&home.hero_button_text, button_href) {
                    a.hero-button href=(href) rel="noopener" { (text.as_text()) }
                }
            }
        }
    }
}

fn project_card(card: &ProjectCard) -> Markup {
    html! {
        article.project-card data-uid=(card.uid) {
            div.project-card-content {
                @if !card.category.is_empty() {
                    div.project-card-category { (card.category) }
                }
                h3.project-card-title { (card.title) }
                @if let Some(description) = &card.description {
                    div.project-card-blurb { (description.render()) }
                }
            }
            @if let Some(thumbnail) = &card.thumbnail {
                div.project-card-image {
                    (image(thumbnail, &card.title, "project-card-thumbnail"))
                }
            }
        }
    }
}

/// Lazy-loaded `<img>`, sized when the CMS reports dimensions.
fn image(img: &ImageRef, fallback_alt: &str, class: &str) -> Markup {
    let size = img.size();
    html! {
        img class=(class) src=(img.url) alt=(img.alt_or(fallback_alt))
            width=[size.map(|s| s.0)] height=[size.map(|s| s.1)] loading="lazy";
    }
}

fn about(home: &HomeNode) -> Markup {
    html! {
        div.about-container {
            div.about-links {
                @for link in home.about_links.iter().filter_map(|l| l.about_link.as_ref()) {
                    div.about-link { (link.render()) }
                }
            }
            @if let Some(bio) = &home.about_bio {
                div.about-bio { (bio.render()) }
            }
        }
    }
}

fn company_entry(company: &CompanyNode) -> Markup {
    let name = text_of(company.company_name.as_ref());
    let inner = html! {
        @if let Some(logo) = &company.company_logo {
            (image(logo, &name, "company-logo"))
        }
        span.company-name { (name) }
    };
    match company.company_website.as_ref().and_then(|w| w.href()) {
        Some(href) => html! {
            a.company href=(href) target="_blank" rel="noopener" { (inner) }
        },
        None => html! {
            div.company { (inner) }
        },
    }
}

fn company_section(companies: &[CompanyNode]) -> Markup {
    html! {
        div.company-section {
            h2 { "Partner companies" }
            p {
                "These companies hire our members, sponsor our events, and send "
                "engineers to mentor."
            }
            ul.company-list {
                @for company in companies {
                    li { (company_entry(company)) }
                }
            }
        }
    }
}

fn role_section() -> Markup {
    html! {
        div.role-section {
            h1.work-title { "Work With Us" }
            p {
                "We run project teams, workshops, and hackathons for students who "
                "want to build real software. Partners help us reach further."
            }
        }
    }
}

fn educator_section() -> Markup {
    html! {
        div.educator-section {
            h2 { "Teach with us" }
            p {
                "Educators lead workshops and mentor project teams. Share what you "
                "know with students who are learning to ship."
            }
        }
    }
}

fn join_section() -> Markup {
    html! {
        div.join-section {
            h2 { "Bring us to your university" }
            p {
                "Every chapter is run by students. Start one on your campus and "
                "we will help with curriculum, speakers, and partners."
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the homepage.
pub fn render_home_page(view: &HomeView, site: &SiteContext) -> Markup {
    let head = Head::for_page(None, &site.config.metadata);
    let home = &view.home;

    let content = html! {
        (hero(home, view.hero_background.as_deref()))
        div.layout-container {
            section.section.projects {
                @for card in &view.projects {
                    (project_card(card))
                }
                a.work-action href=(view.work_link) {
                    "See more work " span { "→" }
                }
            }
            section.section.about {
                @if let Some(title) = &home.about_title {
                    (title.render())
                }
                (about(home))
            }
        }
    };

    base_document(&head, site, "home-page", content)
}

/// Renders the work page: three static sections around the company list.
pub fn render_work_page(view: &WorkView, site: &SiteContext) -> Markup {
    let head = Head::for_page(Some(WORK_PAGE.name), &site.config.metadata);

    let content = html! {
        section.section.work-section {
            div.layout-container { (role_section()) }
        }
        section.section.work-section id="teacher" {
            div.layout-container { (educator_section()) }
        }
        section.section.work-section id="company" {
            div.layout-container { (company_section(&view.companies)) }
        }
        section.section.work-section id="university" {
            div.layout-container { (join_section()) }
        }
    };

    base_document(&head, site, "work-page", content)
}

// ============================================================================
// Tests
// ============================================================================
