//! # community-site
//!
//! Static site generator for the coding&&community website. Page content
//! lives in a headless CMS; this crate turns an export of that content into
//! plain HTML.
//!
//! # Architecture: Load → Assemble → Generate
//!
//! ```text
//! 1. Load      content/cms.json, config.toml  →  typed query results
//! 2. Assemble  query results                  →  page view-models
//! 3. Generate  view-models                    →  dist/ (HTML, CSS, assets)
//! ```
//!
//! Each page declares the fields it needs as a [`query::PageQuery`]. The
//! assemblers in [`assemble`] check for the data a page cannot do without and
//! project the records into view-models; rendering is a pure function of
//! those view-models. When required data is absent the page renders nothing
//! and is left out of the build, which still succeeds.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cms`] | Export loading and CMS record types (edges, nodes, images, links) |
//! | [`query`] | Per-page field declarations: result types plus their GraphQL |
//! | [`assemble`] | Query results → view-models (`HomeView`, `WorkView`, `ProjectCard`) |
//! | [`rich_text`] | CMS rich text and markdown → HTML |
//! | [`generate`] | Page renderers, stylesheet, asset copying, output writing |
//! | [`seo`] | `<title>` and social-card meta tags from site metadata |
//! | [`footer`] | Footer renderer |
//! | [`config`] | `config.toml` loading, validation, merging, and theme CSS |
//! | [`output`] | CLI report formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Export, Not Live Queries
//!
//! The build reads a saved query result rather than calling the CMS. Builds
//! are reproducible from a file in version control, and the tool needs no
//! network access or credentials. `community-site query <page>` prints the
//! GraphQL that produces the export.
//!
//! ## Absent Is Not Empty
//!
//! A list the CMS did not return at all blanks its page; a list that came back
//! empty renders the page with nothing in it. [`cms::Connection`] keeps the
//! two apart as `Option<Vec<_>>`.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are Rust
//! expressions checked at compile time, and every interpolation is escaped.
//! CMS text can never inject markup: raw HTML inside markdown fields is
//! escaped too. The one raw path is an embed block's oEmbed snippet, which
//! the CMS fetches from the embedded provider.

pub mod assemble;
pub mod cms;
pub mod config;
pub mod footer;
pub mod generate;
pub mod logging;
pub mod output;
pub mod query;
pub mod rich_text;
pub mod seo;

#[cfg(test)]
pub(crate) mod test_helpers;
