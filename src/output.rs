//! CLI output formatting.
//!
//! Output is information-first: each page leads with its name and output
//! path, followed by the entries it lists (projects, companies) as indented
//! positional lines. Skipped pages are listed with the reason they rendered
//! nothing; failed pages with the query error.
//!
//! ```text
//! Home → index.html (3 projects)
//!     001 Spring Hackathon (hackathon)
//!     002 Weekly Workshops (workshops)
//! Work → work/index.html (2 companies)
//!     001 Acme
//!     002 Globex
//!
//! Generated 2 pages, skipped 0
//! ```
//!
//! Format functions are pure and return lines for testability; `print_*`
//! wrappers write them to stdout. Diagnostics go through `tracing` on stderr
//! instead.

use crate::generate::{GenerateReport, Outcome, RenderedPage};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn entry_count(page: &RenderedPage, count: usize) -> String {
    let (one, many) = page.spec.entries;
    let noun = if count == 1 { one } else { many };
    format!("{count} {noun}")
}

/// Format the page listing shared by `build` and `check`.
pub fn format_pages(pages: &[RenderedPage]) -> Vec<String> {
    let mut lines = Vec::new();
    for page in pages {
        match &page.outcome {
            Outcome::Rendered { entries, .. } => {
                lines.push(format!(
                    "{} → {} ({})",
                    page.spec.name,
                    page.spec.path,
                    entry_count(page, entries.len())
                ));
                for (i, entry) in entries.iter().enumerate() {
                    lines.push(format!("{}{} {}", indent(1), format_index(i + 1), entry));
                }
            }
            Outcome::Blank(reason) => {
                lines.push(format!("{} → skipped ({})", page.spec.name, reason));
            }
            Outcome::Failed(error) => {
                lines.push(format!("{} → failed ({})", page.spec.name, error));
            }
        }
    }
    lines
}

fn summary_line(pages: &[RenderedPage], verb: &str) -> String {
    let rendered = pages.iter().filter(|p| p.html().is_some()).count();
    let failed = pages.iter().filter(|p| p.failure().is_some()).count();
    let skipped = pages.len() - rendered - failed;
    let mut line = format!("{verb} {}, skipped {skipped}", plural(rendered, "page"));
    if failed > 0 {
        line.push_str(&format!(", failed {failed}"));
    }
    line
}

/// Format output for the `build` command.
pub fn format_build_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = format_pages(&report.pages);
    lines.push(format!("Stylesheet → {}", report.stylesheet));
    if report.assets_copied > 0 {
        lines.push(format!("Assets → {} copied", plural(report.assets_copied, "file")));
    }
    lines.push(String::new());
    lines.push(summary_line(&report.pages, "Generated"));
    lines
}

/// Format output for the `check` command.
pub fn format_check_output(pages: &[RenderedPage]) -> Vec<String> {
    let mut lines = format_pages(pages);
    lines.push(String::new());
    lines.push(summary_line(pages, "Would generate"));
    lines
}

pub fn print_build_output(report: &GenerateReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

pub fn print_check_output(pages: &[RenderedPage]) {
    for line in format_check_output(pages) {
        println!("{}", line);
    }
}
