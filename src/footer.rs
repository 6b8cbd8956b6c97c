//! Site footer.

use crate::config::FooterConfig;
use maud::{Markup, html};

/// Copyright line under the footer logo.
const COPYRIGHT: &str = "© 2020 coding&&community";

const NAVIGATION: [(&str, &str); 4] = [
    ("Programs", "/programs"),
    ("Work With Us", "/work/"),
    ("Team", "/team"),
    ("Blog", "/blog"),
];

/// Social profiles in display order: label, CSS modifier, configured URL.
fn socials(links: &FooterConfig) -> [(&'static str, &'static str, Option<&str>); 5] {
    [
        ("Facebook", "facebook", links.facebook.as_deref()),
        ("Instagram", "instagram", links.instagram.as_deref()),
        ("LinkedIn", "linkedin", links.linkedin.as_deref()),
        ("Twitter", "twitter", links.twitter.as_deref()),
        ("GitHub", "github", links.github.as_deref()),
    ]
}

/// Resource links: label, configured URL, whether it is a site page.
fn resources(links: &FooterConfig) -> [(&'static str, Option<&str>, bool); 4] {
    [
        ("Start a Chapter", links.chapter.as_deref(), true),
        ("Constitution", links.constitution.as_deref(), false),
        ("Swag", links.swag.as_deref(), false),
        ("Style Guide", links.style_guide.as_deref(), false),
    ]
}

/// Render the footer: logo, then Navigation / Resources / Contact columns.
///
/// The layout is fixed; entries without a configured URL are left out.
pub fn render_footer(links: &FooterConfig) -> Markup {
    html! {
        footer.footer-container {
            div.footer-content {
                div.footer-logo {
                    a href="/" aria-label="Home" {
                        span.outline-logo {}
                    }
                    a.footer-author href="/" { (COPYRIGHT) }
                }
                div.footer-info {
                    div.info-column {
                        h5 { "Navigation" }
                        @for (label, href) in NAVIGATION {
                            a.footer-link href=(href) { (label) }
                        }
                    }
                    div.info-column {
                        h5 { "Resources" }
                        @for (label, url, internal) in resources(links) {
                            @if let Some(url) = url {
                                @if internal {
                                    a.footer-link href=(url) { (label) }
                                } @else {
                                    a.footer-link href=(url) rel="noopener" { (label) }
                                }
                            }
                        }
                    }
                    div.info-column {
                        h5 { "Contact" }
                        @if let Some(email) = &links.email {
                            a.footer-link href={ "mailto:" (email) } { (email) }
                        }
                        div.social {
                            @for (label, modifier, url) in socials(links) {
                                @if let Some(url) = url {
                                    a class={ "social-link social-" (modifier) }
                                        href=(url) aria-label=(label) rel="noopener" {}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
