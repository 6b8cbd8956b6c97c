//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to the CMS export and is sparse: user values are
//! merged over stock defaults, so it only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [metadata]
//! title = "coding&&community"
//! description = "A student-run community teaching code, together."
//! author = "@codingcommunity"
//!
//! [colors]
//! background = "#ffffff"
//! text = "#16161a"
//! text_muted = "#6b6b76"
//! brand = "#1b2a4a"       # Footer and alternating section background
//! accent = "#3b7ddd"      # Hover color for call-to-action links
//! highlight = "#7fd1f7"   # Hover color for footer links and icons
//!
//! [dimensions]
//! maxwidth_desktop = 1200            # px
//! maxwidth_tablet = 768              # px, tablet breakpoint
//! maxwidth_mobile = 600              # px, mobile breakpoint
//! padding_horizontal_desktop = 2.0   # em
//! padding_horizontal_tablet = 1.5    # em
//! padding_horizontal_mobile = 1.25   # em
//!
//! [footer]
//! # Every URL is optional; footer entries without one are omitted.
//! # email = "hello@example.org"
//! # facebook = "https://facebook.com/..."
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file inside the content root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. The whole struct is read-only once loaded and is
/// the single home for the site's style constants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Fixed site metadata used for `<title>` and social-card tags.
    pub metadata: SiteMetadata,
    /// Brand color palette.
    pub colors: ColorConfig,
    /// Layout widths and breakpoints.
    pub dimensions: DimensionsConfig,
    /// Contact, social, and resource URLs shown in the footer.
    pub footer: FooterConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metadata.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "metadata.title must not be empty".into(),
            ));
        }
        let d = &self.dimensions;
        if d.maxwidth_mobile == 0 || d.maxwidth_tablet == 0 || d.maxwidth_desktop == 0 {
            return Err(ConfigError::Validation(
                "dimensions.maxwidth_* values must be non-zero".into(),
            ));
        }
        if d.maxwidth_mobile > d.maxwidth_tablet || d.maxwidth_tablet > d.maxwidth_desktop {
            return Err(ConfigError::Validation(
                "dimensions must satisfy maxwidth_mobile <= maxwidth_tablet <= maxwidth_desktop"
                    .into(),
            ));
        }
        let paddings = [
            d.padding_horizontal_desktop,
            d.padding_horizontal_tablet,
            d.padding_horizontal_mobile,
        ];
        if paddings.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(ConfigError::Validation(
                "dimensions.padding_horizontal_* values must be non-negative".into(),
            ));
        }
        for (key, value) in self.colors.entries() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "colors.{key} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Site-wide metadata: the page title suffix, description, and author handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    /// Social handle credited as `twitter:creator`.
    pub author: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "coding&&community".to_string(),
            description: "A student-run community teaching code, together.".to_string(),
            author: "@codingcommunity".to_string(),
        }
    }
}

/// Brand color palette, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Page background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (card categories, copyright line).
    pub text_muted: String,
    /// Footer and alternating section background.
    pub brand: String,
    /// Hover color for call-to-action links.
    pub accent: String,
    /// Hover color for footer links and social icons.
    pub highlight: String,
}

impl ColorConfig {
    /// Config key and value of every color, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("background", self.background.as_str()),
            ("text", self.text.as_str()),
            ("text_muted", self.text_muted.as_str()),
            ("brand", self.brand.as_str()),
            ("accent", self.accent.as_str()),
            ("highlight", self.highlight.as_str()),
        ]
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#16161a".to_string(),
            text_muted: "#6b6b76".to_string(),
            brand: "#1b2a4a".to_string(),
            accent: "#3b7ddd".to_string(),
            highlight: "#7fd1f7".to_string(),
        }
    }
}

/// Layout widths (px) and horizontal paddings (em) per breakpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimensionsConfig {
    pub maxwidth_desktop: u32,
    pub maxwidth_tablet: u32,
    pub maxwidth_mobile: u32,
    pub padding_horizontal_desktop: f64,
    pub padding_horizontal_tablet: f64,
    pub padding_horizontal_mobile: f64,
}

impl Default for DimensionsConfig {
    fn default() -> Self {
        Self {
            maxwidth_desktop: 1200,
            maxwidth_tablet: 768,
            maxwidth_mobile: 600,
            padding_horizontal_desktop: 2.0,
            padding_horizontal_tablet: 1.5,
            padding_horizontal_mobile: 1.25,
        }
    }
}

/// Footer URLs. Absent entries are left out of the rendered footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    /// Contact address, rendered as a `mailto:` link.
    pub email: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    /// "Start a Chapter" page, usually a site-relative path.
    pub chapter: Option<String>,
    pub constitution: Option<String>,
    pub style_guide: Option<String>,
    pub swag: Option<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# community-site configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site metadata (page titles, description and social-card tags)
# ---------------------------------------------------------------------------
[metadata]
title = "coding&&community"
description = "A student-run community teaching code, together."
# Handle credited in the twitter:creator tag.
author = "@codingcommunity"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#ffffff"
text = "#16161a"
text_muted = "#6b6b76"    # Card categories, copyright line
brand = "#1b2a4a"         # Footer and alternating section background
accent = "#3b7ddd"        # Hover color for call-to-action links
highlight = "#7fd1f7"     # Hover color for footer links and icons

# ---------------------------------------------------------------------------
# Layout widths and breakpoints
# ---------------------------------------------------------------------------
[dimensions]
maxwidth_desktop = 1200            # px, content column width
maxwidth_tablet = 768              # px, tablet breakpoint
maxwidth_mobile = 600              # px, mobile breakpoint
padding_horizontal_desktop = 2.0   # em
padding_horizontal_tablet = 1.5    # em
padding_horizontal_mobile = 1.25   # em

# ---------------------------------------------------------------------------
# Footer links. Entries left unset are omitted from the footer.
# ---------------------------------------------------------------------------
[footer]
# email = "hello@example.org"
# facebook = "https://www.facebook.com/example"
# instagram = "https://www.instagram.com/example"
# linkedin = "https://www.linkedin.com/company/example"
# twitter = "https://twitter.com/example"
# github = "https://github.com/example"
# chapter = "/chapter"
# constitution = "https://example.org/constitution.pdf"
# style_guide = "https://example.org/style"
# swag = "https://example.org/swag"
"##
}

/// Generate CSS custom properties and breakpoint rules from the config.
///
/// Breakpoints cannot be expressed through custom properties inside a media
/// query condition, so the widths are written into the rules directly.
pub fn generate_theme_css(config: &SiteConfig) -> String {
    let colors = &config.colors;
    let d = &config.dimensions;
    format!(
        r#":root {{
    --color-background: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-brand: {brand};
    --color-accent: {accent};
    --color-highlight: {highlight};
    --max-width: {desktop}px;
    --padding-x: {pad_desktop}em;
}}

@media (max-width: {tablet}px) {{
    :root {{
        --padding-x: {pad_tablet}em;
    }}
    .section {{
        margin-bottom: 4em;
    }}
    .work-action {{
        margin: 0 auto;
    }}
    .footer-content {{
        flex-direction: column;
        justify-content: center;
    }}
}}

@media (max-width: {mobile}px) {{
    :root {{
        --padding-x: {pad_mobile}em;
    }}
    .footer-info {{
        flex-direction: column;
        justify-content: center;
    }}
    .info-column {{
        margin-top: 1.5rem;
    }}
}}"#,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        brand = colors.brand,
        accent = colors.accent,
        highlight = colors.highlight,
        desktop = d.maxwidth_desktop,
        tablet = d.maxwidth_tablet,
        mobile = d.maxwidth_mobile,
        pad_desktop = d.padding_horizontal_desktop,
        pad_tablet = d.padding_horizontal_tablet,
        pad_mobile = d.padding_horizontal_mobile,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_metadata() {
        let config = SiteConfig::default();
        assert_eq!(config.metadata.title, "coding&&community");
        assert_eq!(config.metadata.author, "@codingcommunity");
    }

    #[test]
    fn default_config_has_no_footer_links() {
        let config = SiteConfig::default();
        assert_eq!(config.footer, FooterConfig::default());
        assert!(config.footer.email.is_none());
    }

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
brand = "#000033"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.colors.brand, "#000033");
        // Default values preserved
        assert_eq!(config.colors.background, "#ffffff");
        assert_eq!(config.dimensions.maxwidth_tablet, 768);
    }

    #[test]
    fn parse_footer_links() {
        let toml = r##"
[footer]
email = "hi@example.org"
github = "https://github.com/example"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.footer.email.as_deref(), Some("hi@example.org"));
        assert_eq!(
            config.footer.github.as_deref(),
            Some("https://github.com/example")
        );
        assert!(config.footer.swag.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r##"
[colors]
backgroud = "#fff"
"##;
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn stock_defaults_round_trip_through_resolve() {
        let base = stock_defaults_value().unwrap();
        let config = resolve_config(base, None).unwrap();
        assert_eq!(config.metadata, SiteMetadata::default());
    }

    #[test]
    fn merge_toml_overlays_nested_tables() {
        let base: toml::Value = toml::from_str(
            r#"
[metadata]
title = "a"
author = "b"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[metadata]
title = "c"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["metadata"]["title"].as_str(), Some("c"));
        assert_eq!(merged["metadata"]["author"].as_str(), Some("b"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.colors.background, "#ffffff");
        assert_eq!(config.metadata.title, "coding&&community");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r##"
[metadata]
title = "Example Org"

[dimensions]
maxwidth_desktop = 1000
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.metadata.title, "Example Org");
        assert_eq!(config.dimensions.maxwidth_desktop, 1000);
        // Unspecified values should be defaults
        assert_eq!(
            config.metadata.description,
            SiteMetadata::default().description
        );
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_rejects_empty_title() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[metadata]\ntitle = \"  \"\n",
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_rejects_inverted_breakpoints() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[dimensions]\nmaxwidth_mobile = 900\n",
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_color() {
        let mut config = SiteConfig::default();
        config.colors.accent = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("colors.accent"));
    }

    #[test]
    fn validate_rejects_negative_padding() {
        let mut config = SiteConfig::default();
        config.dimensions.padding_horizontal_mobile = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.metadata, SiteMetadata::default());
        assert_eq!(config.colors.brand, ColorConfig::default().brand);
        assert_eq!(config.footer, FooterConfig::default());
    }

    // =========================================================================
    // CSS generation tests
    // =========================================================================

    #[test]
    fn theme_css_uses_config_colors() {
        let mut config = SiteConfig::default();
        config.colors.brand = "#abcdef".to_string();

        let css = generate_theme_css(&config);
        assert!(css.contains("--color-brand: #abcdef"));
        assert!(css.contains("--color-accent:"));
        assert!(css.contains("--color-highlight:"));
    }

    #[test]
    fn theme_css_writes_breakpoints() {
        let config = SiteConfig::default();
        let css = generate_theme_css(&config);

        assert!(css.contains("--max-width: 1200px"));
        assert!(css.contains("@media (max-width: 768px)"));
        assert!(css.contains("@media (max-width: 600px)"));
        assert!(css.contains("--padding-x: 1.25em"));
    }
}
