//! Page boilerplate for every `(framework, orientation)` pair.
//!
//! The prefix is the document head up to and including the opening body
//! tag, terminated by a newline. Its trailing empty line is the boundary
//! line of the protected region.

use crate::app::domain::config::{Framework, Orientation, PageConfig};
use crate::app::infrastructure::error::Result;

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>HTML Preview</title>
"#;

const TAILWIND_REFS: &str = r#"    <script src="https://cdn.tailwindcss.com"></script>
"#;

const BOOTSTRAP_REFS: &str = r#"    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js"></script>
"#;

const HEAD_CLOSE: &str = "</head>\n<body>\n";

const CLOSING_MARKUP: &str = "\n</body>\n</html>";

fn framework_refs(framework: Framework) -> &'static str {
    match framework {
        Framework::Tailwind => TAILWIND_REFS,
        Framework::Bootstrap => BOOTSTRAP_REFS,
    }
}

/// `@page` size plus a body box matching the sheet, for screen and print.
fn page_rules(orientation: Orientation) -> String {
    let (width, height) = orientation.css_dimensions();
    format!(
        "    <style>
        @page {{
            size: A4 {name};
            margin: 1in;
        }}
        body {{
            width: {width};
            min-height: {height};
            margin: 0;
            padding: 20px;
            box-sizing: border-box;
        }}
        @media print {{
            body {{
                width: {width};
                min-height: {height};
            }}
        }}
    </style>
",
        name = orientation.name(),
        width = width,
        height = height,
    )
}

/// Generate the protected prefix for a configuration.
pub fn generate_prefix(config: &PageConfig) -> String {
    let refs = framework_refs(config.framework);
    let rules = page_rules(config.orientation);

    let mut prefix =
        String::with_capacity(DOCUMENT_HEAD.len() + refs.len() + rules.len() + HEAD_CLOSE.len());
    prefix.push_str(DOCUMENT_HEAD);
    prefix.push_str(refs);
    prefix.push_str(&rules);
    prefix.push_str(HEAD_CLOSE);
    prefix
}

/// Validate literal framework/orientation names, then generate the prefix.
///
/// Fails with `InvalidConfiguration` before anything is generated, since
/// all line arithmetic downstream assumes a valid prefix.
pub fn generate_prefix_for(framework: &str, orientation: &str) -> Result<String> {
    let config = PageConfig::parse(framework, orientation)?;
    Ok(generate_prefix(&config))
}

/// Markup that closes the document after the user's content.
pub fn generate_closing() -> &'static str {
    CLOSING_MARKUP
}

pub fn available_frameworks() -> Vec<&'static str> {
    Framework::all().iter().map(|f| f.name()).collect()
}

pub fn available_orientations() -> Vec<&'static str> {
    Orientation::all().iter().map(|o| o.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::AppError;
    use crate::app::services::text_ops::line_count;

    fn prefix(framework: Framework, orientation: Orientation) -> String {
        generate_prefix(&PageConfig::new(framework, orientation))
    }

    #[test]
    fn test_tailwind_portrait() {
        let result = prefix(Framework::Tailwind, Orientation::Portrait);
        assert!(result.starts_with("<!DOCTYPE html>"));
        assert!(result.contains("https://cdn.tailwindcss.com"));
        assert!(result.contains("size: A4 portrait"));
        assert!(result.contains("width: 210mm"));
        assert!(result.contains("min-height: 297mm"));
        assert!(result.ends_with("<body>\n"));
    }

    #[test]
    fn test_tailwind_landscape() {
        let result = prefix(Framework::Tailwind, Orientation::Landscape);
        assert!(result.contains("https://cdn.tailwindcss.com"));
        assert!(result.contains("size: A4 landscape"));
        assert!(result.contains("width: 297mm"));
        assert!(result.contains("min-height: 210mm"));
    }

    #[test]
    fn test_bootstrap_portrait() {
        let result = prefix(Framework::Bootstrap, Orientation::Portrait);
        assert!(result.contains("bootstrap@5.3.0/dist/css/bootstrap.min.css"));
        assert!(result.contains("bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js"));
        assert!(!result.contains("tailwindcss"));
        assert!(result.contains("size: A4 portrait"));
    }

    #[test]
    fn test_bootstrap_landscape() {
        let result = prefix(Framework::Bootstrap, Orientation::Landscape);
        assert!(result.contains("bootstrap.min.css"));
        assert!(result.contains("size: A4 landscape"));
        assert!(result.contains("width: 297mm"));
    }

    #[test]
    fn test_all_combinations_distinct() {
        let mut seen = Vec::new();
        for f in Framework::all() {
            for o in Orientation::all() {
                let p = prefix(*f, *o);
                assert!(!seen.contains(&p));
                seen.push(p);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_deterministic() {
        let config = PageConfig::new(Framework::Bootstrap, Orientation::Portrait);
        assert_eq!(generate_prefix(&config), generate_prefix(&config));
    }

    #[test]
    fn test_orientation_does_not_change_line_count() {
        let portrait = prefix(Framework::Tailwind, Orientation::Portrait);
        let landscape = prefix(Framework::Tailwind, Orientation::Landscape);
        assert_eq!(line_count(&portrait), line_count(&landscape));
    }

    #[test]
    fn test_bootstrap_prefix_is_one_line_longer() {
        let tailwind = prefix(Framework::Tailwind, Orientation::Portrait);
        let bootstrap = prefix(Framework::Bootstrap, Orientation::Portrait);
        assert_eq!(line_count(&bootstrap), line_count(&tailwind) + 1);
    }

    #[test]
    fn test_string_entry_point_validates() {
        let err = generate_prefix_for("invalid", "portrait").unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("Invalid framework"));

        let err = generate_prefix_for("tailwind", "invalid").unwrap_err();
        assert!(err.to_string().contains("Invalid orientation"));

        let ok = generate_prefix_for("tailwind", "portrait").unwrap();
        assert_eq!(ok, prefix(Framework::Tailwind, Orientation::Portrait));
    }

    #[test]
    fn test_closing_markup() {
        assert_eq!(generate_closing(), "\n</body>\n</html>");
    }

    #[test]
    fn test_available_lists() {
        assert_eq!(available_frameworks(), vec!["tailwind", "bootstrap"]);
        assert_eq!(available_orientations(), vec!["portrait", "landscape"]);
    }
}
