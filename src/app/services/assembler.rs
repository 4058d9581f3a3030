//! Assembly of the complete document and its preview-only variant.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::app::domain::config::Orientation;

static HEAD_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head\s*>").expect("head-end pattern is valid"));

static BODY_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<body[^>]*>(.*)</body\s*>").expect("body pattern is valid")
});

/// `prefix + user_content + closing`. Pure; the output depends only on the inputs.
pub fn assemble(prefix: &str, user_content: &str, closing: &str) -> String {
    let mut document = String::with_capacity(prefix.len() + user_content.len() + closing.len());
    document.push_str(prefix);
    document.push_str(user_content);
    document.push_str(closing);
    document
}

/// Insert `snippet` right before the first `</head>`.
/// Returns None when the document has no head end.
pub fn inject_before_head_end(document: &str, snippet: &str) -> Option<String> {
    let head_end = HEAD_END.find(document)?;
    let mut result = String::with_capacity(document.len() + snippet.len());
    result.push_str(&document[..head_end.start()]);
    result.push_str(snippet);
    result.push_str(&document[head_end.start()..]);
    Some(result)
}

/// Layout rules that pin the page to one A4 sheet with no scrolling.
fn isolation_styles(orientation: Orientation) -> String {
    let (width, height) = orientation.css_dimensions();
    format!(
        "<style>
        html, body {{
            margin: 0;
            padding: 0;
            width: 100vw;
            height: 100vh;
            overflow: hidden !important;
            box-sizing: border-box;
        }}
        body {{
            max-width: {width};
            max-height: {height};
            overflow: hidden !important;
            position: relative;
        }}
        * {{
            box-sizing: border-box;
        }}
        ::-webkit-scrollbar {{
            display: none;
        }}
    </style>
",
        width = width,
        height = height,
    )
}

/// Preview-only variant of an assembled document: the isolation styles go
/// in just before the end of the head. Export never uses this.
///
/// A document without a head end is returned unchanged.
pub fn isolate_for_preview(document: &str, orientation: Orientation) -> String {
    match inject_before_head_end(document, &isolation_styles(orientation)) {
        Some(isolated) => isolated,
        None => {
            tracing::debug!("no </head> in document, preview left unisolated");
            document.to_string()
        }
    }
}

/// Markup between the opening and closing body tags, or the whole
/// document when there is no body.
pub fn body_fragment(document: &str) -> &str {
    BODY_CONTENT
        .captures(document)
        .and_then(|caps| caps.get(1))
        .map_or(document, |m| m.as_str())
}
