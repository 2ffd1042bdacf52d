//! HTML to readable text.
//!
//! Parses the fetched document once and derives two things: the page title
//! and a flattened text body suitable for embedding in a prompt. Script,
//! style, image, and form-input subtrees are pruned wholesale; nothing under
//! them reaches the output. The whole module is pure: same HTML in, same
//! [`PageContent`] out.

use scraper::{Html, Node, Selector};
use thiserror::Error;

/// Title used when the document has no `<title>` element.
pub const NO_TITLE_PLACEHOLDER: &str = "No title found";

/// Element kinds whose entire subtree is dropped before text extraction.
const PRUNED_ELEMENTS: [&str; 4] = ["script", "style", "img", "input"];

/// A page reduced to prompt-ready parts. Built once per fetch and dropped
/// after the prompt is assembled; nothing caches or persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub url: String,
    pub title: String,
    /// Visible text, one trimmed run per text node, joined with `\n`.
    pub body: String,
}

/// Structural failures while reducing a document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document has no `<body>`-equivalent root to extract from.
    #[error("page has no <body> to extract text from")]
    MissingBody,
}

/// Reduce raw HTML to a [`PageContent`].
///
/// The title is the first `<title>` element's text, else
/// [`NO_TITLE_PLACEHOLDER`]. The body is the newline-joined visible text of
/// `<body>` after pruning.
pub fn extract_content(url: &str, html: &str) -> Result<PageContent, ExtractionError> {
    let doc = Html::parse_document(html);

    let title_sel = Selector::parse("title").unwrap();
    let title = match doc.select(&title_sel).next() {
        Some(el) => el.text().collect::<String>().trim().to_string(),
        None => NO_TITLE_PLACEHOLDER.to_string(),
    };

    let body_sel = Selector::parse("body").unwrap();
    let body_el = match doc.select(&body_sel).next() {
        Some(el) => el,
        None => {
            tracing::warn!(url, "extract.error");
            return Err(ExtractionError::MissingBody);
        }
    };

    let body = visible_text(body_el);
    tracing::debug!(url, title = %title, body_len = body.len(), "extract.ok");

    Ok(PageContent {
        url: url.to_string(),
        title,
        body,
    })
}

/// Collect trimmed text runs under `root` in document order, skipping the
/// entire subtree of any pruned element.
fn visible_text(root: scraper::ElementRef<'_>) -> String {
    let mut parts: Vec<String> = Vec::new();
    // Depth-first with an explicit stack; children are pushed reversed so
    // they pop in document order.
    let mut stack: Vec<_> = root.children().rev().collect();
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Element(el) => {
                if PRUNED_ELEMENTS.contains(&el.name()) {
                    continue;
                }
                stack.extend(node.children().rev());
            }
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            _ => {}
        }
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PageContent {
        extract_content("https://example.com/", html).unwrap()
    }

    #[test]
    fn title_comes_from_title_element() {
        let page = extract("<html><head><title>Example Domain</title></head><body></body></html>");
        assert_eq!(page.title, "Example Domain");
    }

    #[test]
    fn missing_title_uses_placeholder() {
        let page = extract("<html><head></head><body><p>text</p></body></html>");
        assert_eq!(page.title, "No title found");
    }

    #[test]
    fn first_title_wins() {
        let page =
            extract("<html><head><title>First</title><title>Second</title></head><body></body></html>");
        assert_eq!(page.title, "First");
    }

    #[test]
    fn body_joins_text_nodes_with_newlines() {
        let page = extract(
            "<html><body><h1>Heading</h1><p>First paragraph.</p><p>Second paragraph.</p></body></html>",
        );
        assert_eq!(page.body, "Heading\nFirst paragraph.\nSecond paragraph.");
    }

    #[test]
    fn text_nodes_are_trimmed_per_node() {
        let page = extract("<html><body><p>  padded  </p><span>\n\ttabbed\n</span></body></html>");
        assert_eq!(page.body, "padded\ntabbed");
    }

    #[test]
    fn whitespace_only_nodes_are_dropped() {
        let page = extract("<html><body><div>   </div><p>kept</p></body></html>");
        assert_eq!(page.body, "kept");
    }

    #[test]
    fn pruned_elements_contribute_nothing() {
        let page = extract(
            "<html><body>\
             <script>var tracker = \"<span>sneaky</span>\";</script>\
             <style>.nav { display: none }</style>\
             <p>visible</p>\
             <input value=\"typed\">\
             <img src=\"x.png\" alt=\"alt text\">\
             </body></html>",
        );
        assert_eq!(page.body, "visible");
        assert!(!page.body.contains("tracker"));
        assert!(!page.body.contains("sneaky"));
        assert!(!page.body.contains("display"));
    }

    #[test]
    fn pruning_reaches_nested_occurrences() {
        let page = extract(
            "<html><body><div><section><script>deep()</script><p>inner</p></section></div></body></html>",
        );
        assert_eq!(page.body, "inner");
        assert!(!page.body.contains("deep"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = "<html><title>Same</title><body><p>Stable</p><script>x()</script></body></html>";
        let first = extract(html);
        let second = extract(html);
        assert_eq!(first, second);
    }

    #[test]
    fn heading_survives_sibling_script() {
        let page =
            extract("<html><title>Example</title><body><h1>Hi</h1><script>bad()</script></body></html>");
        assert_eq!(page.title, "Example");
        assert_eq!(page.body, "Hi");
        assert!(!page.body.contains("bad()"));
    }

    #[test]
    fn empty_body_yields_empty_text() {
        let page = extract("<html><title>Empty</title><body></body></html>");
        assert_eq!(page.body, "");
    }

    #[test]
    fn nested_inline_markup_flattens_in_order() {
        let page = extract(
            "<html><body><p>Start <em>emphasis</em> end.</p><ul><li>one</li><li>two</li></ul></body></html>",
        );
        assert_eq!(page.body, "Start\nemphasis\nend.\none\ntwo");
    }
}
