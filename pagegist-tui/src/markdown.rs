//! Markdown summary text to transcript lines.
//!
//! A [`TranscriptLine`] carries a single style for the whole line, so
//! block-level structure (headings, code fences, list bullets, quotes)
//! maps onto styles while inline emphasis collapses to plain text. That is
//! enough for model output; this is not a general markdown engine.

use crate::{styles, transcript::TranscriptLine};
use pulldown_cmark::{Event, Parser, Tag};
use ratatui::style::Style;

pub fn render_markdown(text: &str) -> Vec<TranscriptLine> {
    Renderer::default().run(text)
}

#[derive(Default)]
struct Renderer {
    out: Vec<TranscriptLine>,
    line: String,
    line_style: Style,
    /// One entry per open list; `Some` holds the next ordered-list index.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
}

impl Renderer {
    fn run(mut self, text: &str) -> Vec<TranscriptLine> {
        for event in Parser::new(text) {
            self.event(event);
        }
        self.flush();
        while self.out.last().is_some_and(|l| l.text.is_empty()) {
            self.out.pop();
        }
        self.out
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading(..)) => {
                self.flush();
                self.blank();
                self.line_style = styles::heading();
            }
            Event::End(Tag::Heading(..)) => {
                self.flush();
                self.blank();
            }
            Event::Start(Tag::Paragraph) => {
                if self.quote_depth > 0 && self.line.is_empty() {
                    self.line = "│ ".repeat(self.quote_depth);
                    self.line_style = styles::dim();
                }
            }
            Event::End(Tag::Paragraph) => {
                self.flush();
                self.blank();
            }
            Event::Start(Tag::BlockQuote) => {
                self.flush();
                self.quote_depth += 1;
            }
            Event::End(Tag::BlockQuote) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.in_code_block = true;
                self.line_style = styles::dim();
            }
            Event::End(Tag::CodeBlock(_)) => {
                self.flush();
                self.in_code_block = false;
                self.blank();
            }
            Event::Start(Tag::List(start)) => {
                self.flush();
                self.lists.push(start);
            }
            Event::End(Tag::List(_)) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                match self.lists.last_mut() {
                    Some(Some(n)) => {
                        self.line = format!("{indent}{n}. ");
                        *n += 1;
                    }
                    _ => self.line = format!("{indent}• "),
                }
            }
            Event::End(Tag::Item) => self.flush(),
            Event::End(Tag::Link(_, dest, _)) => {
                // Skip autolinks, where the visible text already is the URL.
                if !dest.is_empty() && !self.line.contains(dest.as_ref()) {
                    self.line.push_str(&format!(" ({dest})"));
                }
            }
            Event::Text(t) => {
                if self.in_code_block {
                    // Fenced content arrives with embedded newlines.
                    let mut first = true;
                    for part in t.split('\n') {
                        if !first {
                            self.flush_keep_style();
                        }
                        self.line.push_str(part);
                        first = false;
                    }
                } else {
                    self.line.push_str(&t);
                }
            }
            Event::Code(t) => {
                self.line.push('`');
                self.line.push_str(&t);
                self.line.push('`');
            }
            Event::SoftBreak => self.line.push(' '),
            Event::HardBreak => self.flush_keep_style(),
            Event::Rule => {
                self.flush();
                self.out
                    .push(TranscriptLine::new("─".repeat(24), styles::dim()));
                self.blank();
            }
            _ => {}
        }
    }

    fn flush(&mut self) {
        if !self.line.is_empty() {
            let text = std::mem::take(&mut self.line);
            self.out.push(TranscriptLine::new(text, self.line_style));
        }
        self.line_style = Style::default();
    }

    /// Line break inside a styled block (code fence, hard break).
    fn flush_keep_style(&mut self) {
        let style = self.line_style;
        self.flush();
        self.line_style = style;
    }

    fn blank(&mut self) {
        if self.out.last().is_some_and(|l| !l.text.is_empty()) {
            self.out.push(TranscriptLine::plain(String::new()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[TranscriptLine]) -> Vec<String> {
        lines.iter().map(|l| l.text.clone()).collect()
    }

    #[test]
    fn heading_gets_heading_style() {
        let lines = render_markdown("# Overview");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Overview");
        assert_eq!(lines[0].style, styles::heading());
    }

    #[test]
    fn paragraphs_are_separated_by_one_blank_line() {
        let lines = render_markdown("first paragraph\n\nsecond paragraph");
        assert_eq!(
            texts(&lines),
            vec!["first paragraph", "", "second paragraph"]
        );
    }

    #[test]
    fn soft_breaks_join_into_one_line() {
        let lines = render_markdown("first\nsecond");
        assert_eq!(texts(&lines), vec!["first second"]);
    }

    #[test]
    fn bullets_get_a_dot_prefix() {
        let lines = render_markdown("- alpha\n- beta");
        assert_eq!(texts(&lines), vec!["• alpha", "• beta"]);
    }

    #[test]
    fn ordered_lists_count_up() {
        let lines = render_markdown("1. one\n2. two\n3. three");
        assert_eq!(texts(&lines), vec!["1. one", "2. two", "3. three"]);
    }

    #[test]
    fn nested_bullets_indent() {
        let lines = render_markdown("- outer\n  - inner");
        assert_eq!(texts(&lines), vec!["• outer", "  • inner"]);
    }

    #[test]
    fn fenced_code_is_dim_line_per_line() {
        let lines = render_markdown("```\nlet x = 1;\nlet y = 2;\n```");
        assert_eq!(texts(&lines), vec!["let x = 1;", "let y = 2;"]);
        assert!(lines.iter().all(|l| l.style == styles::dim()));
    }

    #[test]
    fn inline_code_keeps_backticks() {
        let lines = render_markdown("run `cargo doc` locally");
        assert_eq!(texts(&lines), vec!["run `cargo doc` locally"]);
    }

    #[test]
    fn link_destination_is_appended() {
        let lines = render_markdown("see [the site](https://example.com)");
        assert_eq!(texts(&lines), vec!["see the site (https://example.com)"]);
    }

    #[test]
    fn emphasis_collapses_to_plain_text() {
        let lines = render_markdown("this is *very* **important**");
        assert_eq!(texts(&lines), vec!["this is very important"]);
    }

    #[test]
    fn no_leading_or_trailing_blanks() {
        let lines = render_markdown("# Title\n\nbody text\n");
        assert_eq!(texts(&lines), vec!["Title", "", "body text"]);
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_markdown("").is_empty());
    }
}
