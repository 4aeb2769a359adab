//! Plain-text excerpts from markdown bodies.
//!
//! Pipeline:
//!
//! 1. Unicode NFC normalization
//! 2. Markdown parsed with `pulldown-cmark`; only text and inline code are kept
//!    (code blocks, images and raw HTML tags are dropped)
//! 3. Whitespace collapsed
//! 4. Pruned to [`EXCERPT_LENGTH`] characters at a word boundary

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use unicode_normalization::UnicodeNormalization;

/// Maximum excerpt length in characters, before the ellipsis.
pub const EXCERPT_LENGTH: usize = 140;

const ELLIPSIS: char = '…';

/// Derive a plain-text excerpt from a markdown body.
pub fn excerpt_from_markdown(markdown: &str) -> String {
    excerpt_with_length(markdown, EXCERPT_LENGTH)
}

pub fn excerpt_with_length(markdown: &str, max_chars: usize) -> String {
    let normalized: String = markdown.nfc().collect();
    let text = markdown_text(&normalized);
    let collapsed = normalize_whitespace(&text);
    prune(&collapsed, max_chars)
}

fn markdown_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    // Depth of code blocks / images we are inside of.
    let mut skipped = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Image { .. }) => skipped += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Image) => {
                skipped = skipped.saturating_sub(1);
            }
            _ if skipped > 0 => {}
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::BlockQuote(_)
                | TagEnd::TableCell,
            ) => out.push(' '),
            _ => {}
        }
    }

    out
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn prune(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let head: String = text.chars().take(max_chars).collect();
    let at_boundary = text
        .chars()
        .nth(max_chars)
        .is_some_and(char::is_whitespace);

    let cut = if at_boundary {
        head.as_str()
    } else {
        head.rfind(char::is_whitespace)
            .map_or(head.as_str(), |i| &head[..i])
    };
    let cut = cut.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '.'));

    format!("{cut}{ELLIPSIS}")
}
