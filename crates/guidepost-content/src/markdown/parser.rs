//! Markdown structure helpers built on `pulldown-cmark`.
//!
//! MDX bodies are treated as Markdown: JSX blocks surface as raw HTML and
//! are ignored, so only prose and code text contribute.

use pulldown_cmark::{Event, Parser};

/// Plain text of a Markdown body, with blocks separated by spaces.
pub fn extract_text_content(body: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Text(t) | Event::Code(t) => {
                if !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
                text.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }

    text
}

/// Number of whitespace-separated words of prose and code text.
pub fn word_count(body: &str) -> usize {
    extract_text_content(body).split_whitespace().count()
}
