//! Markup formatters applied to comment bodies.

use pulldown_cmark::{html, Options, Parser};

/// Turns lightweight markup into display HTML.
pub trait MarkupFormatter {
    fn format(&self, text: &str) -> String;
}

/// CommonMark with tables and strikethrough.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownFormatter;

impl MarkupFormatter for MarkdownFormatter {
    fn format(&self, text: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(text, options);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Leaves text untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormatter;

impl MarkupFormatter for PlainFormatter {
    fn format(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Create a formatter by name.
pub fn create_formatter(plain: bool) -> Box<dyn MarkupFormatter> {
    if plain {
        Box::new(PlainFormatter)
    } else {
        Box::new(MarkdownFormatter)
    }
}
