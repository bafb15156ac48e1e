//! Markdown to HTML conversion for free-text fields.

use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};

/// Link target applied to every anchor produced from markdown.
pub const NEW_CONTEXT_TARGET: &str = "_blank";

/// Markdown renderer, configured once and shared by reference.
///
/// Every `<a>` tag in the output gets the configured `target` attribute so
/// links open in a new browsing context. Any target already present is
/// replaced.
#[derive(Debug, Clone)]
pub struct Markdown {
    options: Options,
    link_target: String,
    anchor: Regex,
    attribute: Regex,
}

impl Markdown {
    /// Create a renderer that opens links in a new browsing context.
    pub fn new() -> Self {
        Self::with_link_target(NEW_CONTEXT_TARGET)
    }

    pub fn with_link_target(target: impl Into<String>) -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;

        Self {
            options,
            link_target: target.into(),
            anchor: Regex::new(r"<a(\s[^>]*)?>").expect("anchor pattern is valid"),
            attribute: Regex::new(r#"\s+([^\s=/>]+)(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+))?"#)
                .expect("attribute pattern is valid"),
        }
    }

    /// Render markdown to an HTML fragment.
    pub fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options);

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.retarget_links(&html_output)
    }

    /// Render markdown expected to be a single line, without the wrapping paragraph.
    pub fn render_inline(&self, source: &str) -> String {
        let rendered = self.render(source);
        let trimmed = rendered.trim_end();

        match trimmed
            .strip_prefix("<p>")
            .and_then(|rest| rest.strip_suffix("</p>"))
        {
            Some(inner) if !inner.contains("<p>") => inner.to_string(),
            _ => rendered,
        }
    }

    fn retarget_links(&self, html: &str) -> String {
        self.anchor
            .replace_all(html, |caps: &Captures| {
                let attrs = caps.get(1).map_or("", |m| m.as_str());
                let kept: String = self
                    .attribute
                    .captures_iter(attrs)
                    .filter(|attr| !attr[1].eq_ignore_ascii_case("target"))
                    .map(|attr| attr.get(0).map_or("", |m| m.as_str()))
                    .collect();
                format!(r#"<a{} target="{}">"#, kept, self.link_target)
            })
            .into_owned()
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}
