use crate::PreviewEntry;

/// Preview links always open in a new browsing context.
pub const LINK_TARGET: &str = "_blank";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewViewModel {
    pub heading: String,
    pub lines: Vec<PreviewLineView>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLineView {
    pub page: usize,
    /// "Page 3"
    pub label: String,
    pub file_name: String,
    pub href: String,
    pub target: &'static str,
}

impl PreviewLineView {
    pub(crate) fn from_entry(entry: &PreviewEntry, page_label: &str) -> Self {
        Self {
            page: entry.page,
            label: format!("{page_label} {}", entry.page),
            file_name: entry.file_name.clone(),
            href: entry.object_url.clone(),
            target: LINK_TARGET,
        }
    }
}

impl PreviewViewModel {
    /// Markup of the whole container: heading, then one paragraph per file.
    pub fn container_html(&self) -> String {
        let mut html = String::with_capacity(64 + self.lines.len() * 128);
        html.push_str("<div class=\"comic-preview\"><strong>");
        html.push_str(&escape_html(&self.heading));
        html.push_str("</strong><br>");
        for line in &self.lines {
            html.push_str("<p><strong>");
            html.push_str(&escape_html(&line.label));
            html.push_str(":</strong> <a href=\"");
            html.push_str(&escape_html(&line.href));
            html.push_str("\" target=\"");
            html.push_str(line.target);
            html.push_str("\">");
            html.push_str(&escape_html(&line.file_name));
            html.push_str("</a></p>");
        }
        html.push_str("</div>");
        html
    }
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
