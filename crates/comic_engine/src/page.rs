use std::collections::HashSet;

use comic_core::escape_html;
use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// The admin upload form's image picker.
pub const MULTI_FILE_INPUT_SELECTOR: &str = "input[type='file'][multiple]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub name: Option<String>,
    pub id: Option<String>,
    pub accept: Option<String>,
}

/// A parsed admin page and the first multi-file input on it, if any.
pub struct AdminPage {
    document: Html,
    file_input: Option<NodeId>,
}

impl AdminPage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let file_input = Selector::parse(MULTI_FILE_INPUT_SELECTOR)
            .ok()
            .and_then(|sel| document.select(&sel).next().map(|element| element.id()));
        Self {
            document,
            file_input,
        }
    }

    pub fn has_file_input(&self) -> bool {
        self.file_input.is_some()
    }

    pub fn file_input(&self) -> Option<FileInput> {
        let node = self.document.tree.get(self.file_input?)?;
        let element = ElementRef::wrap(node)?.value();
        Some(FileInput {
            name: element.attr("name").map(ToOwned::to_owned),
            id: element.attr("id").map(ToOwned::to_owned),
            accept: element.attr("accept").map(ToOwned::to_owned),
        })
    }

    /// Serializes the page, placing `container` right after the file input.
    /// Without an input (or without a container) the page is returned as parsed.
    pub fn render(&self, container: Option<&str>) -> String {
        let (Some(target), Some(container)) = (self.file_input, container) else {
            return self.document.html();
        };
        let Some(target_node) = self.document.tree.get(target) else {
            return self.document.html();
        };

        let path: HashSet<NodeId> = target_node.ancestors().map(|node| node.id()).collect();
        let mut writer = PageWriter {
            target,
            path,
            container,
            out: String::new(),
        };
        for child in self.document.tree.root().children() {
            writer.write_node(child);
        }
        writer.out
    }
}

struct PageWriter<'c> {
    target: NodeId,
    path: HashSet<NodeId>,
    container: &'c str,
    out: String,
}

impl PageWriter<'_> {
    fn write_node(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Doctype(doctype) => {
                self.out.push_str("<!DOCTYPE ");
                self.out.push_str(doctype.name());
                let (public_id, system_id) = (doctype.public_id(), doctype.system_id());
                if !public_id.is_empty() {
                    self.out.push_str(" PUBLIC \"");
                    self.out.push_str(public_id);
                    self.out.push('"');
                    if !system_id.is_empty() {
                        self.out.push_str(" \"");
                        self.out.push_str(system_id);
                        self.out.push('"');
                    }
                } else if !system_id.is_empty() {
                    self.out.push_str(" SYSTEM \"");
                    self.out.push_str(system_id);
                    self.out.push('"');
                }
                self.out.push('>');
            }
            Node::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(comment);
                self.out.push_str("-->");
            }
            Node::Text(text) => self.out.push_str(&escape_html(text)),
            Node::Element(element) => {
                let Some(element_ref) = ElementRef::wrap(node) else {
                    return;
                };
                if node.id() == self.target {
                    self.out.push_str(&element_ref.html());
                    self.out.push_str(self.container);
                } else if self.path.contains(&node.id()) {
                    // Only ancestors of the input are rebuilt by hand.
                    self.out.push('<');
                    self.out.push_str(element.name());
                    for (key, value) in element.attrs() {
                        self.out.push(' ');
                        self.out.push_str(key);
                        self.out.push_str("=\"");
                        self.out.push_str(&escape_html(value));
                        self.out.push('"');
                    }
                    self.out.push('>');
                    for child in node.children() {
                        self.write_node(child);
                    }
                    self.out.push_str("</");
                    self.out.push_str(element.name());
                    self.out.push('>');
                } else {
                    self.out.push_str(&element_ref.html());
                }
            }
            Node::Document | Node::Fragment => {
                for child in node.children() {
                    self.write_node(child);
                }
            }
            Node::ProcessingInstruction(_) => {}
        }
    }
}
