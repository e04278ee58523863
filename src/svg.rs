//! Minimal structured SVG builder.
//!
//! Markup is assembled as an element tree and serialized once, with escaping at
//! the serialization boundary. `Raw` nodes exist for exactly two vetted
//! embeddings: the `<style>` CDATA block and icon bodies that already passed a
//! structural parse.

#[derive(Clone, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

#[derive(Clone, Debug)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.push((name.into(), value.to_string()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Embed pre-validated markup verbatim. Callers own the vetting.
    pub fn raw(mut self, markup: impl Into<String>) -> Self {
        self.children.push(Node::Raw(markup.into()));
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }

    fn is_inline(&self) -> bool {
        !self.children.is_empty()
            && self
                .children
                .iter()
                .all(|c| matches!(c, Node::Text(_) | Node::Raw(_)))
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }

        // Text-only content stays inline so SVG text nodes pick up no
        // indentation whitespace.
        if self.is_inline() {
            out.push('>');
            for child in &self.children {
                match child {
                    Node::Text(text) => out.push_str(&escape_text(text)),
                    Node::Raw(markup) => out.push_str(markup),
                    Node::Element(_) => unreachable!(),
                }
            }
            out.push_str(&format!("</{}>\n", self.name));
            return;
        }

        out.push_str(">\n");
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_into(out, depth + 1),
                Node::Text(text) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str(&escape_text(text));
                    out.push('\n');
                }
                Node::Raw(markup) => {
                    for line in markup.trim_end().lines() {
                        out.push_str(&"  ".repeat(depth + 1));
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
        }
        out.push_str(&indent);
        out.push_str(&format!("</{}>\n", self.name));
    }
}

/// A complete standalone SVG document with the XML declaration.
pub fn document(root: Element) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", root.render())
}

/// Numeric attribute value: rounded to 3 decimals, trailing zeros dropped.
pub fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_elements_self_close() {
        let rect = Element::new("rect").attr("x", num(12.0)).attr("y", num(1.5));
        assert_eq!(rect.render(), "<rect x=\"12\" y=\"1.5\" />\n");
    }

    #[test]
    fn text_content_is_inline_and_escaped() {
        let text = Element::new("text").text("C & C++ <3");
        assert_eq!(text.render(), "<text>C &amp; C++ &lt;3</text>\n");
    }

    #[test]
    fn attributes_are_escaped() {
        let el = Element::new("g").attr("aria-label", "a \"b\" <c>");
        assert!(el.render().contains("aria-label=\"a &quot;b&quot; &lt;c&gt;\""));
    }

    #[test]
    fn nested_children_indent() {
        let svg = Element::new("svg").child(Element::new("g").child(Element::new("rect")));
        assert_eq!(svg.render(), "<svg>\n  <g>\n    <rect />\n  </g>\n</svg>\n");
    }

    #[test]
    fn document_prepends_declaration() {
        let doc = document(Element::new("svg"));
        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg"));
    }

    #[test]
    fn num_trims_noise() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(49.5), "49.5");
        assert_eq!(num(0.1 + 0.2), "0.3");
    }
}
