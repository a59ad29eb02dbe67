use std::collections::HashMap;

use crate::dom::document::{Doctype, Document, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children the parser keeps verbatim (scripting on).
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// The parser drops one newline right after these start tags.
const LEADING_NEWLINE_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

impl Document {
    /// Serialize the document with live control state folded back into
    /// markup: input `value`, textarea content and option `selected`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            write_doctype(&mut out, doctype);
        }
        let overrides = self.option_overrides();
        for child in self.children(self.root()) {
            self.write_node(*child, &overrides, &mut out);
        }
        out
    }

    /// Selected flag for every option of a select whose index was scripted.
    fn option_overrides(&self) -> HashMap<NodeId, bool> {
        let mut overrides = HashMap::new();
        for node in self.descendants(self.root()) {
            let scripted = self.is_select(node) && self.control(node).is_some_and(|c| c.dirty);
            if !scripted {
                continue;
            }
            let selected = self.selected_index(node);
            for (i, opt) in self.option_nodes(node).into_iter().enumerate() {
                overrides.insert(opt, selected == Some(i));
            }
        }
        overrides
    }

    /// Text the element's content starts with: the live value for a
    /// textarea, else its first child when that is a text node.
    fn leading_text(&self, node: NodeId, is_textarea: bool) -> &str {
        if is_textarea {
            return self.value(node);
        }
        match self.children(node).first().map(|c| self.kind(*c)) {
            Some(NodeKind::Text(text)) => text.as_str(),
            _ => "",
        }
    }

    fn write_node(&self, node: NodeId, overrides: &HashMap<NodeId, bool>, out: &mut String) {
        match self.kind(node) {
            NodeKind::Document => {}
            NodeKind::Text(text) => {
                let raw = self
                    .parent(node)
                    .and_then(|p| self.tag(p))
                    .is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t));
                if raw {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            NodeKind::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);

                let live_value = el.tag == "input" && el.control.dirty;
                let selected_override = overrides.get(&node).copied();

                for (name, value) in &el.attrs {
                    if live_value && name == "value" {
                        continue;
                    }
                    if selected_override.is_some() && name == "selected" {
                        continue;
                    }
                    write_attr(out, name, value);
                }
                if live_value {
                    write_attr(out, "value", &el.control.value);
                }
                if selected_override == Some(true) {
                    out.push_str(" selected");
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }

                if LEADING_NEWLINE_ELEMENTS.contains(&el.tag.as_str())
                    && self.leading_text(node, el.tag == "textarea").starts_with('\n')
                {
                    out.push('\n');
                }

                if el.tag == "textarea" {
                    out.push_str(&escape_text(&el.control.value));
                } else {
                    for child in self.children(node) {
                        self.write_node(*child, overrides, out);
                    }
                }

                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

fn write_doctype(out: &mut String, doctype: &Doctype) {
    out.push_str("<!DOCTYPE ");
    out.push_str(&doctype.name);
    if !doctype.public_id.is_empty() {
        out.push_str(&format!(" PUBLIC \"{}\"", doctype.public_id));
        if !doctype.system_id.is_empty() {
            out.push_str(&format!(" \"{}\"", doctype.system_id));
        }
    } else if !doctype.system_id.is_empty() {
        out.push_str(&format!(" SYSTEM \"{}\"", doctype.system_id));
    }
    out.push('>');
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_state_survives_reparse() {
        let mut doc = Document::parse(
            r#"<select id="s"><option selected>Good</option><option>Poor</option></select>
               <input type="text" id="i" value="old">
               <textarea id="t">a &amp; b</textarea>"#,
        );
        let select = doc.by_id("s").unwrap();
        let input = doc.by_id("i").unwrap();
        let textarea = doc.by_id("t").unwrap();
        doc.set_selected_index(select, Some(1));
        doc.set_value(input, "new \"quoted\"");
        doc.set_value(textarea, "x < y");

        let reparsed = Document::parse(&doc.to_html());
        assert_eq!(reparsed.selected_text(reparsed.by_id("s").unwrap()), "Poor");
        assert_eq!(reparsed.value(reparsed.by_id("i").unwrap()), "new \"quoted\"");
        assert_eq!(reparsed.value(reparsed.by_id("t").unwrap()), "x < y");
    }

    #[test]
    fn leading_newline_survives_reparse() {
        let mut doc = Document::parse(
            "<textarea id=\"t\">old</textarea><pre id=\"p\">\n\nindented</pre>",
        );
        let textarea = doc.by_id("t").unwrap();
        doc.set_value(textarea, "\nSecond line is the note");
        assert_eq!(doc.text_content(doc.by_id("p").unwrap()), "\nindented");

        let reparsed = Document::parse(&doc.to_html());
        assert_eq!(
            reparsed.value(reparsed.by_id("t").unwrap()),
            "\nSecond line is the note"
        );
        assert_eq!(reparsed.text_content(reparsed.by_id("p").unwrap()), "\nindented");
    }

    #[test]
    fn raw_text_elements_are_not_escaped() {
        let doc = Document::parse(
            r#"<body><noscript><img src="x.gif"></noscript><iframe>a < b</iframe><p>1 < 2</p></body>"#,
        );
        let html = doc.to_html();
        assert!(html.contains(r#"<noscript><img src="x.gif"></noscript>"#), "{}", html);
        assert!(html.contains("<iframe>a < b</iframe>"), "{}", html);
        assert!(html.contains("<p>1 &lt; 2</p>"), "{}", html);
    }

    #[test]
    fn xhtml_doctype_identifiers_are_kept() {
        let page = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd"><html><body></body></html>"#;
        let doc = Document::parse(page);
        assert!(doc.to_html().starts_with(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#
        ));

        let reparsed = Document::parse(&doc.to_html());
        assert_eq!(reparsed.doctype(), doc.doctype());
        assert_eq!(
            reparsed.doctype().map(|d| d.public_id.as_str()),
            Some("-//W3C//DTD XHTML 1.0 Transitional//EN")
        );
    }

    #[test]
    fn bare_doctype_stays_bare() {
        let doc = Document::parse("<!DOCTYPE html><html><body></body></html>");
        assert!(doc.to_html().starts_with("<!DOCTYPE html><html>"));
    }

    #[test]
    fn untouched_markup_keeps_attributes() {
        let doc = Document::parse(r#"<p class="note">R&amp;D</p>"#);
        let html = doc.to_html();
        assert!(html.contains(r#"<p class="note">R&amp;D</p>"#));
    }
}
