use scraper::{Html, Node};

use crate::dom::document::{Doctype, Document};

impl Document {
    /// Parse an HTML page into a live document. Malformed legacy markup is
    /// repaired by html5ever the same way a browser would.
    pub fn parse(html: &str) -> Document {
        let parsed = Html::parse_document(html);
        let mut doc = Document::new();

        // Preorder walk; children are pushed reversed so they are appended in
        // document order.
        let mut stack = vec![(parsed.tree.root(), doc.root())];
        while let Some((node, parent)) = stack.pop() {
            let target = match node.value() {
                Node::Document | Node::Fragment => parent,
                Node::Doctype(doctype) => {
                    doc.doctype = Some(Doctype {
                        name: doctype.name().to_string(),
                        public_id: doctype.public_id().to_string(),
                        system_id: doctype.system_id().to_string(),
                    });
                    continue;
                }
                Node::Element(el) => {
                    let attrs = el
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect();
                    doc.append_element(parent, el.name(), attrs)
                }
                Node::Text(text) => {
                    doc.append_text(parent, &**text);
                    continue;
                }
                Node::Comment(comment) => {
                    doc.append_comment(parent, &**comment);
                    continue;
                }
                _ => continue,
            };

            let children: Vec<_> = node.children().collect();
            for child in children.into_iter().rev() {
                stack.push((child, target));
            }
        }

        doc.init_controls();
        tracing::debug!(nodes = doc.node_count(), "parsed document");
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_controls_with_initial_state() {
        let doc = Document::parse(
            r#"<html><body>
                <input type="text" id="name" value=" Jane ">
                <textarea id="notes">
first line</textarea>
                <select id="state" disabled>
                    <option>MO</option>
                    <optgroup label="West"><option selected>KS</option></optgroup>
                </select>
            </body></html>"#,
        );

        let name = doc.by_id("name").unwrap();
        assert!(doc.is_text_input(name));
        assert_eq!(doc.value(name), " Jane ");

        let notes = doc.by_id("notes").unwrap();
        assert_eq!(doc.value(notes), "first line");

        let state = doc.by_id("state").unwrap();
        assert!(doc.is_disabled(state));
        assert_eq!(doc.options(state), vec!["MO", "KS"]);
        assert_eq!(doc.selected_text(state), "KS");
    }

    #[test]
    fn table_rows_are_found_through_implied_tbody() {
        let doc = Document::parse(
            "<table id='t'><tr><td>a</td></tr><tr><td>b</td></tr></table>",
        );
        let table = doc.by_id("t").unwrap();
        assert_eq!(doc.descendants_by_tag(table, "tr").len(), 2);
    }
}
