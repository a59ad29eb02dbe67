use std::collections::HashMap;
use std::fmt;

use crate::dom::events::{DomEvent, EventKind, EventListener};

/// Index of a node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub control: ControlState,
}

/// Live state of a form control. Mirrors the DOM properties the engine reads
/// and writes (`value`, `selectedIndex`, `disabled`), independent of the
/// attributes the page was parsed with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlState {
    pub value: String,
    pub selected_index: Option<usize>,
    pub disabled: bool,
    /// Set once a script wrote `value` or `selected_index`.
    pub dirty: bool,
}

/// `<!DOCTYPE>` as parsed. WebForms pages carry the XHTML public and
/// system identifiers, which must survive serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// In-memory document: an arena of nodes plus an id index, the event
/// journal and registered listeners.
pub struct Document {
    nodes: Vec<Node>,
    id_index: HashMap<String, NodeId>,
    pub(crate) doctype: Option<Doctype>,
    events: Vec<DomEvent>,
    listeners: Vec<(NodeId, Box<dyn EventListener>)>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("ids", &self.id_index.len())
            .field("events", &self.events.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            id_index: HashMap::new(),
            doctype: None,
            events: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        let disabled = attrs.iter().any(|(k, _)| k == "disabled");
        let value = attrs
            .iter()
            .find(|(k, _)| k == "value")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        let element = Element {
            tag: tag.to_ascii_lowercase(),
            attrs,
            control: ControlState {
                value,
                selected_index: None,
                disabled,
                dirty: false,
            },
        };
        let id = self.push_node(parent, NodeKind::Element(element));
        if let Some(html_id) = self.attr(id, "id").map(str::to_string) {
            if !html_id.is_empty() {
                self.id_index.entry(html_id).or_insert(id);
            }
        }
        id
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(parent, NodeKind::Text(text.to_string()))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(parent, NodeKind::Comment(text.to_string()))
    }

    /// Derive initial control state once the tree is complete: textarea
    /// values come from their text, selects from their `selected` options.
    pub fn init_controls(&mut self) {
        for index in 0..self.nodes.len() {
            let id = NodeId(index);
            match self.tag(id) {
                Some("textarea") => {
                    let text = self.text_content(id);
                    if let Some(el) = self.element_mut(id) {
                        el.control.value = text;
                    }
                }
                Some("select") => {
                    let initial = self.initial_selection(id);
                    if let Some(el) = self.element_mut(id) {
                        el.control.selected_index = initial;
                    }
                }
                _ => {}
            }
        }
    }

    /// `selectedIndex` right after parsing. A multi-select reports its first
    /// `selected` option, any other select its last. Without one, only a
    /// drop-down (no `multiple`, `size` of 1 or less) falls back to its first
    /// enabled option; listboxes start with nothing selected.
    fn initial_selection(&self, select: NodeId) -> Option<usize> {
        let options = self.option_nodes(select);
        let multiple = self.has_attr(select, "multiple");
        let is_selected = |opt: &NodeId| self.has_attr(*opt, "selected");

        let explicit = if multiple {
            options.iter().position(is_selected)
        } else {
            options.iter().rposition(is_selected)
        };
        if explicit.is_some() || multiple || self.display_size(select) > 1 {
            return explicit;
        }
        options.iter().position(|opt| !self.is_option_disabled(*opt))
    }

    /// Parsed `size` attribute; missing or invalid values count as 1.
    fn display_size(&self, select: NodeId) -> u32 {
        self.attr(select, "size")
            .and_then(|size| size.trim().parse().ok())
            .unwrap_or(1)
    }

    /// An option is disabled by its own attribute or by a disabled `optgroup`.
    fn is_option_disabled(&self, option: NodeId) -> bool {
        self.has_attr(option, "disabled")
            || self
                .parent(option)
                .is_some_and(|p| self.tag(p) == Some("optgroup") && self.has_attr(p, "disabled"))
    }

    // ========================================================================
    // Tree access
    // ========================================================================

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// `getElementById`: the first element in document order carrying `id`.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// All element descendants of `node` in document order (excluding `node`).
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.element(current).is_some() {
                out.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// `getElementsByTagName` semantics.
    pub fn descendants_by_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|d| self.tag(*d).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// `querySelector` semantics: first matching descendant in document order.
    pub fn first_descendant(
        &self,
        node: NodeId,
        pred: impl Fn(&Document, NodeId) -> bool,
    ) -> Option<NodeId> {
        self.descendants(node).into_iter().find(|d| pred(self, *d))
    }

    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.first_descendant(self.root(), |doc, n| doc.has_class(n, class))
    }

    pub fn id_ends_with(&self, node: NodeId, suffix: &str) -> bool {
        self.attr(node, "id").is_some_and(|id| id.ends_with(suffix))
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, false, &mut out);
        out
    }

    /// Rendered-text approximation of `innerText`: skips script and style,
    /// breaks on `<br>`, collapses whitespace runs to one space.
    pub fn inner_text(&self, node: NodeId) -> String {
        let mut raw = String::new();
        self.collect_text(node, true, &mut raw);
        collapse_whitespace(&raw)
    }

    fn collect_text(&self, node: NodeId, rendered: bool, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Comment(_) => {}
            NodeKind::Element(el) if rendered => match el.tag.as_str() {
                "script" | "style" | "template" => {}
                "br" => out.push('\n'),
                _ => {
                    for child in &self.nodes[node.0].children {
                        self.collect_text(*child, rendered, out);
                    }
                }
            },
            NodeKind::Element(_) | NodeKind::Document => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, rendered, out);
                }
            }
        }
    }

    // ========================================================================
    // Controls
    // ========================================================================

    pub fn is_select(&self, node: NodeId) -> bool {
        self.tag(node) == Some("select")
    }

    /// Matches `input[type="text"]`.
    pub fn is_text_input(&self, node: NodeId) -> bool {
        self.tag(node) == Some("input")
            && self
                .attr(node, "type")
                .is_some_and(|t| t.eq_ignore_ascii_case("text"))
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.control.disabled)
    }

    pub fn doctype(&self) -> Option<&Doctype> {
        self.doctype.as_ref()
    }

    pub fn control(&self, node: NodeId) -> Option<&ControlState> {
        self.element(node).map(|el| &el.control)
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.element(node)
            .map(|el| el.control.value.as_str())
            .unwrap_or("")
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.control.value = value.to_string();
            el.control.dirty = true;
        }
    }

    /// Option elements of a select, including those nested in `optgroup`.
    pub fn option_nodes(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants_by_tag(select, "option")
    }

    /// Option labels (`option.text`) in document order.
    pub fn options(&self, select: NodeId) -> Vec<String> {
        self.option_nodes(select)
            .into_iter()
            .map(|opt| collapse_whitespace(&self.text_content(opt)))
            .collect()
    }

    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        self.element(select).and_then(|el| el.control.selected_index)
    }

    /// Out-of-range indices deselect, like assigning past the end of
    /// `options` in a browser.
    pub fn set_selected_index(&mut self, select: NodeId, index: Option<usize>) {
        let count = self.option_nodes(select).len();
        if let Some(el) = self.element_mut(select) {
            el.control.selected_index = index.filter(|i| *i < count);
            el.control.dirty = true;
        }
    }

    /// Label of the selected option, or an empty string when none is selected.
    pub fn selected_text(&self, select: NodeId) -> String {
        self.selected_index(select)
            .and_then(|i| self.options(select).into_iter().nth(i))
            .unwrap_or_default()
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn add_listener(&mut self, node: NodeId, listener: Box<dyn EventListener>) {
        self.listeners.push((node, listener));
    }

    /// Dispatch a synthetic event. Listeners on the target, then on each
    /// ancestor when the event bubbles, see it in path order.
    pub fn dispatch_event(&mut self, target: NodeId, kind: EventKind, bubbles: bool) {
        let event = DomEvent {
            kind,
            target,
            bubbles,
        };

        let mut path = vec![target];
        if bubbles {
            let mut cursor = self.parent(target);
            while let Some(node) = cursor {
                path.push(node);
                cursor = self.parent(node);
            }
        }

        for current in &path {
            for (node, listener) in self.listeners.iter_mut() {
                if node == current {
                    listener.handle(&event, *current);
                }
            }
        }

        self.events.push(event);
    }

    /// Every event dispatched so far, in dispatch order.
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
