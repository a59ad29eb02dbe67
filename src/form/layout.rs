use crate::dom::document::{Document, NodeId};
use crate::form::detector::FormType;
use crate::form::field_model::FieldKind;
use crate::form::footer::{FooterField, FooterRoute, TYPE1_FOOTER, TYPE1_ROUTES, TYPE2_FOOTER, TYPE2_ROUTES};

/// Suffix of the span id that carries a question-grid row's label.
pub const QUESTION_LABEL_SUFFIX: &str = "_txtQuestion";

/// Control found in a row, preferring a select over a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerControl {
    Select(NodeId),
    Text(NodeId),
}

/// Row/column structure of one supported legacy form. The extractor and
/// injector only talk to the page through this.
pub trait FormLayout {
    fn form_type(&self) -> FormType;

    /// The anchor table.
    fn table(&self) -> NodeId;

    /// Every `tr` under the anchor table, nested tables included.
    fn rows(&self, doc: &Document) -> Vec<NodeId> {
        doc.descendants_by_tag(self.table(), "tr")
    }

    /// Trimmed question text when the row has a question slot at all.
    fn question_label(&self, doc: &Document, row: NodeId) -> Option<String>;

    /// Whether a present label is worth emitting during extraction.
    fn accepts_question(&self, _label: &str) -> bool {
        true
    }

    /// Subtree the row's answer control lives in.
    fn answer_scope(&self, doc: &Document, row: NodeId) -> Option<NodeId>;

    fn answer_control(&self, doc: &Document, row: NodeId) -> Option<AnswerControl> {
        let scope = self.answer_scope(doc, row)?;
        find_select(doc, scope)
            .map(AnswerControl::Select)
            .or_else(|| find_text_input(doc, scope).map(AnswerControl::Text))
    }

    /// Control a record of `kind` writes to. Textareas never live in a row.
    fn answer_target(&self, doc: &Document, row: NodeId, kind: FieldKind) -> Option<NodeId> {
        let scope = self.answer_scope(doc, row)?;
        match kind {
            FieldKind::Select => find_select(doc, scope),
            FieldKind::Text => find_text_input(doc, scope),
            FieldKind::Textarea => None,
        }
    }

    /// Enabled auxiliary control in the trailing column, read during extraction.
    fn secondary_control(&self, _doc: &Document, _row: NodeId) -> Option<AnswerControl> {
        None
    }

    /// First enabled control of `kind` in the trailing column.
    fn secondary_target(&self, _doc: &Document, _row: NodeId, _kind: FieldKind) -> Option<NodeId> {
        None
    }

    /// Third cell of a three-column grid.
    fn status_cell(&self, doc: &Document, row: NodeId) -> Option<NodeId> {
        cells(doc, row).get(2).copied()
    }

    fn footer_fields(&self) -> &'static [FooterField];

    fn footer_routes(&self) -> &'static [FooterRoute];
}

// ============================================================================
// Shared lookups
// ============================================================================

pub fn cells(doc: &Document, row: NodeId) -> Vec<NodeId> {
    doc.descendants_by_tag(row, "td")
}

pub fn find_select(doc: &Document, scope: NodeId) -> Option<NodeId> {
    doc.first_descendant(scope, |d, n| d.is_select(n))
}

pub fn find_text_input(doc: &Document, scope: NodeId) -> Option<NodeId> {
    doc.first_descendant(scope, |d, n| d.is_text_input(n))
}

// ============================================================================
// Type 1: generic question grid
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Type1Layout {
    table: NodeId,
}

impl Type1Layout {
    pub fn new(table: NodeId) -> Self {
        Self { table }
    }
}

impl FormLayout for Type1Layout {
    fn form_type(&self) -> FormType {
        FormType::Type1
    }

    fn table(&self) -> NodeId {
        self.table
    }

    fn question_label(&self, doc: &Document, row: NodeId) -> Option<String> {
        let span = doc.first_descendant(row, |d, n| {
            d.tag(n) == Some("span") && d.id_ends_with(n, QUESTION_LABEL_SUFFIX)
        })?;
        Some(doc.inner_text(span).trim().to_string())
    }

    fn answer_scope(&self, _doc: &Document, row: NodeId) -> Option<NodeId> {
        Some(row)
    }

    fn footer_fields(&self) -> &'static [FooterField] {
        TYPE1_FOOTER
    }

    fn footer_routes(&self) -> &'static [FooterRoute] {
        TYPE1_ROUTES
    }
}

// ============================================================================
// Type 2: pump/inspection grid
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Type2Layout {
    table: NodeId,
}

impl Type2Layout {
    pub fn new(table: NodeId) -> Self {
        Self { table }
    }

    fn trailing_cell(doc: &Document, row: NodeId) -> Option<NodeId> {
        let cells = cells(doc, row);
        if cells.len() >= 3 {
            cells.last().copied()
        } else {
            None
        }
    }
}

impl FormLayout for Type2Layout {
    fn form_type(&self) -> FormType {
        FormType::Type2
    }

    fn table(&self) -> NodeId {
        self.table
    }

    fn question_label(&self, doc: &Document, row: NodeId) -> Option<String> {
        let cells = cells(doc, row);
        if cells.len() < 2 {
            return None;
        }
        Some(doc.inner_text(cells[0]).trim().to_string())
    }

    fn accepts_question(&self, label: &str) -> bool {
        !label.is_empty()
    }

    fn answer_scope(&self, doc: &Document, row: NodeId) -> Option<NodeId> {
        cells(doc, row).get(1).copied()
    }

    fn secondary_control(&self, doc: &Document, row: NodeId) -> Option<AnswerControl> {
        let cell = Self::trailing_cell(doc, row)?;
        if let Some(select) = find_select(doc, cell).filter(|s| !doc.is_disabled(*s)) {
            return Some(AnswerControl::Select(select));
        }
        find_text_input(doc, cell)
            .filter(|i| !doc.is_disabled(*i))
            .map(AnswerControl::Text)
    }

    fn secondary_target(&self, doc: &Document, row: NodeId, kind: FieldKind) -> Option<NodeId> {
        let cell = Self::trailing_cell(doc, row)?;
        doc.first_descendant(cell, |d, n| {
            let matches_kind = match kind {
                FieldKind::Select => d.is_select(n),
                FieldKind::Text => d.is_text_input(n),
                FieldKind::Textarea => false,
            };
            matches_kind && !d.is_disabled(n)
        })
    }

    fn footer_fields(&self) -> &'static [FooterField] {
        TYPE2_FOOTER
    }

    fn footer_routes(&self) -> &'static [FooterRoute] {
        TYPE2_ROUTES
    }
}
