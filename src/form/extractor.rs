use serde::{Deserialize, Serialize};

use crate::dom::document::Document;
use crate::form::controls::{descriptor_for, read_select, read_status, secondary_for};
use crate::form::detector::present_layouts;
use crate::form::field_model::{FieldDescriptor, FieldKind};
use crate::form::layout::FormLayout;

/// Extraction variants for different deployed form versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Read a third-column status control into every descriptor.
    #[serde(default)]
    pub status_column: bool,
}

/// Scrape every field of the form on this page, table rows first, then
/// footer fields. Pages without a known anchor yield nothing.
pub fn extract(doc: &Document) -> Vec<FieldDescriptor> {
    extract_with(doc, &ExtractOptions::default())
}

pub fn extract_with(doc: &Document, options: &ExtractOptions) -> Vec<FieldDescriptor> {
    present_layouts(doc)
        .iter()
        .flat_map(|layout| extract_layout(doc, layout.as_ref(), options))
        .collect()
}

pub fn extract_layout(
    doc: &Document,
    layout: &dyn FormLayout,
    options: &ExtractOptions,
) -> Vec<FieldDescriptor> {
    let mut fields = extract_rows(doc, layout, options);
    let row_count = fields.len();
    fields.extend(extract_footer(doc, layout, options));

    tracing::info!(
        layout = ?layout.form_type(),
        rows = row_count,
        footer = fields.len() - row_count,
        "extracted form fields"
    );
    fields
}

fn extract_rows(
    doc: &Document,
    layout: &dyn FormLayout,
    options: &ExtractOptions,
) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();

    for (index, row) in layout.rows(doc).into_iter().enumerate() {
        let Some(name) = layout.question_label(doc, row) else {
            continue;
        };
        if !layout.accepts_question(&name) {
            continue;
        }
        let Some(control) = layout.answer_control(doc, row) else {
            tracing::debug!(row = index, question = %name, "row has no answer control, skipped");
            continue;
        };

        let mut item = descriptor_for(doc, name, control);

        if let Some(secondary) = layout.secondary_control(doc, row) {
            item.fields = Some(vec![secondary_for(doc, secondary)]);
        }

        if options.status_column {
            let status = layout
                .status_cell(doc, row)
                .map(|cell| read_status(doc, cell))
                .unwrap_or_default();
            item.status = Some(status);
        }

        fields.push(item);
    }

    fields
}

fn extract_footer(
    doc: &Document,
    layout: &dyn FormLayout,
    options: &ExtractOptions,
) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();

    for footer in layout.footer_fields() {
        let Some(control) = doc.by_id(footer.control_id) else {
            continue;
        };
        let name = footer.label.resolve(doc);

        let mut item = match footer.kind {
            FieldKind::Select => {
                let (choices, selected) = read_select(doc, control);
                FieldDescriptor::select(name, choices, selected)
            }
            FieldKind::Text => FieldDescriptor::text(name, doc.value(control).trim()),
            // Comment boxes keep their whitespace.
            FieldKind::Textarea => FieldDescriptor::textarea(name, doc.value(control)),
        };

        if options.status_column {
            item.status = Some(String::new());
        }

        fields.push(item);
    }

    fields
}
