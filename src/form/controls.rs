use crate::dom::document::{Document, NodeId};
use crate::dom::events::INPUT_LIFECYCLE;
use crate::form::field_model::{FieldDescriptor, FieldKind, SecondaryField};
use crate::form::layout::{AnswerControl, find_select, find_text_input};

// ============================================================================
// Reading
// ============================================================================

/// Option labels and the selected label (empty when nothing is selected).
pub fn read_select(doc: &Document, select: NodeId) -> (Vec<String>, String) {
    (doc.options(select), doc.selected_text(select))
}

pub fn descriptor_for(doc: &Document, name: String, control: AnswerControl) -> FieldDescriptor {
    match control {
        AnswerControl::Select(select) => {
            let (options, selected) = read_select(doc, select);
            FieldDescriptor::select(name, options, selected)
        }
        AnswerControl::Text(input) => FieldDescriptor::text(name, doc.value(input).trim()),
    }
}

pub fn secondary_for(doc: &Document, control: AnswerControl) -> SecondaryField {
    match control {
        AnswerControl::Select(select) => {
            let (options, selected) = read_select(doc, select);
            SecondaryField::select(options, selected)
        }
        AnswerControl::Text(input) => SecondaryField::text(doc.value(input).trim()),
    }
}

/// Status column value. Disabled controls are never read; the cell's label
/// text stands in for them.
pub fn read_status(doc: &Document, cell: NodeId) -> String {
    if let Some(select) = find_select(doc, cell).filter(|s| !doc.is_disabled(*s)) {
        return doc.selected_text(select);
    }
    if let Some(input) = find_text_input(doc, cell).filter(|i| !doc.is_disabled(*i)) {
        return doc.value(input).trim().to_string();
    }
    doc.first_descendant(cell, |d, n| matches!(d.tag(n), Some("span") | Some("label")))
        .map(|label| doc.inner_text(label).trim().to_string())
        .unwrap_or_default()
}

// ============================================================================
// Writing
// ============================================================================

/// Fire change, keyup and blur (all bubbling) at `element`.
pub fn trigger_events(doc: &mut Document, element: NodeId) {
    for kind in INPUT_LIFECYCLE {
        doc.dispatch_event(element, kind, true);
    }
}

/// Select the first option whose label equals `text` exactly. An empty text
/// with no matching option clears the selection; any other miss leaves the
/// selection alone. Events fire whenever the element exists.
///
/// Returns false when there was no element to write to.
pub fn set_select_by_text(doc: &mut Document, element: Option<NodeId>, text: Option<&str>) -> bool {
    let Some(select) = element else {
        return false;
    };

    let position = text.and_then(|wanted| doc.options(select).iter().position(|o| o == wanted));
    match position {
        Some(index) => doc.set_selected_index(select, Some(index)),
        None if text == Some("") => doc.set_selected_index(select, None),
        None => {
            tracing::debug!(?text, "no option matched, selection unchanged");
        }
    }

    trigger_events(doc, select);
    true
}

/// Assign `value` to an input or textarea and fire the lifecycle events.
pub fn set_input_value(doc: &mut Document, element: Option<NodeId>, value: &str) -> bool {
    let Some(input) = element else {
        return false;
    };
    doc.set_value(input, value);
    trigger_events(doc, input);
    true
}

/// Write a record's answer with the setter its kind calls for.
pub fn write_answer(
    doc: &mut Document,
    element: Option<NodeId>,
    kind: FieldKind,
    selected: Option<&str>,
    value: Option<&str>,
) -> bool {
    match kind {
        FieldKind::Select => set_select_by_text(doc, element, selected),
        FieldKind::Text | FieldKind::Textarea => {
            set_input_value(doc, element, value.unwrap_or_default())
        }
    }
}
