use serde::{Deserialize, Serialize};

use crate::dom::document::Document;
use crate::form::layout::{FormLayout, Type1Layout, Type2Layout};

/// Anchor table of the generic question grid.
pub const QUESTIONS_GRID_ID: &str = "ctl00_DataGridQuestions";

/// Anchor table of the pump/inspection grid.
pub const PUMP_GRID_ID: &str = "GridViewPump";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    Type1,
    Type2,
    Unknown,
}

impl FormType {
    pub fn anchor_id(self) -> Option<&'static str> {
        match self {
            FormType::Type1 => Some(QUESTIONS_GRID_ID),
            FormType::Type2 => Some(PUMP_GRID_ID),
            FormType::Unknown => None,
        }
    }
}

/// Which layout the page carries. The question grid wins if a page somehow
/// holds both anchors.
pub fn detect(doc: &Document) -> FormType {
    present_layouts(doc)
        .first()
        .map(|layout| layout.form_type())
        .unwrap_or(FormType::Unknown)
}

/// Every layout whose anchor table exists, question grid first. Extraction
/// and injection run once per entry.
pub fn present_layouts(doc: &Document) -> Vec<Box<dyn FormLayout>> {
    let mut layouts: Vec<Box<dyn FormLayout>> = Vec::new();
    if let Some(table) = doc.by_id(QUESTIONS_GRID_ID) {
        layouts.push(Box::new(Type1Layout::new(table)));
    }
    if let Some(table) = doc.by_id(PUMP_GRID_ID) {
        layouts.push(Box::new(Type2Layout::new(table)));
    }
    layouts
}
