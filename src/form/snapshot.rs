use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dom::document::Document;
use crate::form::detector::{FormType, detect};
use crate::form::extractor::{ExtractOptions, extract_with};
use crate::form::field_model::FieldDescriptor;

/// Scraped fields plus the layout and schema fingerprint they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub form_type: FormType,
    pub fingerprint: String,
    pub fields: Vec<FieldDescriptor>,
}

impl FormSnapshot {
    pub fn capture(doc: &Document, options: &ExtractOptions) -> Self {
        let form_type = detect(doc);
        let fields = extract_with(doc, options);
        Self {
            form_type,
            fingerprint: schema_fingerprint(form_type, &fields),
            fields,
        }
    }
}

/// SHA-1 over the layout and the ordered `(type, name)` pairs. Answers do
/// not contribute, so the fingerprint only moves when the form's questions do.
pub fn schema_fingerprint(form_type: FormType, fields: &[FieldDescriptor]) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(format!("{:?}", form_type).as_bytes());
    for field in fields {
        hasher.update(b"\n");
        hasher.update(field.kind.as_str().as_bytes());
        hasher.update(b"\t");
        hasher.update(field.name.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Payload accepted for population: a full snapshot or a bare field list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldPayload {
    Snapshot(FormSnapshot),
    Fields(Vec<FieldDescriptor>),
}

impl FieldPayload {
    pub fn fingerprint(&self) -> Option<&str> {
        match self {
            FieldPayload::Snapshot(snapshot) => Some(&snapshot.fingerprint),
            FieldPayload::Fields(_) => None,
        }
    }

    pub fn into_fields(self) -> Vec<FieldDescriptor> {
        match self {
            FieldPayload::Snapshot(snapshot) => snapshot.fields,
            FieldPayload::Fields(fields) => fields,
        }
    }
}

/// Question names present on only one side of a populate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDrift {
    /// Record names the current form does not carry.
    pub missing_in_form: Vec<String>,
    /// Form questions no record addresses.
    pub new_in_form: Vec<String>,
}

impl SchemaDrift {
    pub fn is_empty(&self) -> bool {
        self.missing_in_form.is_empty() && self.new_in_form.is_empty()
    }
}

pub fn schema_drift(records: &[FieldDescriptor], current: &[FieldDescriptor]) -> SchemaDrift {
    let record_names: HashSet<&str> = records.iter().map(|f| f.name.as_str()).collect();
    let current_names: HashSet<&str> = current.iter().map(|f| f.name.as_str()).collect();

    let mut seen = HashSet::new();
    let missing_in_form = records
        .iter()
        .map(|f| f.name.as_str())
        .filter(|name| !current_names.contains(name) && seen.insert(*name))
        .map(str::to_string)
        .collect();

    let mut seen = HashSet::new();
    let new_in_form = current
        .iter()
        .map(|f| f.name.as_str())
        .filter(|name| !record_names.contains(name) && seen.insert(*name))
        .map(str::to_string)
        .collect();

    SchemaDrift {
        missing_in_form,
        new_in_form,
    }
}
