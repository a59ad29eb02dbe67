use serde::{Deserialize, Serialize};

/// Control kind a descriptor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Select,
    Text,
    Textarea,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Select => "select",
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
        }
    }
}

/// One form field's current (scraped) or desired (to populate) state.
///
/// JSON shape: `{type, name, value?, selected?, options?, status?, fields?}`.
/// `selected` is always an option label, never an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Question or label text; the key the injector matches rows by.
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Read-only annotation from a status column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Controls in a row's trailing column, matched by row not by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<SecondaryField>>,
}

impl FieldDescriptor {
    pub fn select(name: impl Into<String>, options: Vec<String>, selected: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Select,
            name: name.into(),
            value: None,
            selected: Some(selected.into()),
            options: Some(options),
            status: None,
            fields: None,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(FieldKind::Text, name, value)
    }

    pub fn textarea(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(FieldKind::Textarea, name, value)
    }

    fn with_value(kind: FieldKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: Some(value.into()),
            selected: None,
            options: None,
            status: None,
            fields: None,
        }
    }

    /// A select record carrying only the label to choose, as a caller
    /// editing scraped data would write it.
    pub fn choose(name: impl Into<String>, selected: impl Into<String>) -> Self {
        Self {
            options: None,
            ..Self::select(name, Vec::new(), selected)
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<SecondaryField>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// The answer this record carries: the selected label for selects, the
    /// value otherwise.
    pub fn answer(&self) -> Option<&str> {
        match self.kind {
            FieldKind::Select => self.selected.as_deref(),
            FieldKind::Text | FieldKind::Textarea => self.value.as_deref(),
        }
    }
}

/// Auxiliary control living in a row's trailing column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryField {
    #[serde(rename = "type")]
    pub kind: FieldKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl SecondaryField {
    pub fn select(options: Vec<String>, selected: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Select,
            value: None,
            selected: Some(selected.into()),
            options: Some(options),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Text,
            value: Some(value.into()),
            selected: None,
            options: None,
        }
    }
}
