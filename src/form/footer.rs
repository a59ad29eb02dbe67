use serde::Serialize;

use crate::dom::document::Document;
use crate::form::field_model::FieldKind;

/// Footer fields sit outside the question grid and are addressed by fixed
/// element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FooterSlot {
    OverallComments,
    CorrectionStatus,
    FieldworkPerformedBy,
    DumpLocationState,
    DumpLocationDetail,
}

/// Where a footer field's descriptor name comes from.
#[derive(Debug, Clone, Copy)]
pub enum FooterLabel {
    Fixed(&'static str),
    FirstWithClass {
        class: &'static str,
        fallback: &'static str,
    },
    Element {
        id: &'static str,
        fallback: &'static str,
    },
    /// Texts of several label elements joined with a space; fallback only
    /// when none of them has text.
    Joined {
        ids: &'static [&'static str],
        fallback: &'static str,
    },
    Suffixed {
        id: &'static str,
        fallback: &'static str,
        suffix: &'static str,
    },
}

impl FooterLabel {
    pub fn resolve(&self, doc: &Document) -> String {
        let text_of = |id: &str| doc.by_id(id).map(|n| doc.inner_text(n).trim().to_string());

        match *self {
            FooterLabel::Fixed(label) => label.to_string(),
            FooterLabel::FirstWithClass { class, fallback } => doc
                .first_by_class(class)
                .map(|n| doc.inner_text(n).trim().to_string())
                .unwrap_or_else(|| fallback.to_string()),
            FooterLabel::Element { id, fallback } => {
                text_of(id).unwrap_or_else(|| fallback.to_string())
            }
            FooterLabel::Joined { ids, fallback } => {
                let joined = ids
                    .iter()
                    .map(|id| text_of(id).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(" ");
                let joined = joined.trim();
                if joined.is_empty() {
                    fallback.to_string()
                } else {
                    joined.to_string()
                }
            }
            FooterLabel::Suffixed { id, fallback, suffix } => {
                let base = text_of(id).unwrap_or_else(|| fallback.to_string());
                format!("{}{}", base, suffix)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FooterField {
    pub slot: FooterSlot,
    pub control_id: &'static str,
    pub kind: FieldKind,
    pub label: FooterLabel,
}

/// Substring test against a record name. Case-sensitive, no trimming.
#[derive(Debug, Clone, Copy)]
pub enum NameRule {
    Contains(&'static str),
    ContainsAll(&'static [&'static str]),
}

impl NameRule {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameRule::Contains(needle) => name.contains(needle),
            NameRule::ContainsAll(needles) => needles.iter().all(|n| name.contains(n)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FooterRoute {
    pub rule: NameRule,
    pub slot: FooterSlot,
}

/// First-match-wins lookup of the footer slot a record name routes to.
pub fn route(routes: &[FooterRoute], name: &str) -> Option<FooterSlot> {
    routes
        .iter()
        .find(|route| route.rule.matches(name))
        .map(|route| route.slot)
}

// ============================================================================
// Question grid (Type 1)
// ============================================================================

pub const TYPE1_FOOTER: &[FooterField] = &[
    FooterField {
        slot: FooterSlot::OverallComments,
        control_id: "ctl01_txtComments",
        kind: FieldKind::Textarea,
        label: FooterLabel::FirstWithClass {
            class: "logintitlefont",
            fallback: "OVERALL COMMENTS",
        },
    },
    FooterField {
        slot: FooterSlot::CorrectionStatus,
        control_id: "ctl01_drpCorrectionStatus",
        kind: FieldKind::Select,
        label: FooterLabel::Joined {
            ids: &["ctl01_lblCorrectionStatus", "ctl01_Label2"],
            fallback: "Correction status:",
        },
    },
    FooterField {
        slot: FooterSlot::FieldworkPerformedBy,
        control_id: "ctl01_drpFieldworkPerformedBy",
        kind: FieldKind::Select,
        label: FooterLabel::Element {
            id: "ctl01_lblInspectedBy",
            fallback: "Fieldwork performed by:",
        },
    },
];

pub const TYPE1_ROUTES: &[FooterRoute] = &[
    FooterRoute {
        rule: NameRule::Contains("OVERALL COMMENTS"),
        slot: FooterSlot::OverallComments,
    },
    FooterRoute {
        rule: NameRule::Contains("Correction status"),
        slot: FooterSlot::CorrectionStatus,
    },
    FooterRoute {
        rule: NameRule::Contains("Fieldwork performed by"),
        slot: FooterSlot::FieldworkPerformedBy,
    },
];

// ============================================================================
// Pump grid (Type 2)
// ============================================================================

pub const TYPE2_COMMENTS_LABEL: &str = "OVERALL COMMENTS: Provide additional or clarifying information regarding any observed deficiencies or status of the system";

pub const TYPE2_FOOTER: &[FooterField] = &[
    FooterField {
        slot: FooterSlot::OverallComments,
        control_id: "txtComments",
        kind: FieldKind::Textarea,
        label: FooterLabel::Fixed(TYPE2_COMMENTS_LABEL),
    },
    FooterField {
        slot: FooterSlot::CorrectionStatus,
        control_id: "drpCorrectionStatus",
        kind: FieldKind::Select,
        label: FooterLabel::Element {
            id: "lblCorrectionStatus",
            fallback: "Correction status:",
        },
    },
    FooterField {
        slot: FooterSlot::FieldworkPerformedBy,
        control_id: "txtFieldworkPerformedBy",
        kind: FieldKind::Text,
        label: FooterLabel::Element {
            id: "lblFieldworkPerformedBy",
            fallback: "Fieldwork performed by:",
        },
    },
    FooterField {
        slot: FooterSlot::DumpLocationState,
        control_id: "drpState",
        kind: FieldKind::Select,
        label: FooterLabel::Suffixed {
            id: "Label1",
            fallback: "Proposed dump location:",
            suffix: " (State)",
        },
    },
    FooterField {
        slot: FooterSlot::DumpLocationDetail,
        control_id: "drpDumpLocation",
        kind: FieldKind::Select,
        label: FooterLabel::Fixed("Dump Location Detail"),
    },
];

pub const TYPE2_ROUTES: &[FooterRoute] = &[
    FooterRoute {
        rule: NameRule::Contains("OVERALL COMMENTS"),
        slot: FooterSlot::OverallComments,
    },
    FooterRoute {
        rule: NameRule::Contains("Correction status"),
        slot: FooterSlot::CorrectionStatus,
    },
    FooterRoute {
        rule: NameRule::Contains("Fieldwork performed by"),
        slot: FooterSlot::FieldworkPerformedBy,
    },
    FooterRoute {
        rule: NameRule::ContainsAll(&["Proposed dump location", "State"]),
        slot: FooterSlot::DumpLocationState,
    },
    FooterRoute {
        rule: NameRule::Contains("Dump Location Detail"),
        slot: FooterSlot::DumpLocationDetail,
    },
];
