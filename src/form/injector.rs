use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dom::document::{Document, NodeId};
use crate::form::controls::write_answer;
use crate::form::detector::{FormType, present_layouts};
use crate::form::field_model::FieldDescriptor;
use crate::form::footer::{FooterSlot, route};
use crate::form::layout::FormLayout;
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectOptions {
    /// Also write `fields` back into the trailing column. Off by default:
    /// secondary controls are treated as read-only.
    #[serde(default)]
    pub write_secondary_fields: bool,
}

/// Where a record ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Matched the table row at this index (into the layout's row list).
    Row(usize),
    Footer(FooterSlot),
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordResult {
    pub name: String,
    pub outcome: RecordOutcome,
}

/// Outcome of one injection pass over one layout.
#[derive(Debug, Clone, Serialize)]
pub struct InjectionReport {
    pub form_type: FormType,
    pub results: Vec<RecordResult>,
    pub consumed_rows: Vec<usize>,
}

impl InjectionReport {
    pub fn matched(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome != RecordOutcome::Unmatched)
            .count()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| r.outcome == RecordOutcome::Unmatched)
            .map(|r| r.name.as_str())
    }
}

/// One injection pass over one layout. Owns the consumed-row set so a row
/// matched by one record is never matched again in the same pass.
pub struct InjectionSession<'a> {
    doc: &'a mut Document,
    layout: &'a dyn FormLayout,
    rows: Vec<NodeId>,
    consumed: BTreeSet<usize>,
    options: InjectOptions,
    tracer: Option<&'a TraceLogger>,
    results: Vec<RecordResult>,
}

impl<'a> InjectionSession<'a> {
    pub fn new(doc: &'a mut Document, layout: &'a dyn FormLayout, options: InjectOptions) -> Self {
        let rows = layout.rows(doc);
        Self {
            doc,
            layout,
            rows,
            consumed: BTreeSet::new(),
            options,
            tracer: None,
            results: Vec::new(),
        }
    }

    pub fn with_tracer(mut self, tracer: &'a TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Row indices already matched in this pass.
    pub fn consumed_rows(&self) -> &BTreeSet<usize> {
        &self.consumed
    }

    pub fn results(&self) -> &[RecordResult] {
        &self.results
    }

    pub fn document(&self) -> &Document {
        &*self.doc
    }

    /// Apply one record: first unconsumed row with an equal question label,
    /// else the first footer route whose rule matches the name, else nothing.
    pub fn apply(&mut self, record: &FieldDescriptor) -> RecordOutcome {
        let events_before = self.doc.events().len();

        let (outcome, target) = match self.match_row(&record.name) {
            Some(index) => {
                tracing::debug!(row = index, record = %record.name, "matched row");
                self.consumed.insert(index);
                self.write_row(index, record);
                (RecordOutcome::Row(index), Some(format!("row:{}", index)))
            }
            None => match route(self.layout.footer_routes(), &record.name) {
                Some(slot) => {
                    let control_id = self.write_footer(slot, record);
                    (RecordOutcome::Footer(slot), control_id.map(|id| format!("#{}", id)))
                }
                None => {
                    tracing::debug!(
                        layout = ?self.layout.form_type(),
                        record = %record.name,
                        "record matched no row or footer field, dropped"
                    );
                    (RecordOutcome::Unmatched, None)
                }
            },
        };

        if let Some(tracer) = self.tracer {
            let mut event = TraceEvent::now(self.results.len() as u64, self.layout.form_type(), record)
                .with_outcome(&outcome)
                .with_written(record.answer())
                .with_events(&self.doc.events()[events_before..]);
            if let Some(target) = target {
                event = event.with_target(target);
            }
            tracer.log(&event);
        }

        self.results.push(RecordResult {
            name: record.name.clone(),
            outcome,
        });
        outcome
    }

    fn match_row(&self, name: &str) -> Option<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.consumed.contains(index))
            .find(|(_, row)| self.layout.question_label(&*self.doc, **row).as_deref() == Some(name))
            .map(|(index, _)| index)
    }

    fn write_row(&mut self, index: usize, record: &FieldDescriptor) {
        let row = self.rows[index];
        let target = self.layout.answer_target(&*self.doc, row, record.kind);
        write_answer(
            self.doc,
            target,
            record.kind,
            record.selected.as_deref(),
            record.value.as_deref(),
        );

        if !self.options.write_secondary_fields {
            return;
        }
        for field in record.fields.iter().flatten() {
            let target = self.layout.secondary_target(&*self.doc, row, field.kind);
            if target.is_some() {
                write_answer(
                    self.doc,
                    target,
                    field.kind,
                    field.selected.as_deref(),
                    field.value.as_deref(),
                );
            }
        }
    }

    /// The setter follows the footer control's kind, not the record's.
    fn write_footer(&mut self, slot: FooterSlot, record: &FieldDescriptor) -> Option<&'static str> {
        let footer = self
            .layout
            .footer_fields()
            .iter()
            .find(|f| f.slot == slot)?;
        let control = self.doc.by_id(footer.control_id);
        write_answer(
            self.doc,
            control,
            footer.kind,
            record.selected.as_deref(),
            record.value.as_deref(),
        );
        Some(footer.control_id)
    }

    pub fn finish(self) -> InjectionReport {
        let report = InjectionReport {
            form_type: self.layout.form_type(),
            results: self.results,
            consumed_rows: self.consumed.into_iter().collect(),
        };
        tracing::info!(
            layout = ?report.form_type,
            matched = report.matched(),
            total = report.results.len(),
            "injection pass complete"
        );
        report
    }
}

/// Write every record back into the form on this page. Records that match
/// nothing are dropped silently.
pub fn inject(doc: &mut Document, records: &[FieldDescriptor]) {
    inject_with(doc, records, &InjectOptions::default(), None);
}

/// One pass per present layout, each over all records in order.
pub fn inject_with(
    doc: &mut Document,
    records: &[FieldDescriptor],
    options: &InjectOptions,
    tracer: Option<&TraceLogger>,
) -> Vec<InjectionReport> {
    let layouts = present_layouts(doc);
    let mut reports = Vec::with_capacity(layouts.len());

    for layout in &layouts {
        let mut session = InjectionSession::new(doc, layout.as_ref(), *options);
        if let Some(tracer) = tracer {
            session = session.with_tracer(tracer);
        }
        for record in records {
            session.apply(record);
        }
        reports.push(session.finish());
    }

    reports
}
