use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    dom::events::DomEvent,
    form::{detector::FormType, field_model::FieldDescriptor, injector::RecordOutcome},
};

/// One line of the injection audit trail.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub layout: String,
    pub record: String,
    pub kind: String,

    pub outcome: Option<RecordOutcome>,
    pub target: Option<String>,
    pub written: Option<String>,

    pub events: Vec<String>,
}

impl TraceEvent {
    pub fn now(step: u64, layout: FormType, record: &FieldDescriptor) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            layout: format!("{:?}", layout),
            record: record.name.clone(),
            kind: record.kind.as_str().to_string(),
            outcome: None,
            target: None,
            written: None,
            events: vec![],
        }
    }

    pub fn with_outcome(mut self, outcome: &RecordOutcome) -> Self {
        self.outcome = Some(*outcome);
        self
    }

    pub fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn with_written(mut self, written: Option<&str>) -> Self {
        self.written = written.map(str::to_string);
        self
    }

    pub fn with_events(mut self, events: &[DomEvent]) -> Self {
        self.events = events.iter().map(|e| e.kind.as_str().to_string()).collect();
        self
    }
}
