use std::{fs::OpenOptions, io::Write, path::Path, sync::Mutex};

use crate::trace::trace::TraceEvent;

/// Appends [`TraceEvent`]s to a JSONL file. Failing to open the file
/// disables tracing instead of failing the run.
pub struct TraceLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not open trace file");
                Self { file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append one line. Returns whether it was written; failures are logged
    /// against the record they belong to and never abort injection.
    pub fn log(&self, event: &TraceEvent) -> bool {
        let Some(file) = &self.file else {
            return false;
        };

        let line = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(step = event.step, record = %event.record, error = %e, "trace event not serializable");
                return false;
            }
        };

        let written = file
            .lock()
            .map_err(|e| e.to_string())
            .and_then(|mut f| writeln!(f, "{}", line).map_err(|e| e.to_string()));
        if let Err(error) = &written {
            tracing::warn!(
                step = event.step,
                record = %event.record,
                outcome = ?event.outcome,
                %error,
                "trace line dropped"
            );
        }
        written.is_ok()
    }
}
