use crate::browser::fetch::fetch_page;
use crate::dom::document::Document;
use crate::error::{FormSyncError, Result};
use crate::form::detector::{FormType, detect};
use crate::form::extractor::{ExtractOptions, extract};
use crate::form::injector::{InjectOptions, InjectionReport, inject_with};
use crate::form::snapshot::{FieldPayload, FormSnapshot, schema_drift, schema_fingerprint};
use crate::trace::logger::TraceLogger;

/// Where the page to scrape comes from.
#[derive(Debug, Clone)]
pub enum PageSource {
    File(String),
    Url { url: String, cookie: Option<String> },
}

// ============================================================================
// detect subcommand
// ============================================================================

pub fn cmd_detect(html_path: &str) -> Result<FormType> {
    let doc = Document::parse(&read_file(html_path)?);
    let form_type = detect(&doc);
    println!("{:?}", form_type);
    Ok(form_type)
}

// ============================================================================
// scrape subcommand
// ============================================================================

pub fn cmd_scrape(
    source: &PageSource,
    output: Option<&str>,
    options: &ExtractOptions,
) -> Result<FormSnapshot> {
    let html = load_page(source)?;
    let doc = Document::parse(&html);
    let snapshot = FormSnapshot::capture(&doc, options);

    if snapshot.form_type == FormType::Unknown {
        tracing::warn!("no known form layout on page");
    }

    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| FormSyncError::JsonSerialize {
        context: "form snapshot".into(),
        source: e,
    })?;

    match output {
        Some(path) => {
            write_file(path, &json)?;
            eprintln!(
                "Scraped {} fields ({:?}) into {}",
                snapshot.fields.len(),
                snapshot.form_type,
                path
            );
        }
        None => println!("{}", json),
    }

    Ok(snapshot)
}

// ============================================================================
// populate subcommand
// ============================================================================

pub fn cmd_populate(
    html_path: &str,
    data_path: &str,
    output: Option<&str>,
    options: &InjectOptions,
    trace_path: Option<&str>,
) -> Result<Vec<InjectionReport>> {
    let mut doc = Document::parse(&read_file(html_path)?);
    let payload = load_payload(data_path)?;

    let current = extract(&doc);
    if let Some(expected) = payload.fingerprint() {
        let actual = schema_fingerprint(detect(&doc), &current);
        if expected != actual {
            tracing::warn!(expected = %expected, actual = %actual, "form schema changed since scrape");
        }
    }

    let records = payload.into_fields();
    let drift = schema_drift(&records, &current);
    if !drift.is_empty() {
        tracing::warn!(
            missing = ?drift.missing_in_form,
            new = ?drift.new_in_form,
            "scraped data and form questions differ"
        );
    }

    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let reports = inject_with(&mut doc, &records, options, Some(&tracer));

    let html = doc.to_html();
    match output {
        Some(path) => write_file(path, &html)?,
        None => print!("{}", html),
    }

    for report in &reports {
        eprintln!(
            "{:?}: {}/{} records applied",
            report.form_type,
            report.matched(),
            report.results.len()
        );
        for name in report.unmatched() {
            eprintln!("  unmatched: {}", name);
        }
    }
    if reports.is_empty() {
        eprintln!("No known form layout on page; nothing populated");
    }

    Ok(reports)
}

// ============================================================================
// Helpers
// ============================================================================

pub fn load_page(source: &PageSource) -> Result<String> {
    match source {
        PageSource::File(path) => read_file(path),
        PageSource::Url { url, cookie } => fetch_page(url, cookie.as_deref()),
    }
}

/// Read a populate payload: a snapshot from `scrape` or a bare field array.
pub fn load_payload(path: &str) -> Result<FieldPayload> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| FormSyncError::JsonParse {
        context: path.to_string(),
        source: e,
    })
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| FormSyncError::Read {
        path: path.to_string(),
        source: e,
    })
}

fn write_file(path: &str, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| FormSyncError::Write {
        path: path.to_string(),
        source: e,
    })
}
