//! Scrape and populate legacy ASP.NET report forms.
//!
//! [`extract`] reads every field of a question grid or pump grid page into
//! [`FieldDescriptor`]s; [`inject`] writes descriptors back, matching table
//! rows by question text and footer fields by fixed id, and fires the
//! change/keyup/blur events host-page validation listens for.

pub mod browser;
pub mod cli;
pub mod dom;
pub mod error;
pub mod form;
pub mod trace;

pub use dom::document::Document;
pub use form::detector::{FormType, detect};
pub use form::extractor::{ExtractOptions, extract, extract_with};
pub use form::field_model::{FieldDescriptor, FieldKind, SecondaryField};
pub use form::injector::{InjectOptions, InjectionReport, InjectionSession, inject, inject_with};

/// Parse a saved page and scrape its form.
pub fn scrape_html(html: &str, options: &ExtractOptions) -> Vec<FieldDescriptor> {
    let doc = Document::parse(html);
    extract_with(&doc, options)
}

/// Parse a saved page, populate it and return the filled markup.
pub fn populate_html(html: &str, records: &[FieldDescriptor], options: &InjectOptions) -> String {
    let mut doc = Document::parse(html);
    inject_with(&mut doc, records, options, None);
    doc.to_html()
}
