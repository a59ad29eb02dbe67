use form_sync::dom::document::Document;
use form_sync::form::extractor::extract;
use form_sync::form::field_model::FieldDescriptor;
use form_sync::form::injector::inject;
use form_sync::{ExtractOptions, InjectOptions, populate_html, scrape_html};

use crate::common::fixtures::{type1_doc, type1_page, type2_doc, type2_page};

mod common;

/// Edits every answer of a freshly scraped page so the copy differs from
/// the pristine fixture.
fn edited(mut fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    for field in &mut fields {
        if let Some(options) = field.options.as_ref() {
            if let Some(last) = options.last() {
                field.selected = Some(last.clone());
            }
        } else {
            field.value = Some(format!("{} (edited)", field.value.as_deref().unwrap_or_default()));
        }
    }
    fields
}

#[test]
fn type1_extract_inject_extract_is_stable() {
    let mut source = type1_doc();
    let scraped = extract(&source);
    inject(&mut source, &edited(scraped));
    let wanted = extract(&source);

    let mut target = type1_doc();
    inject(&mut target, &wanted);

    assert_eq!(extract(&target), wanted);
}

#[test]
fn type2_extract_inject_extract_is_stable() {
    let mut source = type2_doc();
    let scraped = extract(&source);
    inject(&mut source, &edited(scraped));
    let wanted = extract(&source);

    let mut target = type2_doc();
    inject(&mut target, &wanted);

    assert_eq!(extract(&target), wanted);
}

#[test]
fn unchanged_data_reinjects_without_changes() {
    let mut doc = type2_doc();
    let before = extract(&doc);

    inject(&mut doc, &before);

    assert_eq!(extract(&doc), before);
    assert!(!doc.events().is_empty(), "Every write still fires its events");
}

#[test]
fn populated_markup_scrapes_back_to_the_same_fields() {
    for page in [type1_page(), type2_page()] {
        let wanted = edited(scrape_html(&page, &ExtractOptions::default()));

        let filled = populate_html(&page, &wanted, &InjectOptions::default());
        let rescraped = scrape_html(&filled, &ExtractOptions::default());

        assert_eq!(rescraped.len(), wanted.len());
        for (got, want) in rescraped.iter().zip(&wanted) {
            assert_eq!(got.name, want.name);
            assert_eq!(got.selected, want.selected, "{}", want.name);
        }
    }
}

#[test]
fn scraped_json_feeds_populate() {
    let scraped = extract(&Document::parse(&type1_page()));
    let json = serde_json::to_string(&edited(scraped)).expect("serialize");
    let records: Vec<FieldDescriptor> = serde_json::from_str(&json).expect("deserialize");

    let mut doc = type1_doc();
    inject(&mut doc, &records);

    assert_eq!(extract(&doc), records);
}

#[test]
fn populated_webforms_page_keeps_comment_newlines_and_markup() {
    let page = format!(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html><head><title>Inspection</title></head><body>
<noscript><img src="x.gif"></noscript>
<form id="aspnetForm">{}{}</form></body></html>"#,
        common::fixtures::type1_grid(&[]),
        common::fixtures::TYPE1_FOOTER
    );
    let note = "\nSecond line is the note";

    let filled = populate_html(
        &page,
        &[FieldDescriptor::textarea("OVERALL COMMENTS", note)],
        &InjectOptions::default(),
    );
    let rescraped = scrape_html(&filled, &ExtractOptions::default());

    assert_eq!(rescraped[0].value.as_deref(), Some(note));
    assert!(filled.starts_with(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN""#));
    assert!(filled.contains(r#"<noscript><img src="x.gif"></noscript>"#));
}
