#![allow(dead_code)]

use form_sync::dom::document::{Document, NodeId};

// ============================================================================
// Question grid (Type 1)
// ============================================================================

pub fn type1_select_row(index: usize, label: &str, options: &[&str], selected: Option<usize>) -> String {
    let options: String = options
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let attr = if Some(i) == selected { " selected" } else { "" };
            format!("<option{}>{}</option>", attr, o)
        })
        .collect();
    format!(
        r#"<tr><td><span id="ctl00_DataGridQuestions_ctl{:02}_txtQuestion">{}</span></td><td><select name="q{}">{}</select></td></tr>"#,
        index, label, index, options
    )
}

pub fn type1_text_row(index: usize, label: &str, value: &str) -> String {
    format!(
        r#"<tr><td><span id="ctl00_DataGridQuestions_ctl{:02}_txtQuestion">{}</span></td><td><input type="text" name="q{}" value="{}"></td></tr>"#,
        index, label, index, value
    )
}

pub fn type1_grid(rows: &[String]) -> String {
    format!(
        r#"<table id="ctl00_DataGridQuestions"><tr><td>Question</td><td>Answer</td></tr>{}</table>"#,
        rows.concat()
    )
}

pub const TYPE1_FOOTER: &str = r#"
<div>
  <span class="logintitlefont">OVERALL COMMENTS:</span>
  <textarea id="ctl01_txtComments">  Lid cracked </textarea>
  <span id="ctl01_lblCorrectionStatus">Correction status:</span>
  <span id="ctl01_Label2">(required)</span>
  <select id="ctl01_drpCorrectionStatus"><option></option><option>Corrected</option><option>Not corrected</option></select>
  <span id="ctl01_lblInspectedBy">Fieldwork performed by:</span>
  <select id="ctl01_drpFieldworkPerformedBy"><option>Select</option><option>Jane Doe</option></select>
</div>"#;

pub fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Inspection</title></head><body><form id=\"aspnetForm\">{}</form></body></html>",
        body
    )
}

/// Two answerable grid rows, one row without a control, all footer fields.
pub fn type1_page() -> String {
    let grid = type1_grid(&[
        type1_select_row(2, "Tank Condition", &["Good", "Fair", "Poor"], Some(1)),
        type1_text_row(3, "Gallons pumped", " 1000 "),
        r#"<tr><td><span id="ctl00_DataGridQuestions_ctl04_txtQuestion">Photo attached</span></td><td>n/a</td></tr>"#.to_string(),
    ]);
    page(&format!("{}{}", grid, TYPE1_FOOTER))
}

pub fn type1_doc() -> Document {
    Document::parse(&type1_page())
}

// ============================================================================
// Pump grid (Type 2)
// ============================================================================

pub const TYPE2_GRID: &str = r#"
<table id="GridViewPump">
  <tr><th>Item</th><th>Condition</th><th>Detail</th></tr>
  <tr>
    <td>Inlet baffle</td>
    <td><select><option>OK</option><option selected>Damaged</option></select></td>
    <td><select><option>Replace</option><option selected>Repair</option></select></td>
  </tr>
  <tr>
    <td>Sludge depth (in)</td>
    <td><input type="text" value="14"></td>
    <td><select disabled><option selected>N/A</option></select></td>
  </tr>
  <tr>
    <td>Outlet filter</td>
    <td><select><option>OK</option><option>Missing</option></select></td>
    <td><input type="text" value=" cleaned "></td>
  </tr>
  <tr><td>   </td><td><input type="text" value="orphan"></td></tr>
  <tr><td>Notes only</td><td>no control here</td></tr>
</table>"#;

pub const TYPE2_FOOTER: &str = r#"
<textarea id="txtComments">Pumped 1000 gal</textarea>
<span id="lblCorrectionStatus">Correction status:</span>
<select id="drpCorrectionStatus"><option>Pending</option><option selected>Corrected</option></select>
<span id="lblFieldworkPerformedBy">Fieldwork performed by:</span>
<input type="text" id="txtFieldworkPerformedBy" value=" J. Smith ">
<span id="Label1">Proposed dump location:</span>
<select id="drpState"><option>MO</option><option selected>KS</option></select>
<select id="drpDumpLocation"><option selected>Plant A</option><option>Plant B</option></select>"#;

pub fn type2_page() -> String {
    page(&format!("{}{}", TYPE2_GRID, TYPE2_FOOTER))
}

pub fn type2_doc() -> Document {
    Document::parse(&type2_page())
}

// ============================================================================
// Lookups
// ============================================================================

pub fn control(doc: &Document, id: &str) -> NodeId {
    doc.by_id(id)
        .unwrap_or_else(|| panic!("fixture is missing #{}", id))
}

/// The n-th select inside the given table, in document order.
pub fn nth_select(doc: &Document, table_id: &str, n: usize) -> NodeId {
    let table = control(doc, table_id);
    doc.descendants_by_tag(table, "select")[n]
}

pub fn nth_text_input(doc: &Document, table_id: &str, n: usize) -> NodeId {
    let table = control(doc, table_id);
    doc.descendants(table)
        .into_iter()
        .filter(|node| doc.is_text_input(*node))
        .nth(n)
        .expect("fixture text input")
}
