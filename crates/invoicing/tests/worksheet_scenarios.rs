use chrono::NaiveDate;
use tallysheet_core::Aggregate;
use tallysheet_invoicing::{
    AddRow, Clear, DocumentMeta, InvoiceCommand, InvoiceSession, InvoiceTotals, LineItemDraft,
    RemoveRow, SetTaxPercent,
};

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn add(session: &mut InvoiceSession, draft: LineItemDraft) -> tallysheet_invoicing::LineItemId {
    let events = session
        .execute(&InvoiceCommand::AddRow(AddRow { draft }))
        .expect("append never fails under the default policy");
    events[0].row_id().expect("appended row has an id")
}

fn set_tax(session: &mut InvoiceSession, raw: &str) {
    session
        .execute(&InvoiceCommand::SetTaxPercent(SetTaxPercent { raw: raw.into() }))
        .unwrap();
}

fn leather_sheet() -> InvoiceSession {
    let mut session = InvoiceSession::default();
    add(
        &mut session,
        LineItemDraft {
            placement_date: NaiveDate::from_ymd_opt(2025, 9, 19),
            placement_group: Some("13/01".into()),
            ..LineItemDraft::measured(1700, 9789.5, 95.0).with_article("GOAT CRUST TO COGNIC W/P")
        },
    );
    add(
        &mut session,
        LineItemDraft {
            placement_date: NaiveDate::from_ymd_opt(2025, 9, 13),
            placement_group: Some("05/01".into()),
            pass_date: NaiveDate::from_ymd_opt(2025, 9, 9),
            pass_number: Some("46".into()),
            ..LineItemDraft::measured(1250, 6938.25, 27.0)
                .with_article("SHEEP YELLOW DYED TO FINISH")
        },
    );
    add(
        &mut session,
        LineItemDraft {
            placement_date: NaiveDate::from_ymd_opt(2025, 9, 15),
            placement_group: Some("06/01".into()),
            pass_date: NaiveDate::from_ymd_opt(2025, 9, 9),
            pass_number: Some("46".into()),
            ..LineItemDraft::measured(1250, 6302.75, 27.0)
                .with_article("SHEEP YELLOW DYED TO FINISH")
        },
    );
    set_tax(&mut session, "5");
    session
}

#[test]
fn three_leather_rows_with_five_percent_tax() {
    let session = leather_sheet();
    let totals = session.totals();

    assert_eq!(totals.total_pieces, 4200);
    assert_eq!(totals.total_area, 23_030.5);
    assert_eq!(totals.subtotal, 1_287_509.5);
    approx(totals.tax_amount, 64_375.475);
    approx(totals.grand_total, 1_351_884.975);
}

#[test]
fn empty_sheet_with_eighteen_percent_tax_is_all_zero() {
    let mut session = InvoiceSession::default();
    set_tax(&mut session, "18");
    let totals = session.totals();

    assert_eq!(totals.total_pieces, 0);
    assert_eq!(totals.total_area, 0.0);
    assert_eq!(totals.subtotal, 0.0);
    assert_eq!(totals.tax_amount, 0.0);
    assert_eq!(totals.grand_total, 0.0);
}

#[test]
fn add_then_remove_returns_to_empty_totals() {
    let mut session = InvoiceSession::default();
    let id = add(&mut session, LineItemDraft::measured(1700, 9789.5, 95.0));
    assert!(session.totals().subtotal > 0.0);

    session
        .execute(&InvoiceCommand::RemoveRow(RemoveRow { id }))
        .unwrap();

    assert_eq!(session.totals(), InvoiceTotals::default());
    assert_eq!(session.totals(), InvoiceSession::default().totals());
}

#[test]
fn clearing_a_populated_sheet_keeps_the_tax_rate() {
    let mut session = leather_sheet();
    session
        .execute(&InvoiceCommand::Clear(Clear { confirmed: true }))
        .unwrap();

    let totals = session.totals();
    assert_eq!(totals.subtotal, 0.0);
    assert_eq!(totals.tax_percent, 5.0);
    assert_eq!(totals.grand_total, 0.0);
}

#[test]
fn printed_sheet_lists_rows_in_entry_order_with_totals() {
    let session = leather_sheet();
    let meta = DocumentMeta::on(NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(), true);
    let html = session.build_document(&meta).into_string();

    let goat = html.find("GOAT CRUST TO COGNIC W/P").unwrap();
    let first_sheep = html.find("SHEEP YELLOW DYED TO FINISH").unwrap();
    assert!(goat < first_sheep);
    assert_eq!(html.matches("SHEEP YELLOW DYED TO FINISH").count(), 2);

    assert!(html.contains("<h2>PACIFIC LEATHER COMPANY</h2>"));
    assert!(html.contains("Sales Invoice mode: ON"));
    assert!(html.contains("<td class=\"num\">4,200</td>"));
    assert!(html.contains("<td class=\"num\">23,030.50</td>"));
    assert!(html.contains("<td class=\"num\">12,87,509.50</td>"));
    assert!(html.contains("GST 5%"));
    assert!(html.contains("Prepared By"));
    assert!(html.contains("Approved By"));
    assert!(html.contains("Received By"));
}
