//! Printable invoice rendering.
//!
//! [`build`] serializes rows and totals into a self-contained HTML page and
//! nothing else: showing it, opening a print dialog or waiting for it to
//! render is the job of a [`Present`] implementor owned by the host.

use core::fmt;

use chrono::{Local, NaiveDate};

use crate::line_item::LineItem;
use crate::numfmt::{self, NumberFormat};
use crate::totals::InvoiceTotals;

/// Company shown in the document header unless overridden.
pub const DEFAULT_COMPANY: &str = "PACIFIC LEATHER COMPANY";

/// Label printed in front of the tax percentage.
pub const DEFAULT_TAX_LABEL: &str = "GST";

const SIGNATURES: [&str; 3] = ["Prepared By", "Approved By", "Received By"];

const STYLE: &str = "\
body{ font-family: Arial, Helvetica, sans-serif; padding:20px; color:#111; }
h2{ text-align:center; margin-bottom:6px; }
.meta { display:flex; justify-content:space-between; margin-bottom:10px; }
table{ width:100%; border-collapse:collapse; margin-bottom:12px; }
th, td{ border:1px solid #444; padding:6px 8px; font-size:12px; text-align:left; }
th{ background:#eee; text-align:center; }
.num { text-align:right; }
tfoot td { font-weight:700; }
.right { text-align:right; }
.small { font-size:11px; color:#444; }
.signatures { display:flex; gap:40px; margin-top:20px; }";

/// Everything the document shows that does not come from the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMeta {
    pub company_name: String,
    pub bill_date: NaiveDate,
    /// Printed as `Sales Invoice mode: ON|OFF`.
    pub sales_invoice: bool,
    pub tax_label: String,
    pub number_format: NumberFormat,
}

impl DocumentMeta {
    /// Metadata dated on the given day.
    pub fn on(bill_date: NaiveDate, sales_invoice: bool) -> Self {
        Self {
            company_name: DEFAULT_COMPANY.to_string(),
            bill_date,
            sales_invoice,
            tax_label: DEFAULT_TAX_LABEL.to_string(),
            number_format: NumberFormat::default(),
        }
    }

    /// Metadata dated today, per the local clock.
    pub fn today(sales_invoice: bool) -> Self {
        Self::on(Local::now().date_naive(), sales_invoice)
    }

    pub fn with_company(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = company_name.into();
        self
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    pub fn with_tax_label(mut self, tax_label: impl Into<String>) -> Self {
        self.tax_label = tax_label.into();
        self
    }
}

/// A rendered invoice. Not retained by anything in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    html: String,
}

impl InvoiceDocument {
    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

impl fmt::Display for InvoiceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// The print/export collaborator.
///
/// Implementors decide how and when the document is shown; nothing in this
/// crate waits on them.
pub trait Present {
    type Error;

    fn present(&mut self, document: &InvoiceDocument) -> Result<(), Self::Error>;
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render `rows` and `totals` into a printable document.
pub fn build<'a, I>(rows: I, totals: &InvoiceTotals, meta: &DocumentMeta) -> InvoiceDocument
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let rows: Vec<&LineItem> = rows.into_iter().collect();
    let html = Page {
        rows: &rows,
        totals,
        meta,
    }
    .to_string();

    tracing::debug!(rows = rows.len(), bytes = html.len(), "invoice document built");
    InvoiceDocument { html }
}

struct Page<'a> {
    rows: &'a [&'a LineItem],
    totals: &'a InvoiceTotals,
    meta: &'a DocumentMeta,
}

impl Page<'_> {
    fn header(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.meta;
        let percent = numfmt::percent_label(self.totals.tax_percent);
        writeln!(out, "<h2>{}</h2>", escape_html(&meta.company_name))?;
        writeln!(out, "<div class=\"meta\">")?;
        writeln!(out, "<div>")?;
        writeln!(
            out,
            "<div><strong>Bill Date:</strong> {}</div>",
            meta.bill_date.format("%d/%m/%Y")
        )?;
        writeln!(
            out,
            "<div class=\"small\">Sales Invoice mode: {}</div>",
            if meta.sales_invoice { "ON" } else { "OFF" }
        )?;
        writeln!(out, "</div>")?;
        writeln!(
            out,
            "<div style=\"text-align:right;\"><div><strong>{} %</strong>: {percent}%</div></div>",
            escape_html(&meta.tax_label)
        )?;
        writeln!(out, "</div>")
    }

    fn line(&self, out: &mut fmt::Formatter<'_>, row: &LineItem) -> fmt::Result {
        let nf = &self.meta.number_format;
        writeln!(out, "<tr>")?;
        writeln!(out, "<td>{}</td>", date_cell(row.placement_date))?;
        writeln!(out, "<td>{}</td>", escape_html(&row.placement_group))?;
        writeln!(out, "<td>{}</td>", date_cell(row.pass_date))?;
        writeln!(out, "<td>{}</td>", escape_html(&row.pass_number))?;
        writeln!(out, "<td>{}</td>", escape_html(&row.article))?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(row.pieces as f64, 0))?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(row.area, 2))?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(row.rate, 2))?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(row.amount(), 2))?;
        writeln!(out, "</tr>")
    }

    fn footer(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nf = &self.meta.number_format;
        let t = self.totals;
        writeln!(out, "<tfoot>")?;
        writeln!(out, "<tr>")?;
        writeln!(out, "<td colspan=\"5\" class=\"right\">SUBTOTAL</td>")?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(t.total_pieces as f64, 0))?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(t.total_area, 2))?;
        writeln!(out, "<td></td>")?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(t.subtotal, 2))?;
        writeln!(out, "</tr>")?;
        writeln!(out, "<tr>")?;
        writeln!(
            out,
            "<td colspan=\"8\" class=\"right\">{} {}%</td>",
            escape_html(&self.meta.tax_label),
            numfmt::percent_label(t.tax_percent)
        )?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(t.tax_amount, 2))?;
        writeln!(out, "</tr>")?;
        writeln!(out, "<tr>")?;
        writeln!(out, "<td colspan=\"8\" class=\"right\">GRAND TOTAL</td>")?;
        writeln!(out, "<td class=\"num\">{}</td>", nf.format(t.grand_total, 2))?;
        writeln!(out, "</tr>")?;
        writeln!(out, "</tfoot>")
    }
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>Invoice Print</title>")?;
        writeln!(out, "<style>\n{STYLE}\n</style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;

        self.header(out)?;

        writeln!(out, "<table>")?;
        writeln!(out, "<thead>")?;
        writeln!(
            out,
            "<tr><th>PLC Date</th><th>PLC GP#</th><th>P.G Date</th><th>P.G#</th><th>ARTICLE</th>\
             <th>PC's</th><th>SQ.FT</th><th>RATE</th><th>AMOUNT</th></tr>"
        )?;
        writeln!(out, "</thead>")?;
        writeln!(out, "<tbody>")?;
        for row in self.rows {
            self.line(out, row)?;
        }
        writeln!(out, "</tbody>")?;
        self.footer(out)?;
        writeln!(out, "</table>")?;

        writeln!(out, "<div class=\"signatures\">")?;
        for label in SIGNATURES {
            writeln!(out, "<div><strong>{label}:</strong> ____________________</div>")?;
        }
        writeln!(out, "</div>")?;

        writeln!(out, "</body>")?;
        write!(out, "</html>")
    }
}

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
