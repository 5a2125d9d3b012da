//! JSON invoice sheet accepted on stdin.
//!
//! ```json
//! {
//!   "tax_percent": "5",
//!   "sales_invoice": true,
//!   "rows": [{ "plcDate": "2025-09-19", "article": "GOAT CRUST", "pcs": 1700, "sqft": 9789.5, "rate": 95 }]
//! }
//! ```

use serde::Deserialize;

use tallysheet_core::{Aggregate, DomainResult};
use tallysheet_invoicing::{
    AddRow, InvoiceCommand, InvoiceSession, LineItemDraft, NegativeInput, SetTaxPercent,
};

/// A number as the user typed it, or as a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    pub fn to_raw(&self) -> String {
        match self {
            RawNumber::Number(n) => n.to_string(),
            RawNumber::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SheetInput {
    #[serde(alias = "gst")]
    pub tax_percent: Option<RawNumber>,
    #[serde(alias = "salesInvoice")]
    pub sales_invoice: bool,
    pub rows: Vec<LineItemDraft>,
}

impl SheetInput {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Feed the sheet through a fresh session as the UI would have:
    /// one add per row, then the tax percentage.
    pub fn replay(&self, policy: NegativeInput) -> DomainResult<InvoiceSession> {
        let mut session = InvoiceSession::new(policy);
        for draft in &self.rows {
            session.execute(&InvoiceCommand::AddRow(AddRow {
                draft: draft.clone(),
            }))?;
        }
        if let Some(tax) = &self.tax_percent {
            session.execute(&InvoiceCommand::SetTaxPercent(SetTaxPercent {
                raw: tax.to_raw(),
            }))?;
        }
        Ok(session)
    }
}
