//! Invoice worksheet domain module.
//!
//! Rows of shipment/article data, totals folded over them, and the printable
//! document rendered from both. Deterministic domain logic only: no IO, no
//! windowing, no printing.

pub mod document;
pub mod line_item;
pub mod numfmt;
pub mod session;
pub mod store;
pub mod totals;

pub use document::{DocumentMeta, InvoiceDocument, Present, escape_html};
pub use line_item::{Field, FieldValue, LineItem, LineItemDraft, LineItemId, NegativeInput};
pub use numfmt::{Grouping, NumberFormat};
pub use session::{
    AddRow, Clear, EditField, FieldEdited, InvoiceCommand, InvoiceEvent, InvoiceSession,
    InvoiceState, RemoveRow, RowAppended, RowRemoved, RowsCleared, SetTaxPercent,
    TaxPercentChanged,
};
pub use store::LineItemStore;
pub use totals::{InvoiceTotals, TotalsDisplay, recompute};
