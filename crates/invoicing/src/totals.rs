//! Aggregation of rows into invoice totals.
//!
//! Totals are a pure fold over the current rows plus the tax percentage.
//! Nothing here is incremental: callers recompute after every change.

use serde::{Deserialize, Serialize};

use crate::line_item::LineItem;
use crate::numfmt::{self, NumberFormat};

/// Per-row amount.
pub fn amount(area: f64, rate: f64) -> f64 {
    area * rate
}

/// Derived totals over every row at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub total_pieces: i64,
    pub total_area: f64,
    /// Σ area × rate.
    pub subtotal: f64,
    pub tax_percent: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
}

impl InvoiceTotals {
    /// Strings for the totals cells of a worksheet UI.
    pub fn display(&self, fmt: &NumberFormat) -> TotalsDisplay {
        TotalsDisplay {
            total_pieces: self.total_pieces.to_string(),
            total_area: fmt.format(self.total_area, 2),
            subtotal: fmt.format(self.subtotal, 2),
            tax_percent: numfmt::percent_label(self.tax_percent),
            tax_amount: fmt.format(self.tax_amount, 2),
            grand_total: fmt.format(self.grand_total, 2),
        }
    }
}

/// Formatted totals, ready to bind to display cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsDisplay {
    pub total_pieces: String,
    pub total_area: String,
    pub subtotal: String,
    pub tax_percent: String,
    pub tax_amount: String,
    pub grand_total: String,
}

/// Fold `rows` into fresh totals.
///
/// Negative cells are not rejected here; they flow into the sums.
pub fn recompute<'a, I>(rows: I, tax_percent: f64) -> InvoiceTotals
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut total_pieces: i64 = 0;
    let mut total_area = 0.0;
    let mut subtotal = 0.0;

    for row in rows {
        total_pieces = total_pieces.saturating_add(row.pieces);
        total_area += row.area;
        subtotal += row.amount();
    }

    let tax_amount = subtotal * tax_percent / 100.0;

    InvoiceTotals {
        total_pieces,
        total_area,
        subtotal,
        tax_percent,
        tax_amount,
        grand_total: subtotal + tax_amount,
    }
}
