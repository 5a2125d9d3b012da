//! `tallysheet` host: reads an invoice sheet, renders it, hands it to a
//! print collaborator.

pub mod config;
pub mod present;
pub mod sheet;

use anyhow::Context;

use tallysheet_invoicing::{DocumentMeta, InvoiceDocument, NumberFormat};

pub use config::CliConfig;
pub use present::{FilePresenter, PresentError, WriterPresenter};
pub use sheet::SheetInput;

/// Replay `sheet` under `config` and render the printable document.
pub fn render(config: &CliConfig, sheet: &SheetInput) -> anyhow::Result<InvoiceDocument> {
    let session = sheet
        .replay(config.negative_input)
        .context("invoice sheet was rejected")?;

    let meta = DocumentMeta::today(sheet.sales_invoice)
        .with_company(config.company_name.clone())
        .with_number_format(NumberFormat::new(config.grouping));

    let totals = session.totals();
    tracing::info!(
        rows = session.state().rows.len(),
        total_pieces = totals.total_pieces,
        grand_total = totals.grand_total,
        "invoice sheet totalled"
    );

    Ok(session.build_document(&meta))
}
