use serde::{Deserialize, Serialize};

use tallysheet_core::{Aggregate, DomainError};

use crate::document::{self, DocumentMeta, InvoiceDocument};
use crate::line_item::{Field, FieldValue, LineItemDraft, LineItemId, NegativeInput};
use crate::numfmt;
use crate::store::LineItemStore;
use crate::totals::{self, InvoiceTotals};

/// Rows plus the single global tax percentage.
///
/// Everything derived (totals, the printable document) is computed from this
/// value on demand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvoiceState {
    pub rows: LineItemStore,
    pub tax_percent: f64,
}

impl InvoiceState {
    pub fn totals(&self) -> InvoiceTotals {
        totals::recompute(&self.rows, self.tax_percent)
    }

    pub fn build_document(&self, meta: &DocumentMeta) -> InvoiceDocument {
        document::build(&self.rows, &self.totals(), meta)
    }
}

/// Worksheet session: applies UI commands to an [`InvoiceState`] and keeps
/// the totals of the latest full recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSession {
    state: InvoiceState,
    totals: InvoiceTotals,
    policy: NegativeInput,
    version: u64,
}

impl Default for InvoiceSession {
    fn default() -> Self {
        Self::new(NegativeInput::default())
    }
}

impl InvoiceSession {
    pub fn new(policy: NegativeInput) -> Self {
        let state = InvoiceState::default();
        Self {
            totals: state.totals(),
            state,
            policy,
            version: 0,
        }
    }

    pub fn state(&self) -> &InvoiceState {
        &self.state
    }

    /// Totals as of the last applied event.
    pub fn totals(&self) -> InvoiceTotals {
        self.totals
    }

    pub fn policy(&self) -> NegativeInput {
        self.policy
    }

    /// Print/export: render the current rows and totals.
    pub fn build_document(&self, meta: &DocumentMeta) -> InvoiceDocument {
        tracing::info!(
            rows = self.state.rows.len(),
            sales_invoice = meta.sales_invoice,
            "building invoice document"
        );
        document::build(&self.state.rows, &self.totals, meta)
    }
}

/// Command: AddRow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddRow {
    pub draft: LineItemDraft,
}

/// Command: RemoveRow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveRow {
    pub id: LineItemId,
}

/// Command: EditField. `raw` is the cell text as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditField {
    pub id: LineItemId,
    pub field: Field,
    pub raw: String,
}

/// Command: Clear. `confirmed` is the answer of the confirmation gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clear {
    pub confirmed: bool,
}

/// Command: SetTaxPercent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetTaxPercent {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceCommand {
    AddRow(AddRow),
    RemoveRow(RemoveRow),
    EditField(EditField),
    Clear(Clear),
    SetTaxPercent(SetTaxPercent),
}

/// Event: RowAppended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAppended {
    pub id: LineItemId,
    pub draft: LineItemDraft,
}

/// Event: RowRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRemoved {
    pub id: LineItemId,
}

/// Event: FieldEdited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEdited {
    pub id: LineItemId,
    pub value: FieldValue,
}

/// Event: RowsCleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowsCleared {
    pub removed: usize,
}

/// Event: TaxPercentChanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPercentChanged {
    pub tax_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceEvent {
    RowAppended(RowAppended),
    RowRemoved(RowRemoved),
    FieldEdited(FieldEdited),
    RowsCleared(RowsCleared),
    TaxPercentChanged(TaxPercentChanged),
}

impl InvoiceEvent {
    /// Stable event name.
    pub fn event_type(&self) -> &'static str {
        match self {
            InvoiceEvent::RowAppended(_) => "invoice.row.appended",
            InvoiceEvent::RowRemoved(_) => "invoice.row.removed",
            InvoiceEvent::FieldEdited(_) => "invoice.row.field_edited",
            InvoiceEvent::RowsCleared(_) => "invoice.rows.cleared",
            InvoiceEvent::TaxPercentChanged(_) => "invoice.tax_percent.changed",
        }
    }

    /// Row the event is about, if any.
    pub fn row_id(&self) -> Option<LineItemId> {
        match self {
            InvoiceEvent::RowAppended(e) => Some(e.id),
            InvoiceEvent::RowRemoved(e) => Some(e.id),
            InvoiceEvent::FieldEdited(e) => Some(e.id),
            InvoiceEvent::RowsCleared(_) | InvoiceEvent::TaxPercentChanged(_) => None,
        }
    }
}

impl Aggregate for InvoiceSession {
    type Command = InvoiceCommand;
    type Event = InvoiceEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InvoiceEvent::RowAppended(e) => {
                self.state.rows.insert(e.id, e.draft.clone());
            }
            InvoiceEvent::RowRemoved(e) => {
                self.state.rows.remove(e.id);
            }
            InvoiceEvent::FieldEdited(e) => {
                if let Some(row) = self.state.rows.get_mut(e.id) {
                    let field = e.value.field();
                    tracing::trace!(
                        row = %e.id,
                        %field,
                        affects_totals = field.is_numeric(),
                        "cell edited"
                    );
                    row.set(e.value.clone());
                }
            }
            InvoiceEvent::RowsCleared(_) => {
                self.state.rows.clear();
            }
            InvoiceEvent::TaxPercentChanged(e) => {
                self.state.tax_percent = e.tax_percent;
            }
        }

        // Full recompute after every event; totals are never patched.
        self.totals = self.state.totals();
        self.version += 1;

        tracing::debug!(
            event = event.event_type(),
            version = self.version,
            rows = self.state.rows.len(),
            subtotal = self.totals.subtotal,
            "invoice event applied"
        );
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InvoiceCommand::AddRow(cmd) => self.handle_add_row(cmd),
            InvoiceCommand::RemoveRow(cmd) => self.handle_remove_row(cmd),
            InvoiceCommand::EditField(cmd) => self.handle_edit_field(cmd),
            InvoiceCommand::Clear(cmd) => self.handle_clear(cmd),
            InvoiceCommand::SetTaxPercent(cmd) => self.handle_set_tax_percent(cmd),
        }
    }
}

impl InvoiceSession {
    fn handle_add_row(&self, cmd: &AddRow) -> Result<Vec<InvoiceEvent>, DomainError> {
        let draft = cmd.draft.clone().sanitized(self.policy)?;
        Ok(vec![InvoiceEvent::RowAppended(RowAppended {
            id: self.state.rows.next_id(),
            draft,
        })])
    }

    fn handle_remove_row(&self, cmd: &RemoveRow) -> Result<Vec<InvoiceEvent>, DomainError> {
        if !self.state.rows.contains(cmd.id) {
            return Ok(Vec::new());
        }
        Ok(vec![InvoiceEvent::RowRemoved(RowRemoved { id: cmd.id })])
    }

    fn handle_edit_field(&self, cmd: &EditField) -> Result<Vec<InvoiceEvent>, DomainError> {
        if !self.state.rows.contains(cmd.id) {
            return Ok(Vec::new());
        }
        let value = cmd.field.parse_value(&cmd.raw, self.policy)?;
        Ok(vec![InvoiceEvent::FieldEdited(FieldEdited { id: cmd.id, value })])
    }

    fn handle_clear(&self, cmd: &Clear) -> Result<Vec<InvoiceEvent>, DomainError> {
        if !cmd.confirmed {
            return Ok(Vec::new());
        }
        Ok(vec![InvoiceEvent::RowsCleared(RowsCleared {
            removed: self.state.rows.len(),
        })])
    }

    fn handle_set_tax_percent(
        &self,
        cmd: &SetTaxPercent,
    ) -> Result<Vec<InvoiceEvent>, DomainError> {
        let tax_percent = self.policy.apply("tax percent", numfmt::parse(&cmd.raw))?;
        Ok(vec![InvoiceEvent::TaxPercentChanged(TaxPercentChanged {
            tax_percent,
        })])
    }
}
