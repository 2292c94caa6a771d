//! Sales invoice orchestrator: issue and cancel.

use chrono::NaiveDate;
use chrono::Utc;
use ledgermill_core::directory::SystemRole;
use ledgermill_core::ledger::{
    DocumentRef, LineInput, PayeeRef, ReferenceType, VoucherDraft, VoucherSource,
};
use ledgermill_core::valuation::{MovementSource, Valuation};
use ledgermill_shared::types::{CustomerId, ItemId, SalesInvoiceId, VoucherId};
use ledgermill_shared::RequestContext;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::InvoiceStatus;
use crate::entities::{customers, journal_vouchers, sales_invoice_items, sales_invoices};
use crate::orchestrators::OrchestratorError;
use crate::repositories::voucher::VoucherRepository;
use crate::repositories::{AccountRepository, NewMovement, StockRepository};

const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// One line on a new sales invoice.
#[derive(Debug, Clone)]
pub struct InvoiceLineInput {
    /// The item sold.
    pub item_id: ItemId,
    /// Quantity sold; must be positive.
    pub quantity: Decimal,
    /// Selling price per unit.
    pub unit_price: Decimal,
}

/// Input for issuing a sales invoice.
#[derive(Debug, Clone)]
pub struct IssueInvoiceInput {
    /// The customer billed.
    pub customer_id: CustomerId,
    /// Invoice number, unique within the company.
    pub invoice_number: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Optional payment due date.
    pub due_date: Option<NaiveDate>,
    /// Invoice lines; must be non-empty.
    pub lines: Vec<InvoiceLineInput>,
    /// Discount amount off the subtotal.
    pub discount: Decimal,
    /// VAT rate as a percentage of the discounted subtotal, e.g. 11.
    pub vat_rate: Decimal,
}

/// Result of cancelling an invoice.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    /// The invoice, now cancelled.
    pub invoice: sales_invoices::Model,
    /// The reversal voucher that undid the original posting.
    pub reversal: journal_vouchers::Model,
}

/// Drives sales invoices end to end: document, voucher, and movements
/// in one transaction.
#[derive(Debug, Clone)]
pub struct SalesOrchestrator {
    db: DatabaseConnection,
}

impl SalesOrchestrator {
    /// Creates a new sales orchestrator.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issues a sales invoice.
    ///
    /// Persists the invoice with per-line unit costs captured from the
    /// current weighted averages, posts the revenue and cost voucher,
    /// and appends one outbound movement per line. Everything commits
    /// or nothing does.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` if an item's requested quantity,
    /// summed across all lines, exceeds the quantity on hand,
    /// `Validation` for bad amounts, or `NotFound` for an unknown
    /// customer or item.
    pub async fn issue_invoice(
        &self,
        ctx: &RequestContext,
        input: IssueInvoiceInput,
    ) -> Result<sales_invoices::Model, OrchestratorError> {
        validate_issue_input(&input)?;

        let txn = self.db.begin().await?;

        customers::Entity::find_by_id(Uuid::from(input.customer_id))
            .filter(customers::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                OrchestratorError::NotFound(format!("Customer {}", input.customer_id))
            })?;

        // Capture unit costs and check availability before writing anything.
        // Requests are accumulated per item, so repeated lines for one item
        // are checked against the same balance instead of each passing alone.
        let mut valuations: HashMap<ItemId, Valuation> = HashMap::new();
        let mut requested: HashMap<ItemId, Decimal> = HashMap::new();
        let mut costed_lines = Vec::with_capacity(input.lines.len());
        let mut subtotal = Decimal::ZERO;
        let mut total_cogs = Decimal::ZERO;
        for line in &input.lines {
            let valuation = match valuations.get(&line.item_id) {
                Some(valuation) => *valuation,
                None => {
                    let valuation =
                        StockRepository::valuate_item_in(&txn, ctx, line.item_id).await?;
                    valuations.insert(line.item_id, valuation);
                    valuation
                }
            };
            let item_requested = requested.entry(line.item_id).or_insert(Decimal::ZERO);
            *item_requested += line.quantity;
            if valuation.quantity_on_hand < *item_requested {
                return Err(OrchestratorError::InsufficientStock {
                    item_id: line.item_id.into(),
                    requested: *item_requested,
                    available: valuation.quantity_on_hand,
                });
            }
            let line_total = (line.quantity * line.unit_price).round_dp(2);
            let line_cogs = (line.quantity * valuation.average_unit_cost).round_dp(2);
            subtotal += line_total;
            total_cogs += line_cogs;
            costed_lines.push((line, line_total, valuation.average_unit_cost));
        }

        if input.discount > subtotal {
            return Err(OrchestratorError::Validation(
                "Discount exceeds invoice subtotal".into(),
            ));
        }
        let vat_amount = ((subtotal - input.discount) * input.vat_rate / PERCENT).round_dp(2);
        let total = subtotal - input.discount + vat_amount;

        let now = Utc::now().into();
        let invoice_id = SalesInvoiceId::new();
        let invoice = sales_invoices::ActiveModel {
            id: Set(invoice_id.into()),
            company_id: Set(ctx.company_id.into()),
            customer_id: Set(input.customer_id.into()),
            invoice_number: Set(input.invoice_number.clone()),
            invoice_date: Set(input.invoice_date),
            due_date: Set(input.due_date),
            subtotal: Set(subtotal),
            discount: Set(input.discount),
            vat_amount: Set(vat_amount),
            total: Set(total),
            total_cogs: Set(total_cogs),
            amount_paid: Set(Decimal::ZERO),
            status: Set(InvoiceStatus::Issued),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let invoice = invoice.insert(&txn).await?;

        for (line, line_total, unit_cost) in &costed_lines {
            let item = sales_invoice_items::ActiveModel {
                id: Set(Uuid::now_v7()),
                invoice_id: Set(invoice.id),
                item_id: Set(line.item_id.into()),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                line_total: Set(*line_total),
                unit_cost: Set(*unit_cost),
            };
            item.insert(&txn).await?;
        }

        let reference = DocumentRef {
            reference_type: ReferenceType::SalesInvoice,
            reference_id: invoice.id,
        };
        let voucher = build_issue_voucher(
            &txn,
            ctx,
            &input,
            reference,
            subtotal,
            vat_amount,
            total,
            total_cogs,
        )
        .await?;
        VoucherRepository::post_voucher_in(&txn, ctx, voucher).await?;

        for (line, _, _) in &costed_lines {
            StockRepository::append_movement_in(
                &txn,
                ctx,
                NewMovement {
                    item_id: line.item_id,
                    movement_date: input.invoice_date,
                    source: MovementSource::Sale,
                    quantity: -line.quantity,
                    unit_price: Decimal::ZERO,
                    reference: Some(reference),
                },
            )
            .await?;
        }

        txn.commit().await?;
        tracing::info!(
            company_id = %ctx.company_id,
            invoice_id = %invoice.id,
            number = %invoice.invoice_number,
            total = %invoice.total,
            "sales invoice issued"
        );
        Ok(invoice)
    }

    /// Cancels an issued invoice.
    ///
    /// Posts a reversal of the original voucher and returns each line's
    /// quantity to stock at the unit cost captured at issue time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the invoice is currently issued.
    pub async fn cancel_invoice(
        &self,
        ctx: &RequestContext,
        invoice_id: SalesInvoiceId,
    ) -> Result<CancelOutcome, OrchestratorError> {
        let txn = self.db.begin().await?;

        let invoice = sales_invoices::Entity::find_by_id(Uuid::from(invoice_id))
            .filter(sales_invoices::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| OrchestratorError::NotFound(format!("Invoice {invoice_id}")))?;

        if invoice.status != InvoiceStatus::Issued {
            return Err(OrchestratorError::InvalidState(format!(
                "Invoice {} is {:?}, only issued invoices can be cancelled",
                invoice.invoice_number, invoice.status
            )));
        }

        let original = find_invoice_voucher(&txn, ctx, invoice.id).await?;
        let reversal = VoucherRepository::reverse_in(
            &txn,
            ctx,
            VoucherId::from_uuid(original.id),
            Utc::now().date_naive(),
        )
        .await?;

        let items = sales_invoice_items::Entity::find()
            .filter(sales_invoice_items::Column::InvoiceId.eq(invoice.id))
            .all(&txn)
            .await?;
        for item in &items {
            StockRepository::append_movement_in(
                &txn,
                ctx,
                NewMovement {
                    item_id: ItemId::from_uuid(item.item_id),
                    movement_date: Utc::now().date_naive(),
                    source: MovementSource::SalesReturn,
                    quantity: item.quantity,
                    unit_price: item.unit_cost,
                    reference: Some(DocumentRef {
                        reference_type: ReferenceType::SalesInvoice,
                        reference_id: invoice.id,
                    }),
                },
            )
            .await?;
        }

        let mut active = invoice.into_active_model();
        active.status = Set(InvoiceStatus::Cancelled);
        active.updated_at = Set(Utc::now().into());
        let invoice = active.update(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            company_id = %ctx.company_id,
            invoice_id = %invoice.id,
            reversal = %reversal.voucher_number,
            "sales invoice cancelled"
        );
        Ok(CancelOutcome { invoice, reversal })
    }
}

fn validate_issue_input(input: &IssueInvoiceInput) -> Result<(), OrchestratorError> {
    if input.lines.is_empty() {
        return Err(OrchestratorError::Validation(
            "Invoice must have at least one line".into(),
        ));
    }
    if input.discount < Decimal::ZERO {
        return Err(OrchestratorError::Validation(
            "Discount cannot be negative".into(),
        ));
    }
    if input.vat_rate < Decimal::ZERO {
        return Err(OrchestratorError::Validation(
            "VAT rate cannot be negative".into(),
        ));
    }
    for line in &input.lines {
        if line.quantity <= Decimal::ZERO {
            return Err(OrchestratorError::Validation(
                "Line quantity must be positive".into(),
            ));
        }
        if line.unit_price < Decimal::ZERO {
            return Err(OrchestratorError::Validation(
                "Unit price cannot be negative".into(),
            ));
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn build_issue_voucher(
    txn: &DatabaseTransaction,
    ctx: &RequestContext,
    input: &IssueInvoiceInput,
    reference: DocumentRef,
    subtotal: Decimal,
    vat_amount: Decimal,
    total: Decimal,
    total_cogs: Decimal,
) -> Result<VoucherDraft, OrchestratorError> {
    let directory = AccountRepository::load_directory_in(txn, ctx).await?;
    let receivable = directory.resolve_role(SystemRole::AccountsReceivable)?;
    let revenue = directory.resolve_role(SystemRole::SalesRevenue)?;

    let mut lines = vec![LineInput::debit(receivable.id, total)
        .with_payee(PayeeRef::Customer(input.customer_id))];
    if input.discount > Decimal::ZERO {
        let discount = directory.resolve_role(SystemRole::SalesDiscount)?;
        lines.push(LineInput::debit(discount.id, input.discount));
    }
    lines.push(LineInput::credit(revenue.id, subtotal));
    if vat_amount > Decimal::ZERO {
        let vat = directory.resolve_role(SystemRole::VatPayable)?;
        lines.push(LineInput::credit(vat.id, vat_amount));
    }
    if total_cogs > Decimal::ZERO {
        let cogs = directory.resolve_role(SystemRole::CostOfGoodsSold)?;
        let finished = directory.resolve_role(SystemRole::FinishedGoodsInventory)?;
        lines.push(LineInput::debit(cogs.id, total_cogs));
        lines.push(LineInput::credit(finished.id, total_cogs));
    }

    Ok(VoucherDraft {
        entry_date: input.invoice_date,
        source: VoucherSource::SalesInvoice,
        narration: format!("Sales invoice {}", input.invoice_number),
        reference: Some(reference),
        lines,
    })
}

async fn find_invoice_voucher(
    txn: &DatabaseTransaction,
    ctx: &RequestContext,
    invoice_id: Uuid,
) -> Result<journal_vouchers::Model, OrchestratorError> {
    use crate::entities::sea_orm_active_enums as db_enums;

    journal_vouchers::Entity::find()
        .filter(journal_vouchers::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
        .filter(journal_vouchers::Column::ReferenceId.eq(invoice_id))
        .filter(journal_vouchers::Column::Source.eq(db_enums::VoucherSource::SalesInvoice))
        .one(txn)
        .await?
        .ok_or_else(|| {
            OrchestratorError::NotFound(format!("Voucher for invoice {invoice_id}"))
        })
}
