//! Customer payment orchestrator.

use chrono::{NaiveDate, Utc};
use ledgermill_core::directory::{AccountType, SystemRole};
use ledgermill_core::ledger::{
    DocumentRef, LineInput, PayeeRef, ReferenceType, VoucherDraft, VoucherSource,
};
use ledgermill_shared::types::{AccountId, CustomerId, PaymentVoucherId, SalesInvoiceId};
use ledgermill_shared::RequestContext;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{InvoiceStatus, PayeeType, PaymentStatus};
use crate::entities::{payment_voucher_lines, payment_vouchers, sales_invoices};
use crate::orchestrators::OrchestratorError;
use crate::repositories::account::account_type_of;
use crate::repositories::voucher::VoucherRepository;
use crate::repositories::AccountRepository;

/// One allocation of a payment against an invoice.
#[derive(Debug, Clone)]
pub struct AllocationInput {
    /// The invoice the money settles.
    pub invoice_id: SalesInvoiceId,
    /// The amount allocated; must be positive.
    pub amount: Decimal,
}

/// Input for recording a customer payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// The paying customer.
    pub customer_id: CustomerId,
    /// Date the money arrived.
    pub payment_date: NaiveDate,
    /// The asset account the money landed in.
    pub deposit_account: AccountId,
    /// Total amount received.
    pub amount: Decimal,
    /// How the amount splits across invoices; must sum to `amount`.
    pub allocations: Vec<AllocationInput>,
}

/// Drives customer payment receipt and allocation in one transaction.
#[derive(Debug, Clone)]
pub struct PaymentOrchestrator {
    db: DatabaseConnection,
}

impl PaymentOrchestrator {
    /// Creates a new payment orchestrator.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a customer payment and allocates it against invoices.
    ///
    /// Each allocated invoice is locked, checked for overpayment, and
    /// its paid amount bumped. The ledger effect is one voucher
    /// debiting the deposit account and crediting receivables.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when allocations do not sum to the amount
    /// or an allocation exceeds the invoice's outstanding balance, and
    /// `InvalidState` when an allocated invoice is not issued.
    pub async fn allocate_payment(
        &self,
        ctx: &RequestContext,
        input: PaymentInput,
    ) -> Result<payment_vouchers::Model, OrchestratorError> {
        validate_payment_input(&input)?;

        let txn = self.db.begin().await?;

        let deposit_type = account_type_of(&txn, ctx, input.deposit_account).await?;
        if AccountType::from(deposit_type) != AccountType::Asset {
            return Err(OrchestratorError::Validation(
                "Deposit account must be an asset account".into(),
            ));
        }

        for allocation in &input.allocations {
            let invoice = sales_invoices::Entity::find_by_id(Uuid::from(allocation.invoice_id))
                .filter(sales_invoices::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
                .filter(sales_invoices::Column::CustomerId.eq(Uuid::from(input.customer_id)))
                .lock_exclusive()
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    OrchestratorError::NotFound(format!("Invoice {}", allocation.invoice_id))
                })?;

            if invoice.status != InvoiceStatus::Issued {
                return Err(OrchestratorError::InvalidState(format!(
                    "Invoice {} is {:?}, only issued invoices accept payments",
                    invoice.invoice_number, invoice.status
                )));
            }
            let outstanding = invoice.total - invoice.amount_paid;
            if allocation.amount > outstanding {
                return Err(OrchestratorError::Validation(format!(
                    "Allocation {} exceeds outstanding balance {} on invoice {}",
                    allocation.amount, outstanding, invoice.invoice_number
                )));
            }

            let paid = invoice.amount_paid + allocation.amount;
            let mut active = invoice.into_active_model();
            active.amount_paid = Set(paid);
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await?;
        }

        let now = Utc::now().into();
        let payment_id = PaymentVoucherId::new();
        let payment = payment_vouchers::ActiveModel {
            id: Set(payment_id.into()),
            company_id: Set(ctx.company_id.into()),
            payee_type: Set(PayeeType::Customer),
            payee_id: Set(input.customer_id.into()),
            payment_date: Set(input.payment_date),
            payment_account_id: Set(input.deposit_account.into()),
            amount: Set(input.amount),
            status: Set(PaymentStatus::Posted),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let payment = payment.insert(&txn).await?;

        for allocation in &input.allocations {
            let line = payment_voucher_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                payment_id: Set(payment.id),
                invoice_id: Set(allocation.invoice_id.into()),
                allocated: Set(allocation.amount),
            };
            line.insert(&txn).await?;
        }

        let directory = AccountRepository::load_directory_in(&txn, ctx).await?;
        let receivable = directory.resolve_role(SystemRole::AccountsReceivable)?;
        let draft = VoucherDraft {
            entry_date: input.payment_date,
            source: VoucherSource::PaymentVoucher,
            narration: format!("Customer payment {}", input.amount),
            reference: Some(DocumentRef {
                reference_type: ReferenceType::PaymentVoucher,
                reference_id: payment.id,
            }),
            lines: vec![
                LineInput::debit(input.deposit_account, input.amount),
                LineInput::credit(receivable.id, input.amount)
                    .with_payee(PayeeRef::Customer(input.customer_id)),
            ],
        };
        VoucherRepository::post_voucher_in(&txn, ctx, draft).await?;

        txn.commit().await?;
        tracing::info!(
            company_id = %ctx.company_id,
            payment_id = %payment.id,
            amount = %payment.amount,
            allocations = input.allocations.len(),
            "customer payment allocated"
        );
        Ok(payment)
    }
}

fn validate_payment_input(input: &PaymentInput) -> Result<(), OrchestratorError> {
    if input.amount <= Decimal::ZERO {
        return Err(OrchestratorError::Validation(
            "Payment amount must be positive".into(),
        ));
    }
    if input.allocations.is_empty() {
        return Err(OrchestratorError::Validation(
            "Payment must allocate to at least one invoice".into(),
        ));
    }
    let mut allocated = Decimal::ZERO;
    for allocation in &input.allocations {
        if allocation.amount <= Decimal::ZERO {
            return Err(OrchestratorError::Validation(
                "Allocation amounts must be positive".into(),
            ));
        }
        allocated += allocation.amount;
    }
    if allocated != input.amount {
        return Err(OrchestratorError::Validation(format!(
            "Allocations sum to {allocated}, payment amount is {}",
            input.amount
        )));
    }
    Ok(())
}
