//! Supplier bill payment orchestrator.
//!
//! Settling a bill clears the gross payable; withholding tax is
//! retained as a liability and only the net amount leaves the payment
//! account.

use chrono::{NaiveDate, Utc};
use ledgermill_core::directory::{AccountType, SystemRole};
use ledgermill_core::ledger::{
    DocumentRef, LineInput, PayeeRef, ReferenceType, VoucherDraft, VoucherSource,
};
use ledgermill_shared::types::{AccountId, PaymentVoucherId, SupplierId, SupplierInvoiceId};
use ledgermill_shared::RequestContext;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{BillStatus, PayeeType, PaymentStatus};
use crate::entities::{payment_vouchers, supplier_invoices};
use crate::orchestrators::OrchestratorError;
use crate::repositories::account::account_type_of;
use crate::repositories::voucher::VoucherRepository;
use crate::repositories::AccountRepository;

/// Input for paying a supplier bill.
#[derive(Debug, Clone)]
pub struct PayBillInput {
    /// The bill being settled.
    pub bill_id: SupplierInvoiceId,
    /// Date of payment.
    pub payment_date: NaiveDate,
    /// The asset account the payment draws on.
    pub payment_account: AccountId,
    /// Gross amount of the bill settled by this payment.
    pub amount: Decimal,
}

/// Drives supplier bill payment in one transaction.
#[derive(Debug, Clone)]
pub struct SupplierOrchestrator {
    db: DatabaseConnection,
}

impl SupplierOrchestrator {
    /// Creates a new supplier orchestrator.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pays part or all of a supplier bill.
    ///
    /// Withholding tax is carved out of the gross portion
    /// proportionally: the payable clears gross, the tax account keeps
    /// the withheld share, and the payment account gives up the net.
    /// The bill moves `Open` to `PartiallyPaid` to `Paid` as the paid
    /// amount accumulates.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for overpayment or a non-asset payment
    /// account, and `InvalidState` for a bill that is already paid.
    pub async fn pay_supplier_bill(
        &self,
        ctx: &RequestContext,
        input: PayBillInput,
    ) -> Result<supplier_invoices::Model, OrchestratorError> {
        if input.amount <= Decimal::ZERO {
            return Err(OrchestratorError::Validation(
                "Payment amount must be positive".into(),
            ));
        }

        let txn = self.db.begin().await?;

        let payment_type = account_type_of(&txn, ctx, input.payment_account).await?;
        if AccountType::from(payment_type) != AccountType::Asset {
            return Err(OrchestratorError::Validation(
                "Payment account must be an asset account".into(),
            ));
        }

        let bill = supplier_invoices::Entity::find_by_id(Uuid::from(input.bill_id))
            .filter(supplier_invoices::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| OrchestratorError::NotFound(format!("Bill {}", input.bill_id)))?;

        if bill.status == BillStatus::Paid {
            return Err(OrchestratorError::InvalidState(format!(
                "Bill {} is already paid",
                bill.bill_number
            )));
        }
        let outstanding = bill.amount - bill.amount_paid;
        if input.amount > outstanding {
            return Err(OrchestratorError::Validation(format!(
                "Payment {} exceeds outstanding balance {} on bill {}",
                input.amount, outstanding, bill.bill_number
            )));
        }

        // Withhold tax in proportion to the gross share being settled.
        let wht_portion = if bill.amount.is_zero() {
            Decimal::ZERO
        } else {
            (bill.wht_amount * input.amount / bill.amount).round_dp(2)
        };
        let net = input.amount - wht_portion;
        let supplier_id = SupplierId::from_uuid(bill.supplier_id);

        let now = Utc::now().into();
        let payment = payment_vouchers::ActiveModel {
            id: Set(PaymentVoucherId::new().into()),
            company_id: Set(ctx.company_id.into()),
            payee_type: Set(PayeeType::Supplier),
            payee_id: Set(bill.supplier_id),
            payment_date: Set(input.payment_date),
            payment_account_id: Set(input.payment_account.into()),
            amount: Set(input.amount),
            status: Set(PaymentStatus::Posted),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let payment = payment.insert(&txn).await?;

        let directory = AccountRepository::load_directory_in(&txn, ctx).await?;
        let payable = directory.resolve_role(SystemRole::AccountsPayable)?;

        let mut lines = vec![LineInput::debit(payable.id, input.amount)
            .with_payee(PayeeRef::Supplier(supplier_id))];
        if wht_portion > Decimal::ZERO {
            let wht = directory.resolve_role(SystemRole::WhtPayable)?;
            lines.push(
                LineInput::credit(wht.id, wht_portion).with_description("Withholding tax retained"),
            );
        }
        lines.push(LineInput::credit(input.payment_account, net));

        let draft = VoucherDraft {
            entry_date: input.payment_date,
            source: VoucherSource::SupplierBill,
            narration: format!("Payment for bill {}", bill.bill_number),
            reference: Some(DocumentRef {
                reference_type: ReferenceType::SupplierInvoice,
                reference_id: bill.id,
            }),
            lines,
        };
        VoucherRepository::post_voucher_in(&txn, ctx, draft).await?;

        let paid = bill.amount_paid + input.amount;
        let status = if paid >= bill.amount {
            BillStatus::Paid
        } else {
            BillStatus::PartiallyPaid
        };
        let mut active = bill.into_active_model();
        active.amount_paid = Set(paid);
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());
        let bill = active.update(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            company_id = %ctx.company_id,
            bill_id = %bill.id,
            payment_id = %payment.id,
            gross = %input.amount,
            withheld = %wht_portion,
            status = ?bill.status,
            "supplier bill payment recorded"
        );
        Ok(bill)
    }
}
