//! Opening balance orchestrator.
//!
//! Seeds a new company: account balances and opening stock in one
//! posting, balanced against the opening equity account.

use chrono::NaiveDate;
use ledgermill_core::directory::SystemRole;
use ledgermill_core::ledger::{LineInput, VoucherDraft, VoucherSource};
use ledgermill_core::valuation::MovementSource;
use ledgermill_shared::types::{AccountId, ItemId};
use ledgermill_shared::RequestContext;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::ItemKind;
use crate::entities::{inventory_items, journal_vouchers};
use crate::orchestrators::OrchestratorError;
use crate::repositories::voucher::VoucherRepository;
use crate::repositories::{AccountRepository, NewMovement, StockRepository};

/// Opening balance for one ledger account.
#[derive(Debug, Clone)]
pub struct AccountOpening {
    /// The account carrying the balance.
    pub account_id: AccountId,
    /// Debit balance (0 for credit-side accounts).
    pub debit: Decimal,
    /// Credit balance (0 for debit-side accounts).
    pub credit: Decimal,
}

/// Opening stock for one inventory item.
#[derive(Debug, Clone)]
pub struct StockOpening {
    /// The item on hand.
    pub item_id: ItemId,
    /// Quantity on hand; must be positive.
    pub quantity: Decimal,
    /// Cost per unit carried in.
    pub unit_cost: Decimal,
}

/// Drives opening balance posting in one transaction.
#[derive(Debug, Clone)]
pub struct OpeningOrchestrator {
    db: DatabaseConnection,
}

/// Input for posting a company's opening balances.
#[derive(Debug, Clone)]
pub struct OpeningBalanceInput {
    /// The date the balances are carried in as of.
    pub as_of: NaiveDate,
    /// Ledger account balances.
    pub accounts: Vec<AccountOpening>,
    /// Stock on hand with carried-in costs.
    pub stock: Vec<StockOpening>,
}

impl OpeningOrchestrator {
    /// Creates a new opening balance orchestrator.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a company's opening balances.
    ///
    /// Stock openings become both opening movements and debits to the
    /// matching inventory account (raw material or finished goods by
    /// item kind). Whatever the explicit balances leave unbalanced is
    /// absorbed by the opening equity account.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for empty input or non-positive stock
    /// quantities, `NotFound` for an account or item outside the
    /// company, and a directory error if a required role is not
    /// mapped.
    pub async fn post_opening_balances(
        &self,
        ctx: &RequestContext,
        input: OpeningBalanceInput,
    ) -> Result<journal_vouchers::Model, OrchestratorError> {
        if input.accounts.is_empty() && input.stock.is_empty() {
            return Err(OrchestratorError::Validation(
                "Opening balances are empty".into(),
            ));
        }
        for opening in &input.stock {
            if opening.quantity <= Decimal::ZERO {
                return Err(OrchestratorError::Validation(
                    "Opening stock quantity must be positive".into(),
                ));
            }
            if opening.unit_cost < Decimal::ZERO {
                return Err(OrchestratorError::Validation(
                    "Opening stock unit cost cannot be negative".into(),
                ));
            }
        }

        let txn = self.db.begin().await?;
        let directory = AccountRepository::load_directory_in(&txn, ctx).await?;

        // Explicit balances must land on this company's own accounts.
        let mut lines: Vec<LineInput> = Vec::with_capacity(input.accounts.len() + 3);
        for opening in &input.accounts {
            if directory.resolve_id(opening.account_id).is_err() {
                return Err(OrchestratorError::NotFound(format!(
                    "Account {}",
                    opening.account_id
                )));
            }
            lines.push(LineInput {
                account_id: opening.account_id,
                debit: opening.debit,
                credit: opening.credit,
                description: None,
                payee: None,
            });
        }

        // Inventory value per role, from item kind.
        let mut raw_value = Decimal::ZERO;
        let mut finished_value = Decimal::ZERO;
        for opening in &input.stock {
            let item = inventory_items::Entity::find_by_id(Uuid::from(opening.item_id))
                .filter(inventory_items::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    OrchestratorError::NotFound(format!("Item {}", opening.item_id))
                })?;
            let value = (opening.quantity * opening.unit_cost).round_dp(2);
            match item.kind {
                ItemKind::RawMaterial => raw_value += value,
                ItemKind::SemiFinished | ItemKind::Product => finished_value += value,
            }
        }
        if raw_value > Decimal::ZERO {
            let raw = directory.resolve_role(SystemRole::RawMaterialInventory)?;
            lines.push(LineInput::debit(raw.id, raw_value).with_description("Opening stock"));
        }
        if finished_value > Decimal::ZERO {
            let finished = directory.resolve_role(SystemRole::FinishedGoodsInventory)?;
            lines.push(
                LineInput::debit(finished.id, finished_value).with_description("Opening stock"),
            );
        }

        // Whatever remains lands on opening equity.
        let difference: Decimal = lines.iter().map(|l| l.debit - l.credit).sum();
        if !difference.is_zero() {
            let equity = directory.resolve_role(SystemRole::OpeningEquity)?;
            let line = if difference > Decimal::ZERO {
                LineInput::credit(equity.id, difference)
            } else {
                LineInput::debit(equity.id, -difference)
            };
            lines.push(line.with_description("Opening balance equity"));
        }

        let draft = VoucherDraft {
            entry_date: input.as_of,
            source: VoucherSource::OpeningBalance,
            narration: format!("Opening balances as of {}", input.as_of),
            reference: None,
            lines,
        };
        let voucher = VoucherRepository::post_voucher_in(&txn, ctx, draft).await?;

        for opening in &input.stock {
            StockRepository::append_movement_in(
                &txn,
                ctx,
                NewMovement {
                    item_id: opening.item_id,
                    movement_date: input.as_of,
                    source: MovementSource::OpeningStock,
                    quantity: opening.quantity,
                    unit_price: opening.unit_cost,
                    reference: None,
                },
            )
            .await?;
        }

        txn.commit().await?;
        tracing::info!(
            company_id = %ctx.company_id,
            voucher = %voucher.voucher_number,
            accounts = input.accounts.len(),
            stock_items = input.stock.len(),
            "opening balances posted"
        );
        Ok(voucher)
    }
}
