//! Voucher repository: posting, numbering, workflow, and reversal.
//!
//! All multi-row writes happen inside one database transaction. The
//! voucher number comes from a per-(company, prefix, year) sequence row
//! locked `FOR UPDATE`, so concurrent postings serialize on the row
//! instead of racing a `max + 1` scan.

use chrono::{Datelike, NaiveDate, Utc};
use ledgermill_core::ledger::{
    build_reversal, validate_lines, LedgerError, LineInput, PayeeRef, PostedLine, VoucherDraft,
    VoucherIntent, VoucherNumber, VoucherSource, VoucherStatus, VoucherWorkflow,
    TransitionOutcome,
};
use ledgermill_shared::types::{CustomerId, SupplierId, VoucherId};
use ledgermill_shared::{AppError, RequestContext};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums as db_enums;
use crate::entities::{journal_voucher_lines, journal_vouchers, voucher_sequences};

/// Error types for voucher operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Voucher not found.
    #[error("Voucher not found: {0}")]
    NotFound(Uuid),

    /// Core ledger rule violation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The stored intent payload could not be decoded.
    #[error("Stored voucher intent is malformed: {0}")]
    IntentDecode(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PostingError> for AppError {
    fn from(err: PostingError) -> Self {
        match err {
            PostingError::NotFound(id) => Self::NotFound(format!("Voucher {id}")),
            PostingError::Ledger(e) => e.into(),
            PostingError::IntentDecode(e) => Self::Internal(e.to_string()),
            PostingError::Database(e) => Self::Persistence(e.to_string()),
        }
    }
}

/// A voucher header with its lines.
#[derive(Debug, Clone)]
pub struct VoucherWithLines {
    /// The header row.
    pub voucher: journal_vouchers::Model,
    /// Lines ordered by ordinal.
    pub lines: Vec<journal_voucher_lines::Model>,
}

/// Voucher repository.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    db: DatabaseConnection,
}

impl VoucherRepository {
    /// Creates a new voucher repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and posts a voucher in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns a ledger error for invalid drafts, or a database error.
    pub async fn post_voucher(
        &self,
        ctx: &RequestContext,
        draft: VoucherDraft,
    ) -> Result<journal_vouchers::Model, PostingError> {
        let txn = self.db.begin().await?;
        let voucher = Self::post_voucher_in(&txn, ctx, draft).await?;
        txn.commit().await?;
        Ok(voucher)
    }

    /// Validates and posts a voucher on a caller-supplied transaction.
    ///
    /// Header and lines are inserted together; the caller decides when to
    /// commit, so a failing sibling operation rolls the posting back too.
    ///
    /// # Errors
    ///
    /// Returns a ledger error for invalid drafts, or a database error.
    pub async fn post_voucher_in(
        txn: &DatabaseTransaction,
        ctx: &RequestContext,
        draft: VoucherDraft,
    ) -> Result<journal_vouchers::Model, PostingError> {
        let totals = validate_lines(&draft.lines)?;
        let number =
            next_voucher_number(txn, ctx, draft.source, draft.entry_date.year()).await?;

        let now = Utc::now().into();
        let voucher_id = VoucherId::new();
        let header = journal_vouchers::ActiveModel {
            id: Set(voucher_id.into()),
            company_id: Set(ctx.company_id.into()),
            voucher_number: Set(number.to_string()),
            entry_date: Set(draft.entry_date),
            source: Set(draft.source.into()),
            reference_id: Set(draft.reference.map(|r| r.reference_id)),
            reference_type: Set(draft.reference.map(|r| r.reference_type.into())),
            narration: Set(draft.narration),
            total_debits: Set(totals.debits),
            total_credits: Set(totals.credits),
            status: Set(db_enums::VoucherStatus::Posted),
            intent: Set(None),
            created_by: Set(ctx.user_id.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let voucher = header.insert(txn).await?;

        insert_lines(txn, ctx, voucher_id.into(), &draft.lines).await?;

        tracing::info!(
            company_id = %ctx.company_id,
            voucher_id = %voucher.id,
            number = %voucher.voucher_number,
            "voucher posted"
        );
        Ok(voucher)
    }

    /// Creates a lines-less draft voucher carrying a typed intent.
    ///
    /// Manual journal entries start here and materialize their lines on
    /// approval posting.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub async fn create_draft(
        &self,
        ctx: &RequestContext,
        entry_date: NaiveDate,
        narration: String,
        intent: VoucherIntent,
    ) -> Result<journal_vouchers::Model, PostingError> {
        let txn = self.db.begin().await?;
        let number = next_voucher_number(
            &txn,
            ctx,
            VoucherSource::ManualJournal,
            entry_date.year(),
        )
        .await?;

        let now = Utc::now().into();
        let header = journal_vouchers::ActiveModel {
            id: Set(VoucherId::new().into()),
            company_id: Set(ctx.company_id.into()),
            voucher_number: Set(number.to_string()),
            entry_date: Set(entry_date),
            source: Set(db_enums::VoucherSource::ManualJournal),
            reference_id: Set(None),
            reference_type: Set(None),
            narration: Set(narration),
            total_debits: Set(rust_decimal::Decimal::ZERO),
            total_credits: Set(rust_decimal::Decimal::ZERO),
            status: Set(db_enums::VoucherStatus::Draft),
            intent: Set(Some(serde_json::to_value(&intent)?)),
            created_by: Set(ctx.user_id.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let voucher = header.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            company_id = %ctx.company_id,
            voucher_id = %voucher.id,
            number = %voucher.voucher_number,
            "draft voucher created"
        );
        Ok(voucher)
    }

    /// Transitions a voucher to a target status.
    ///
    /// Posting a draft materializes lines from its stored intent and
    /// re-validates balance. Approval is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for illegal moves, `MissingIntent` for a
    /// draft with no payload, or a database error.
    pub async fn transition(
        &self,
        ctx: &RequestContext,
        voucher_id: VoucherId,
        target: VoucherStatus,
    ) -> Result<TransitionOutcome, PostingError> {
        let txn = self.db.begin().await?;
        let voucher = find_locked(&txn, ctx, voucher_id).await?;
        let current = VoucherStatus::from(voucher.status);

        let outcome = match target {
            VoucherStatus::Posted => {
                let next = VoucherWorkflow::post(current)?;
                let intent: VoucherIntent = voucher
                    .intent
                    .clone()
                    .ok_or(LedgerError::MissingIntent)
                    .map(serde_json::from_value)??;

                let lines = intent.materialize();
                let totals = validate_lines(&lines)?;
                insert_lines(&txn, ctx, voucher.id, &lines).await?;

                let mut active: journal_vouchers::ActiveModel = voucher.into();
                active.status = Set(next.into());
                active.total_debits = Set(totals.debits);
                active.total_credits = Set(totals.credits);
                // The intent is consumed: the lines are now the record.
                active.intent = Set(None);
                active.updated_at = Set(Utc::now().into());
                active.update(&txn).await?;
                TransitionOutcome::Applied(next)
            }
            VoucherStatus::Approved => {
                let outcome = VoucherWorkflow::approve(current)?;
                if let TransitionOutcome::Applied(next) = outcome {
                    let mut active: journal_vouchers::ActiveModel = voucher.into();
                    active.status = Set(next.into());
                    active.updated_at = Set(Utc::now().into());
                    active.update(&txn).await?;
                }
                outcome
            }
            VoucherStatus::Rejected => {
                let next = VoucherWorkflow::reject(current)?;
                let mut active: journal_vouchers::ActiveModel = voucher.into();
                active.status = Set(next.into());
                active.updated_at = Set(Utc::now().into());
                active.update(&txn).await?;
                TransitionOutcome::Applied(next)
            }
            VoucherStatus::Draft => {
                return Err(LedgerError::InvalidTransition {
                    from: current,
                    to: VoucherStatus::Draft,
                }
                .into());
            }
        };
        txn.commit().await?;

        tracing::info!(
            company_id = %ctx.company_id,
            voucher_id = %voucher_id,
            from = ?current,
            to = ?target,
            "voucher transition"
        );
        Ok(outcome)
    }

    /// Reverses a posted voucher by posting a mirror-image voucher.
    ///
    /// The original is never mutated. A voucher can be reversed once.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyReversed` on a second attempt, `InvalidTransition`
    /// for drafts, or a database error.
    pub async fn reverse(
        &self,
        ctx: &RequestContext,
        original_id: VoucherId,
        reversal_date: NaiveDate,
    ) -> Result<journal_vouchers::Model, PostingError> {
        let txn = self.db.begin().await?;
        let reversal = Self::reverse_in(&txn, ctx, original_id, reversal_date).await?;
        txn.commit().await?;
        Ok(reversal)
    }

    /// Reversal on a caller-supplied transaction.
    ///
    /// # Errors
    ///
    /// Same as [`Self::reverse`].
    pub async fn reverse_in(
        txn: &DatabaseTransaction,
        ctx: &RequestContext,
        original_id: VoucherId,
        reversal_date: NaiveDate,
    ) -> Result<journal_vouchers::Model, PostingError> {
        let original = find_locked(txn, ctx, original_id).await?;

        let status = VoucherStatus::from(original.status);
        if !status.lines_immutable() {
            return Err(LedgerError::InvalidTransition {
                from: status,
                to: VoucherStatus::Posted,
            }
            .into());
        }

        let existing = journal_vouchers::Entity::find()
            .filter(journal_vouchers::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .filter(journal_vouchers::Column::ReferenceId.eq(Uuid::from(original_id)))
            .filter(journal_vouchers::Column::Source.eq(db_enums::VoucherSource::Reversal))
            .one(txn)
            .await?;
        if existing.is_some() {
            return Err(LedgerError::AlreadyReversed.into());
        }

        let lines = journal_voucher_lines::Entity::find()
            .filter(journal_voucher_lines::Column::VoucherId.eq(Uuid::from(original_id)))
            .order_by_asc(journal_voucher_lines::Column::LineOrdinal)
            .all(txn)
            .await?;
        let posted: Vec<PostedLine> = lines.iter().map(to_posted_line).collect();

        let draft = build_reversal(
            original_id,
            &original.voucher_number,
            reversal_date,
            &posted,
        );
        Self::post_voucher_in(txn, ctx, draft).await
    }

    /// Fetches a voucher with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent in the tenant.
    pub async fn get_voucher(
        &self,
        ctx: &RequestContext,
        voucher_id: VoucherId,
    ) -> Result<VoucherWithLines, PostingError> {
        let voucher = journal_vouchers::Entity::find_by_id(Uuid::from(voucher_id))
            .filter(journal_vouchers::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .one(&self.db)
            .await?
            .ok_or(PostingError::NotFound(voucher_id.into()))?;

        let lines = journal_voucher_lines::Entity::find()
            .filter(journal_voucher_lines::Column::VoucherId.eq(Uuid::from(voucher_id)))
            .order_by_asc(journal_voucher_lines::Column::LineOrdinal)
            .all(&self.db)
            .await?;

        Ok(VoucherWithLines { voucher, lines })
    }

    /// Deletes a voucher if its status allows it.
    ///
    /// Drafts are deletable; posted vouchers never are.
    ///
    /// # Errors
    ///
    /// Returns `NotDeletable` otherwise.
    pub async fn delete_voucher(
        &self,
        ctx: &RequestContext,
        voucher_id: VoucherId,
    ) -> Result<(), PostingError> {
        let txn = self.db.begin().await?;
        let voucher = find_locked(&txn, ctx, voucher_id).await?;

        let has_lines = journal_voucher_lines::Entity::find()
            .filter(journal_voucher_lines::Column::VoucherId.eq(Uuid::from(voucher_id)))
            .limit(1)
            .one(&txn)
            .await?
            .is_some();

        VoucherWorkflow::can_delete(voucher.status.into(), has_lines)?;

        journal_vouchers::Entity::delete_by_id(Uuid::from(voucher_id))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(company_id = %ctx.company_id, voucher_id = %voucher_id, "draft voucher deleted");
        Ok(())
    }
}

/// Allocates the next voucher number from the locked sequence row.
///
/// The row is locked `FOR UPDATE` for the rest of the transaction, so
/// concurrent allocations for the same (company, prefix, year) serialize.
///
/// # Errors
///
/// Returns a database error if the lock or update fails.
pub async fn next_voucher_number(
    txn: &DatabaseTransaction,
    ctx: &RequestContext,
    source: VoucherSource,
    year: i32,
) -> Result<VoucherNumber, PostingError> {
    let prefix = source.number_prefix();

    let row = voucher_sequences::Entity::find()
        .filter(voucher_sequences::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
        .filter(voucher_sequences::Column::Prefix.eq(prefix))
        .filter(voucher_sequences::Column::Year.eq(year))
        .lock_exclusive()
        .one(txn)
        .await?;

    let number = match row {
        Some(row) => {
            let allocated = row.next_number;
            let mut active: voucher_sequences::ActiveModel = row.into();
            active.next_number = Set(allocated + 1);
            active.update(txn).await?;
            allocated
        }
        None => {
            let fresh = voucher_sequences::ActiveModel {
                id: Set(Uuid::now_v7()),
                company_id: Set(ctx.company_id.into()),
                prefix: Set(prefix.to_owned()),
                year: Set(year),
                next_number: Set(2),
            };
            fresh.insert(txn).await?;
            1
        }
    };

    Ok(VoucherNumber::new(prefix, year, number))
}

async fn find_locked(
    txn: &DatabaseTransaction,
    ctx: &RequestContext,
    voucher_id: VoucherId,
) -> Result<journal_vouchers::Model, PostingError> {
    journal_vouchers::Entity::find_by_id(Uuid::from(voucher_id))
        .filter(journal_vouchers::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or(PostingError::NotFound(voucher_id.into()))
}

async fn insert_lines<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    voucher_id: Uuid,
    lines: &[LineInput],
) -> Result<(), PostingError> {
    let now = Utc::now().into();
    for (ordinal, line) in lines.iter().enumerate() {
        let (payee_type, payee_id) = match line.payee {
            Some(PayeeRef::Customer(id)) => (Some(db_enums::PayeeType::Customer), Some(id.into())),
            Some(PayeeRef::Supplier(id)) => (Some(db_enums::PayeeType::Supplier), Some(id.into())),
            None => (None, None),
        };

        let row = journal_voucher_lines::ActiveModel {
            id: Set(Uuid::now_v7()),
            voucher_id: Set(voucher_id),
            company_id: Set(ctx.company_id.into()),
            line_ordinal: Set(i32::try_from(ordinal).unwrap_or(i32::MAX)),
            account_id: Set(line.account_id.into()),
            debit: Set(line.debit),
            credit: Set(line.credit),
            description: Set(line.description.clone()),
            payee_type: Set(payee_type),
            payee_id: Set(payee_id),
            created_at: Set(now),
        };
        row.insert(conn).await?;
    }
    Ok(())
}

fn to_posted_line(line: &journal_voucher_lines::Model) -> PostedLine {
    let payee = match (line.payee_type, line.payee_id) {
        (Some(db_enums::PayeeType::Customer), Some(id)) => {
            Some(PayeeRef::Customer(CustomerId::from_uuid(id)))
        }
        (Some(db_enums::PayeeType::Supplier), Some(id)) => {
            Some(PayeeRef::Supplier(SupplierId::from_uuid(id)))
        }
        _ => None,
    };

    PostedLine {
        account_id: ledgermill_shared::types::AccountId::from_uuid(line.account_id),
        debit: line.debit,
        credit: line.credit,
        description: line.description.clone(),
        payee,
    }
}
