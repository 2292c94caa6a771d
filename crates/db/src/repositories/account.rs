//! Account repository for chart-of-accounts access.

use chrono::Utc;
use ledgermill_core::directory::{AccountRef, ChartDirectory, DirectoryError, SystemRole};
use ledgermill_shared::types::AccountId;
use ledgermill_shared::{AppError, RequestContext};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::chart_of_accounts;
use crate::entities::sea_orm_active_enums::{AccountType, SystemRoleDb};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Directory construction or lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(id) => Self::NotFound(format!("Account {id}")),
            AccountError::Directory(e) => e.into(),
            AccountError::Database(e) => Self::Persistence(e.to_string()),
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code, unique within the company.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    pub account_type: ledgermill_core::directory::AccountType,
    /// Optional well-known logical role.
    pub system_role: Option<SystemRole>,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (duplicate code or role).
    pub async fn create_account(
        &self,
        ctx: &RequestContext,
        input: CreateAccountInput,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        let now = Utc::now().into();
        let account = chart_of_accounts::ActiveModel {
            id: Set(AccountId::new().into()),
            company_id: Set(ctx.company_id.into()),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(input.account_type.into()),
            system_role: Set(input.system_role.map(SystemRoleDb::from)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = account.insert(&self.db).await?;
        tracing::debug!(account_id = %model.id, code = %model.code, "account created");
        Ok(model)
    }

    /// Builds the company's role directory from its active accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if a role is mapped twice or the query fails.
    pub async fn load_directory(
        &self,
        ctx: &RequestContext,
    ) -> Result<ChartDirectory, AccountError> {
        Self::load_directory_in(&self.db, ctx).await
    }

    /// Builds the directory on a caller-supplied connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a role is mapped twice or the query fails.
    pub async fn load_directory_in<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
    ) -> Result<ChartDirectory, AccountError> {
        let rows = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .filter(chart_of_accounts::Column::IsActive.eq(true))
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(conn)
            .await?;

        let accounts = rows.into_iter().map(to_account_ref).collect();
        Ok(ChartDirectory::new(accounts)?)
    }

    /// Fetches an account by id within the tenant.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent.
    pub async fn get_account(
        &self,
        ctx: &RequestContext,
        account_id: AccountId,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        chart_of_accounts::Entity::find_by_id(Uuid::from(account_id))
            .filter(chart_of_accounts::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(account_id.into()))
    }
}

fn to_account_ref(model: chart_of_accounts::Model) -> AccountRef {
    AccountRef {
        id: AccountId::from_uuid(model.id),
        code: model.code,
        name: model.name,
        account_type: model.account_type.into(),
        role: model.system_role.map(SystemRole::from),
    }
}

/// Fetches the type of an account by id, scoped to the tenant.
///
/// # Errors
///
/// Returns `NotFound` if the account does not exist in the company.
pub async fn account_type_of<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    account_id: AccountId,
) -> Result<AccountType, AccountError> {
    let account = chart_of_accounts::Entity::find_by_id(Uuid::from(account_id))
        .filter(chart_of_accounts::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
        .one(conn)
        .await?
        .ok_or(AccountError::NotFound(account_id.into()))?;
    Ok(account.account_type)
}
