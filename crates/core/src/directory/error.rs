//! Directory error types.

use ledgermill_shared::AppError;
use thiserror::Error;

use super::types::{AccountType, SystemRole};

/// Errors that can occur while resolving accounts.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No account is mapped to the requested role.
    #[error("No account is mapped to role {0:?}")]
    RoleNotMapped(SystemRole),

    /// No account with the given code exists.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Two accounts claim the same system role.
    #[error("Duplicate mapping for role {0:?}")]
    DuplicateRole(SystemRole),

    /// The account mapped to a role has the wrong type.
    #[error("Account for role {role:?} must be {expected:?}, found {actual:?}")]
    WrongAccountType {
        /// The role being resolved.
        role: SystemRole,
        /// The type the role requires.
        expected: AccountType,
        /// The type actually configured.
        actual: AccountType,
    },
}

impl DirectoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::RoleNotMapped(_) => "ROLE_NOT_MAPPED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateRole(_) => "DUPLICATE_ROLE",
            Self::WrongAccountType { .. } => "WRONG_ACCOUNT_TYPE",
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            DirectoryError::RoleNotMapped(_)
            | DirectoryError::DuplicateRole(_)
            | DirectoryError::WrongAccountType { .. } => Self::BusinessRule(err.to_string()),
        }
    }
}
