//! Chart directory lookup.

use std::collections::HashMap;

use ledgermill_shared::types::AccountId;

use super::error::DirectoryError;
use super::types::{AccountRef, AccountType, SystemRole};

/// Read-only directory over one company's chart of accounts.
///
/// Built once per request from the company's account rows; resolution is
/// pure lookup with no I/O.
#[derive(Debug, Clone)]
pub struct ChartDirectory {
    accounts: Vec<AccountRef>,
    by_role: HashMap<SystemRole, usize>,
    by_code: HashMap<String, usize>,
    by_id: HashMap<AccountId, usize>,
}

impl ChartDirectory {
    /// Builds a directory from account rows.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRole` if two accounts claim the same system role.
    pub fn new(accounts: Vec<AccountRef>) -> Result<Self, DirectoryError> {
        let mut by_role = HashMap::new();
        let mut by_code = HashMap::new();
        let mut by_id = HashMap::new();

        for (idx, account) in accounts.iter().enumerate() {
            if let Some(role) = account.role
                && by_role.insert(role, idx).is_some()
            {
                return Err(DirectoryError::DuplicateRole(role));
            }
            by_code.insert(account.code.clone(), idx);
            by_id.insert(account.id, idx);
        }

        Ok(Self {
            accounts,
            by_role,
            by_code,
            by_id,
        })
    }

    /// Resolves a logical role to its account.
    ///
    /// # Errors
    ///
    /// Returns `RoleNotMapped` if the company has no account for the role.
    pub fn resolve_role(&self, role: SystemRole) -> Result<&AccountRef, DirectoryError> {
        self.by_role
            .get(&role)
            .map(|&idx| &self.accounts[idx])
            .ok_or(DirectoryError::RoleNotMapped(role))
    }

    /// Resolves an account code to its account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account carries the code.
    pub fn resolve_code(&self, code: &str) -> Result<&AccountRef, DirectoryError> {
        self.by_code
            .get(code)
            .map(|&idx| &self.accounts[idx])
            .ok_or_else(|| DirectoryError::AccountNotFound(code.to_string()))
    }

    /// Resolves an account id to its account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the id is not in this chart. Callers
    /// use this to reject ids that belong to another company.
    pub fn resolve_id(&self, id: AccountId) -> Result<&AccountRef, DirectoryError> {
        self.by_id
            .get(&id)
            .map(|&idx| &self.accounts[idx])
            .ok_or_else(|| DirectoryError::AccountNotFound(id.to_string()))
    }

    /// Resolves a role and verifies the mapped account has the given type.
    ///
    /// # Errors
    ///
    /// Returns `WrongAccountType` if the mapped account's type differs.
    pub fn expect_type(
        &self,
        role: SystemRole,
        expected: AccountType,
    ) -> Result<&AccountRef, DirectoryError> {
        let account = self.resolve_role(role)?;
        if account.account_type != expected {
            return Err(DirectoryError::WrongAccountType {
                role,
                expected,
                actual: account.account_type,
            });
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgermill_shared::types::AccountId;

    fn make_account(code: &str, account_type: AccountType, role: Option<SystemRole>) -> AccountRef {
        AccountRef {
            id: AccountId::new(),
            code: code.to_string(),
            name: code.to_string(),
            account_type,
            role,
        }
    }

    fn sample_directory() -> ChartDirectory {
        ChartDirectory::new(vec![
            make_account(
                "1100",
                AccountType::Asset,
                Some(SystemRole::AccountsReceivable),
            ),
            make_account("4000", AccountType::Revenue, Some(SystemRole::SalesRevenue)),
            make_account(
                "2300",
                AccountType::Liability,
                Some(SystemRole::VatPayable),
            ),
            make_account("9999", AccountType::Expense, None),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_role() {
        let dir = sample_directory();
        let ar = dir.resolve_role(SystemRole::AccountsReceivable).unwrap();
        assert_eq!(ar.code, "1100");
        assert_eq!(ar.account_type, AccountType::Asset);
    }

    #[test]
    fn test_resolve_role_not_mapped() {
        let dir = sample_directory();
        assert!(matches!(
            dir.resolve_role(SystemRole::WorkInProgress),
            Err(DirectoryError::RoleNotMapped(SystemRole::WorkInProgress))
        ));
    }

    #[test]
    fn test_resolve_code() {
        let dir = sample_directory();
        assert_eq!(dir.resolve_code("9999").unwrap().account_type, AccountType::Expense);
        assert!(matches!(
            dir.resolve_code("0000"),
            Err(DirectoryError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_id() {
        let dir = sample_directory();
        let revenue_id = dir.resolve_code("4000").unwrap().id;
        assert_eq!(dir.resolve_id(revenue_id).unwrap().code, "4000");
        assert!(matches!(
            dir.resolve_id(AccountId::new()),
            Err(DirectoryError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_expect_type_mismatch() {
        let dir = ChartDirectory::new(vec![make_account(
            "1000",
            AccountType::Expense,
            Some(SystemRole::Cash),
        )])
        .unwrap();

        assert!(matches!(
            dir.expect_type(SystemRole::Cash, AccountType::Asset),
            Err(DirectoryError::WrongAccountType {
                expected: AccountType::Asset,
                actual: AccountType::Expense,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let result = ChartDirectory::new(vec![
            make_account("1000", AccountType::Asset, Some(SystemRole::Cash)),
            make_account("1001", AccountType::Asset, Some(SystemRole::Cash)),
        ]);
        assert!(matches!(result, Err(DirectoryError::DuplicateRole(SystemRole::Cash))));
    }
}
