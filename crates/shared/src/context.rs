//! Request-scoped tenant and user context.
//!
//! Every orchestrator and repository call receives an explicit
//! `RequestContext` instead of reading tenant or user identity from any
//! ambient/global state. All persisted rows carry the context's
//! `company_id` for tenant isolation.

use serde::{Deserialize, Serialize};

use crate::types::{CompanyId, UserId};

/// Identity of the tenant and acting user for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The company (tenant) every read and write is scoped to.
    pub company_id: CompanyId,
    /// The user performing the operation, recorded on audit fields.
    pub user_id: UserId,
}

impl RequestContext {
    /// Creates a new request context.
    #[must_use]
    pub const fn new(company_id: CompanyId, user_id: UserId) -> Self {
        Self {
            company_id,
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_carries_tenant_identity() {
        let company = CompanyId::new();
        let user = UserId::new();
        let ctx = RequestContext::new(company, user);
        assert_eq!(ctx.company_id, company);
        assert_eq!(ctx.user_id, user);
    }
}
