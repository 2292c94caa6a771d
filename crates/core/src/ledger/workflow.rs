//! Voucher status state machine.
//!
//! Legal transitions:
//! - Draft -> Posted (materializes lines from the typed intent)
//! - Posted -> Approved (terminal, idempotent)
//! - Draft | Posted -> Rejected (terminal)
//!
//! A rejected draft may be deleted; a rejected voucher whose lines were
//! posted is undone by a reversing voucher, never deleted.

use super::error::LedgerError;
use super::types::VoucherStatus;

/// Outcome of applying a workflow transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The voucher moved to a new status.
    Applied(VoucherStatus),
    /// The voucher was already in the target status; nothing changed.
    NoOp,
}

/// Stateless service validating voucher status transitions.
pub struct VoucherWorkflow;

impl VoucherWorkflow {
    /// Post a draft voucher.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the voucher is a draft.
    pub fn post(current: VoucherStatus) -> Result<VoucherStatus, LedgerError> {
        match current {
            VoucherStatus::Draft => Ok(VoucherStatus::Posted),
            _ => Err(LedgerError::InvalidTransition {
                from: current,
                to: VoucherStatus::Posted,
            }),
        }
    }

    /// Approve a posted voucher.
    ///
    /// Approval is terminal and idempotent: approving an already-approved
    /// voucher is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for drafts and rejected vouchers.
    pub fn approve(current: VoucherStatus) -> Result<TransitionOutcome, LedgerError> {
        match current {
            VoucherStatus::Posted => Ok(TransitionOutcome::Applied(VoucherStatus::Approved)),
            VoucherStatus::Approved => Ok(TransitionOutcome::NoOp),
            _ => Err(LedgerError::InvalidTransition {
                from: current,
                to: VoucherStatus::Approved,
            }),
        }
    }

    /// Reject a draft or posted voucher.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for approved or already-rejected vouchers.
    pub fn reject(current: VoucherStatus) -> Result<VoucherStatus, LedgerError> {
        match current {
            VoucherStatus::Draft | VoucherStatus::Posted => Ok(VoucherStatus::Rejected),
            _ => Err(LedgerError::InvalidTransition {
                from: current,
                to: VoucherStatus::Rejected,
            }),
        }
    }

    /// Validate that a voucher can be deleted.
    ///
    /// Drafts are deletable. Rejected vouchers are deletable only if their
    /// lines were never posted; anything with posted lines stays for the
    /// audit trail.
    ///
    /// # Errors
    ///
    /// Returns `NotDeletable` otherwise.
    pub fn can_delete(status: VoucherStatus, has_lines: bool) -> Result<(), LedgerError> {
        match status {
            VoucherStatus::Draft => Ok(()),
            VoucherStatus::Rejected if !has_lines => Ok(()),
            _ => Err(LedgerError::NotDeletable { status }),
        }
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: VoucherStatus, to: VoucherStatus) -> bool {
        matches!(
            (from, to),
            (VoucherStatus::Draft, VoucherStatus::Posted | VoucherStatus::Rejected)
                | (VoucherStatus::Posted, VoucherStatus::Approved | VoucherStatus::Rejected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_from_draft() {
        assert_eq!(
            VoucherWorkflow::post(VoucherStatus::Draft).unwrap(),
            VoucherStatus::Posted
        );
    }

    #[test]
    fn test_post_from_posted_rejected() {
        assert!(matches!(
            VoucherWorkflow::post(VoucherStatus::Posted),
            Err(LedgerError::InvalidTransition {
                from: VoucherStatus::Posted,
                to: VoucherStatus::Posted,
            })
        ));
    }

    #[test]
    fn test_approve_posted() {
        assert_eq!(
            VoucherWorkflow::approve(VoucherStatus::Posted).unwrap(),
            TransitionOutcome::Applied(VoucherStatus::Approved)
        );
    }

    #[test]
    fn test_approve_is_idempotent() {
        assert_eq!(
            VoucherWorkflow::approve(VoucherStatus::Approved).unwrap(),
            TransitionOutcome::NoOp
        );
    }

    #[test]
    fn test_approve_draft_rejected() {
        assert!(VoucherWorkflow::approve(VoucherStatus::Draft).is_err());
        assert!(VoucherWorkflow::approve(VoucherStatus::Rejected).is_err());
    }

    #[test]
    fn test_reject_draft_and_posted() {
        assert_eq!(
            VoucherWorkflow::reject(VoucherStatus::Draft).unwrap(),
            VoucherStatus::Rejected
        );
        assert_eq!(
            VoucherWorkflow::reject(VoucherStatus::Posted).unwrap(),
            VoucherStatus::Rejected
        );
        assert!(VoucherWorkflow::reject(VoucherStatus::Approved).is_err());
        assert!(VoucherWorkflow::reject(VoucherStatus::Rejected).is_err());
    }

    #[test]
    fn test_can_delete_draft() {
        assert!(VoucherWorkflow::can_delete(VoucherStatus::Draft, false).is_ok());
        assert!(VoucherWorkflow::can_delete(VoucherStatus::Draft, true).is_ok());
    }

    #[test]
    fn test_can_delete_rejected_draft_only() {
        // Rejected before posting: no lines, deletable.
        assert!(VoucherWorkflow::can_delete(VoucherStatus::Rejected, false).is_ok());
        // Rejected after posting: lines exist, must be reversed instead.
        assert!(matches!(
            VoucherWorkflow::can_delete(VoucherStatus::Rejected, true),
            Err(LedgerError::NotDeletable {
                status: VoucherStatus::Rejected,
            })
        ));
    }

    #[test]
    fn test_posted_never_deletable() {
        assert!(VoucherWorkflow::can_delete(VoucherStatus::Posted, true).is_err());
        assert!(VoucherWorkflow::can_delete(VoucherStatus::Approved, true).is_err());
    }

    #[test]
    fn test_transition_matrix() {
        use VoucherStatus::{Approved, Draft, Posted, Rejected};

        assert!(VoucherWorkflow::is_valid_transition(Draft, Posted));
        assert!(VoucherWorkflow::is_valid_transition(Draft, Rejected));
        assert!(VoucherWorkflow::is_valid_transition(Posted, Approved));
        assert!(VoucherWorkflow::is_valid_transition(Posted, Rejected));

        assert!(!VoucherWorkflow::is_valid_transition(Posted, Draft));
        assert!(!VoucherWorkflow::is_valid_transition(Approved, Rejected));
        assert!(!VoucherWorkflow::is_valid_transition(Rejected, Posted));
        assert!(!VoucherWorkflow::is_valid_transition(Approved, Posted));
    }
}
