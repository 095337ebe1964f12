//! Ledger error types for validation and permission errors.

use kanjo_shared::types::{AccountId, JournalEntryId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry amount must be strictly positive.
    #[error("Entry amount must be positive")]
    NonPositiveAmount,

    /// Debit and credit account must differ.
    #[error("Debit and credit account must differ")]
    SameAccount,

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    // ========== Permission Errors ==========
    /// System-generated entries are owned by the posting engine.
    #[error(
        "Journal entry {0} was generated from a source document and cannot be deleted directly"
    )]
    SystemEntryProtected(JournalEntryId),

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    // ========== Infrastructure ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::SameAccount => "SAME_ACCOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::SystemEntryProtected(_) => "SYSTEM_ENTRY_PROTECTED",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NonPositiveAmount | Self::SameAccount => 400,
            Self::SystemEntryProtected(_) => 403,
            Self::AccountNotFound(_) | Self::EntryNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::NonPositiveAmount.error_code(),
            "NON_POSITIVE_AMOUNT"
        );
        assert_eq!(LedgerError::SameAccount.error_code(), "SAME_ACCOUNT");
        assert_eq!(
            LedgerError::SystemEntryProtected(JournalEntryId::new()).error_code(),
            "SYSTEM_ENTRY_PROTECTED"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::NonPositiveAmount.http_status_code(), 400);
        assert_eq!(LedgerError::SameAccount.http_status_code(), 400);
        assert_eq!(
            LedgerError::SystemEntryProtected(JournalEntryId::new()).http_status_code(),
            403
        );
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::new()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::Database("boom".to_string()).http_status_code(),
            500
        );
    }
}
