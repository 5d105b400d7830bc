//! Validation of user submissions before they reach the ledger store.

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::TransactionKind;

/// Message shown when a submission is rejected.
pub const INVALID_SUBMISSION: &str = "Please enter a valid description and positive amount.";

/// A submission that passed validation and can be added as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    /// Positive raw amount; the sign is applied from `kind` on creation.
    pub amount: f64,
    pub kind: TransactionKind,
}

pub struct TransactionService;

impl TransactionService {
    /// Parses raw form input into a draft. The description is kept as
    /// entered; only its emptiness check ignores surrounding whitespace.
    pub fn parse_submission(
        description: &str,
        amount: &str,
        kind: &str,
    ) -> ServiceResult<TransactionDraft> {
        let amount = amount
            .trim()
            .parse::<f64>()
            .map_err(|_| ServiceError::Invalid(INVALID_SUBMISSION.into()))?;
        let kind = kind.parse::<TransactionKind>()?;
        Self::validate(description, amount)?;
        Ok(TransactionDraft {
            description: description.to_string(),
            amount,
            kind,
        })
    }

    /// Checks that the description is non-empty and the amount is a
    /// positive finite number.
    pub fn validate(description: &str, amount: f64) -> ServiceResult<()> {
        if description.trim().is_empty() || !amount.is_finite() || amount <= 0.0 {
            return Err(ServiceError::Invalid(INVALID_SUBMISSION.into()));
        }
        Ok(())
    }
}
