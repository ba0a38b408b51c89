//! Classifier: turns a key-matched (bank, book) pair into a status.
//!
//! Precedence:
//! - amount within tolerance and dates within tolerance -> Matched
//! - amount outside tolerance -> AmountMismatch (wins over a date difference)
//! - otherwise -> DateMismatch

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::date::days_apart;
use crate::error::{ReconcileError, ReconcileResult};
use crate::types::{BankRecord, BookRecord, Classification, MatchStatus, Side};

/// Tolerances applied to a key-matched pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MatchPolicy {
    /// Amounts closer than this (strictly) count as equal.
    pub amount_tolerance: Decimal,
    /// Dates at most this many days apart count as equal.
    pub date_tolerance_days: i64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            amount_tolerance: Decimal::new(1, 2),
            date_tolerance_days: 0,
        }
    }
}

impl MatchPolicy {
    pub fn validate(&self) -> ReconcileResult<()> {
        if self.amount_tolerance <= Decimal::ZERO {
            return Err(ReconcileError::InvalidPolicy(format!(
                "amount_tolerance must be positive, got {}",
                self.amount_tolerance
            )));
        }
        if self.date_tolerance_days < 0 {
            return Err(ReconcileError::InvalidPolicy(format!(
                "date_tolerance_days must be >= 0, got {}",
                self.date_tolerance_days
            )));
        }
        Ok(())
    }
}

/// Classify a pair whose keys are already known to be equal.
///
/// Fails only when `bank.amount - book.amount` is not representable.
pub fn classify(
    bank: &BankRecord,
    book: &BookRecord,
    policy: &MatchPolicy,
) -> ReconcileResult<Classification> {
    let diff_amount = bank.amount.checked_sub(book.amount).ok_or_else(|| {
        ReconcileError::malformed(
            Side::Bank,
            &bank.id,
            format!("amount overflow against {}", book.id),
        )
    })?;
    let amount_ok = diff_amount.abs() < policy.amount_tolerance;
    let date_diff_days = days_apart(bank.transaction_date, book.posting_date);
    let date_ok = date_diff_days <= policy.date_tolerance_days;

    let status = if amount_ok && date_ok {
        MatchStatus::Matched
    } else if !amount_ok {
        MatchStatus::AmountMismatch
    } else {
        MatchStatus::DateMismatch
    };

    Ok(Classification {
        status,
        diff_amount,
        date_diff_days,
        remarks: remarks(status, diff_amount),
    })
}

fn remarks(status: MatchStatus, diff: Decimal) -> String {
    match status {
        MatchStatus::Matched => "Perfect match".to_string(),
        MatchStatus::AmountMismatch => format!("Amount differs by {}", fixed2(diff)),
        MatchStatus::DateMismatch => "Date mismatch".to_string(),
        MatchStatus::UnmatchedBank | MatchStatus::UnmatchedBook => String::new(),
    }
}

/// Render with exactly two decimals, half away from zero.
pub fn fixed2(value: Decimal) -> String {
    let mut v = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    v.rescale(2);
    v.to_string()
}
