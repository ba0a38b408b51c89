//! Summarizer: per-status counts and total variance over a result set.

use rust_decimal::Decimal;

use crate::error::{ReconcileError, ReconcileResult};
use crate::types::{MatchStatus, ReconciliationItem, ReconciliationSummary};

/// Aggregate `items` into a summary. Order of `items` does not matter.
///
/// Fails with `AmountOverflow` when the running variance leaves the range of
/// `Decimal`.
pub fn summarize(
    items: &[ReconciliationItem],
    bank_count: usize,
    book_count: usize,
) -> ReconcileResult<ReconciliationSummary> {
    let mut s = ReconciliationSummary {
        total_bank: bank_count,
        total_book: book_count,
        ..ReconciliationSummary::default()
    };

    for item in items {
        match item.status {
            MatchStatus::Matched => s.matched_count += 1,
            MatchStatus::AmountMismatch => s.mismatch_amount_count += 1,
            MatchStatus::DateMismatch => s.mismatch_date_count += 1,
            MatchStatus::UnmatchedBank => s.unmatched_bank_count += 1,
            MatchStatus::UnmatchedBook => s.unmatched_book_count += 1,
        }
        s.total_diff = s
            .total_diff
            .checked_add(item.variance())
            .ok_or_else(|| ReconcileError::AmountOverflow(item.id.clone()))?;
    }

    Ok(s)
}

impl ReconciliationSummary {
    pub fn count(&self, status: MatchStatus) -> usize {
        match status {
            MatchStatus::Matched => self.matched_count,
            MatchStatus::AmountMismatch => self.mismatch_amount_count,
            MatchStatus::DateMismatch => self.mismatch_date_count,
            MatchStatus::UnmatchedBank => self.unmatched_bank_count,
            MatchStatus::UnmatchedBook => self.unmatched_book_count,
        }
    }

    /// Amount + date mismatches
    pub fn mismatch_count(&self) -> usize {
        self.mismatch_amount_count + self.mismatch_date_count
    }

    /// Orphans on both sides
    pub fn unmatched_count(&self) -> usize {
        self.unmatched_bank_count + self.unmatched_book_count
    }

    /// Number of key-matched pairs, whatever their status.
    pub fn paired_count(&self) -> usize {
        self.matched_count + self.mismatch_count()
    }

    /// True when every record on both sides is a perfect match.
    pub fn is_clean(&self) -> bool {
        self.mismatch_count() == 0 && self.unmatched_count() == 0
    }

    /// Percentage of bank records that matched perfectly (0 when there are none).
    pub fn match_rate(&self) -> Decimal {
        if self.total_bank == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.matched_count as u64) * Decimal::ONE_HUNDRED
            / Decimal::from(self.total_bank as u64)
    }
}
