//! Single entry point: match, collect orphans, summarize.

use tracing::info;

use crate::classify::MatchPolicy;
use crate::error::{ReconcileError, ReconcileResult};
use crate::matcher::{BookPool, match_bank_records};
use crate::summary::summarize;
use crate::types::{BankRecord, BookRecord, Reconciliation, Side};

/// Reconcile with the default tolerances (0.01 amount, same-day date).
pub fn reconcile(bank: &[BankRecord], book: &[BookRecord]) -> ReconcileResult<Reconciliation> {
    reconcile_with(bank, book, &MatchPolicy::default())
}

/// Reconcile two complete record sets. Fails as a whole if any record is
/// malformed; never returns a partial result.
pub fn reconcile_with(
    bank: &[BankRecord],
    book: &[BookRecord],
    policy: &MatchPolicy,
) -> ReconcileResult<Reconciliation> {
    policy.validate()?;
    validate_keys(bank, book)?;

    let mut pool = BookPool::new(book);
    let mut items = match_bank_records(bank, &mut pool, policy)?;
    items.extend(pool.into_orphans());

    let summary = summarize(&items, bank.len(), book.len())?;
    info!(
        bank = summary.total_bank,
        book = summary.total_book,
        matched = summary.matched_count,
        mismatched = summary.mismatch_count(),
        unmatched_bank = summary.unmatched_bank_count,
        unmatched_book = summary.unmatched_book_count,
        total_diff = %summary.total_diff,
        "reconciliation complete"
    );

    Ok(Reconciliation { items, summary })
}

fn validate_keys(bank: &[BankRecord], book: &[BookRecord]) -> ReconcileResult<()> {
    if let Some(b) = bank.iter().find(|b| b.key().is_empty()) {
        return Err(ReconcileError::malformed(
            Side::Bank,
            &b.id,
            "empty invoice_number",
        ));
    }
    if let Some(b) = book.iter().find(|b| b.key().is_empty()) {
        return Err(ReconcileError::malformed(
            Side::Book,
            &b.id,
            "empty description",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_key_fails_whole_batch() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let book = vec![BookRecord {
            id: "book-0".into(),
            document_no: "1".into(),
            posting_date: date,
            description: "   ".into(),
            amount: dec!(1),
        }];

        let err = reconcile(&[], &book).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::malformed(Side::Book, "book-0", "empty description")
        );
        assert_eq!(err.to_string(), "malformed book record book-0: empty description");
    }

    #[test]
    fn test_blank_invoice_number_fails_whole_batch() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let bank = vec![BankRecord {
            id: "bank-0".into(),
            account_no: "123456789".into(),
            transaction_date: date,
            time: String::new(),
            invoice_number: "  ".into(),
            amount: dec!(1),
            merchant_id: String::new(),
            fuel_brand: String::new(),
        }];
        let book = vec![BookRecord {
            id: "book-0".into(),
            document_no: "1".into(),
            posting_date: date,
            description: "A".into(),
            amount: dec!(1),
        }];

        let err = reconcile(&bank, &book).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::malformed(Side::Bank, "bank-0", "empty invoice_number")
        );
        assert_eq!(err.to_string(), "malformed bank record bank-0: empty invoice_number");
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let policy = MatchPolicy {
            date_tolerance_days: -3,
            ..MatchPolicy::default()
        };
        assert!(matches!(
            reconcile_with(&[], &[], &policy),
            Err(ReconcileError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_empty_inputs() {
        let rec = reconcile(&[], &[]).unwrap();
        assert!(rec.items.is_empty());
        assert_eq!(rec.summary.total_bank, 0);
        assert_eq!(rec.summary.total_book, 0);
    }
}
