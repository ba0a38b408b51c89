//! Record and result types shared by the matcher, the normalizer and the CLI.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which ledger a record came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    #[serde(rename = "bank")]
    Bank,
    #[serde(rename = "book")]
    Book,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bank => f.write_str("bank"),
            Side::Book => f.write_str("book"),
        }
    }
}

/// A line from the bank statement, keyed by its invoice number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankRecord {
    /// Stable within one run (`bank-<row>`)
    pub id: String,
    pub account_no: String,
    pub transaction_date: NaiveDate,
    /// Informational only, never compared
    pub time: String,
    /// Matching key
    pub invoice_number: String,
    /// Signed, currency units
    pub amount: Decimal,
    pub merchant_id: String,
    pub fuel_brand: String,
}

impl BankRecord {
    /// Matching key, trimmed.
    pub fn key(&self) -> &str {
        self.invoice_number.trim()
    }
}

/// A line from the internal ledger, keyed by its description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookRecord {
    /// Stable within one run (`book-<row>`)
    pub id: String,
    pub document_no: String,
    pub posting_date: NaiveDate,
    /// Matching key, expected to carry the invoice number
    pub description: String,
    pub amount: Decimal,
}

impl BookRecord {
    /// Matching key, trimmed.
    pub fn key(&self) -> &str {
        self.description.trim()
    }
}

/// Outcome of reconciling one record or pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchStatus {
    #[serde(rename = "MATCHED")]
    Matched,
    #[serde(rename = "AMOUNT_MISMATCH")]
    AmountMismatch,
    #[serde(rename = "DATE_MISMATCH")]
    DateMismatch,
    #[serde(rename = "UNMATCHED_BANK")]
    UnmatchedBank,
    #[serde(rename = "UNMATCHED_BOOK")]
    UnmatchedBook,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 5] = [
        MatchStatus::Matched,
        MatchStatus::AmountMismatch,
        MatchStatus::DateMismatch,
        MatchStatus::UnmatchedBank,
        MatchStatus::UnmatchedBook,
    ];

    /// Wire name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "MATCHED",
            MatchStatus::AmountMismatch => "AMOUNT_MISMATCH",
            MatchStatus::DateMismatch => "DATE_MISMATCH",
            MatchStatus::UnmatchedBank => "UNMATCHED_BANK",
            MatchStatus::UnmatchedBook => "UNMATCHED_BOOK",
        }
    }

    /// Short human label used in tables.
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "Matched",
            MatchStatus::AmountMismatch => "Amount Diff",
            MatchStatus::DateMismatch => "Date Diff",
            MatchStatus::UnmatchedBank => "Only in Bank",
            MatchStatus::UnmatchedBook => "Only in Book",
        }
    }

    /// Paired on the key but differing in amount or date.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, MatchStatus::AmountMismatch | MatchStatus::DateMismatch)
    }

    /// Orphan on either side.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, MatchStatus::UnmatchedBank | MatchStatus::UnmatchedBook)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the reconciliation result.
///
/// Both sides are present for paired statuses; exactly one side is present
/// for `UnmatchedBank` / `UnmatchedBook`. The matcher only builds items through
/// the constructors below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconciliationItem {
    pub id: String,
    pub status: MatchStatus,
    pub bank: Option<BankRecord>,
    pub book: Option<BookRecord>,
    /// bank.amount - book.amount
    pub diff_amount: Option<Decimal>,
    pub date_diff_days: Option<i64>,
    pub remarks: String,
}

impl ReconciliationItem {
    pub fn paired(bank: BankRecord, book: BookRecord, outcome: Classification) -> Self {
        Self {
            id: format!("rec-{}", bank.id),
            status: outcome.status,
            bank: Some(bank),
            book: Some(book),
            diff_amount: Some(outcome.diff_amount),
            date_diff_days: Some(outcome.date_diff_days),
            remarks: outcome.remarks,
        }
    }

    pub fn unmatched_bank(bank: BankRecord) -> Self {
        Self {
            id: format!("rec-{}", bank.id),
            status: MatchStatus::UnmatchedBank,
            bank: Some(bank),
            book: None,
            diff_amount: None,
            date_diff_days: None,
            remarks: String::new(),
        }
    }

    pub fn unmatched_book(book: BookRecord) -> Self {
        Self {
            id: format!("rec-orphan-{}", book.id),
            status: MatchStatus::UnmatchedBook,
            bank: None,
            book: Some(book),
            diff_amount: None,
            date_diff_days: None,
            remarks: String::new(),
        }
    }

    /// Signed variance, zero when one side is missing.
    pub fn variance(&self) -> Decimal {
        self.diff_amount.unwrap_or(Decimal::ZERO)
    }
}

/// Result of classifying one key-matched pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: MatchStatus,
    pub diff_amount: Decimal,
    pub date_diff_days: i64,
    pub remarks: String,
}

/// Per-status counts plus total signed variance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconciliationSummary {
    pub total_bank: usize,
    pub total_book: usize,
    pub matched_count: usize,
    pub mismatch_amount_count: usize,
    pub mismatch_date_count: usize,
    pub unmatched_bank_count: usize,
    pub unmatched_book_count: usize,
    pub total_diff: Decimal,
}

/// Items plus the summary derived from them, produced together by one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reconciliation {
    pub items: Vec<ReconciliationItem>,
    pub summary: ReconciliationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bank() -> BankRecord {
        BankRecord {
            id: "bank-0".into(),
            account_no: "123456789".into(),
            transaction_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            time: "19:21:15".into(),
            invoice_number: " 395443 ".into(),
            amount: dec!(2080.00),
            merchant_id: "1235001074".into(),
            fuel_brand: "PTT".into(),
        }
    }

    #[test]
    fn test_key_is_trimmed() {
        assert_eq!(bank().key(), "395443");
    }

    #[test]
    fn test_item_ids_carry_provenance() {
        let b = bank();
        let book = BookRecord {
            id: "book-3".into(),
            document_no: "105".into(),
            posting_date: b.transaction_date,
            description: "395443".into(),
            amount: dec!(2080.00),
        };
        assert_eq!(ReconciliationItem::unmatched_bank(b).id, "rec-bank-0");
        assert_eq!(ReconciliationItem::unmatched_book(book).id, "rec-orphan-book-3");
    }

    #[test]
    fn test_status_serializes_to_wire_name() {
        let json = serde_json::to_string(&MatchStatus::AmountMismatch).unwrap();
        assert_eq!(json, "\"AMOUNT_MISMATCH\"");
        for s in MatchStatus::ALL {
            assert_eq!(serde_json::to_string(&s).unwrap(), format!("\"{}\"", s.as_str()));
        }
    }

    #[test]
    fn test_status_groups() {
        assert!(MatchStatus::DateMismatch.is_mismatch());
        assert!(!MatchStatus::Matched.is_mismatch());
        assert!(MatchStatus::UnmatchedBook.is_unmatched());
        assert!(!MatchStatus::AmountMismatch.is_unmatched());
    }
}
