//! Plain-text dashboard and transaction table.

use matchbook_core::{
    BankRecord, BookRecord, MatchStatus, ReconciliationItem, ReconciliationSummary, fixed2,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const BAR_WIDTH: usize = 30;

/// Row filter for the transaction table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Matched,
    /// Amount or date differences
    Mismatch,
    /// Orphans on either side
    Unmatched,
}

impl StatusFilter {
    pub fn accepts(&self, status: MatchStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Matched => status == MatchStatus::Matched,
            StatusFilter::Mismatch => status.is_mismatch(),
            StatusFilter::Unmatched => status.is_unmatched(),
        }
    }
}

/// "1234567.5" -> "1,234,567.50"
pub fn fmt_amount(value: Decimal) -> String {
    let s = fixed2(value);
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac}")
}

/// "+6.00" / "-6.50", or "-" when there is no material variance.
pub fn fmt_variance(diff: Option<Decimal>) -> String {
    match diff {
        Some(d) if d.abs() > Decimal::new(1, 3) => {
            if d > Decimal::ZERO {
                format!("+{}", fixed2(d))
            } else {
                fixed2(d)
            }
        }
        _ => "-".to_string(),
    }
}

pub fn render_dashboard(s: &ReconciliationSummary) -> String {
    let mut out = String::new();
    out.push_str("## Reconciliation Analysis\n\n");
    out.push_str(&format!("{:<20}{:>8}\n", "Matched", s.matched_count));
    out.push_str(&format!(
        "{:<20}{:>8}  (amount {}, date {})\n",
        "Mismatches",
        s.mismatch_count(),
        s.mismatch_amount_count,
        s.mismatch_date_count
    ));
    out.push_str(&format!("{:<20}{:>8}\n", "Unmatched (Bank)", s.unmatched_bank_count));
    out.push_str(&format!("{:<20}{:>8}\n", "Unmatched (Book)", s.unmatched_book_count));
    out.push_str(&format!(
        "{:<20}{:>8}  (bank {}, book {})\n",
        "Records", s.total_bank + s.total_book, s.total_bank, s.total_book
    ));
    out.push_str(&format!("{:<20}{:>7}%\n", "Match rate", fixed2(s.match_rate())));
    out.push_str(&format!("{:<20}{:>8}\n", "Total variance", fmt_variance(Some(s.total_diff))));

    out.push_str("\n## Overview\n\n");
    let groups = [
        ("Matched", s.matched_count),
        ("Errors (Amt/Date)", s.mismatch_count()),
        ("Unmatched Bank", s.unmatched_bank_count),
        ("Unmatched Book", s.unmatched_book_count),
    ];
    let total: usize = groups.iter().map(|(_, n)| n).sum();
    for (label, n) in groups {
        out.push_str(&format!("{:<20}{:<w$} {:>5}\n", label, bar(n, total), n, w = BAR_WIDTH));
    }
    out
}

fn bar(n: usize, total: usize) -> String {
    if total == 0 {
        return String::new();
    }
    // Non-zero groups always get at least one mark.
    let len = (n * BAR_WIDTH / total).max(usize::from(n > 0));
    "#".repeat(len)
}

fn bank_cell(b: Option<&BankRecord>) -> String {
    match b {
        Some(b) => format!(
            "INV: {} {} {}",
            b.invoice_number,
            b.transaction_date.format("%d/%m/%Y"),
            fmt_amount(b.amount)
        ),
        None => "No Record".to_string(),
    }
}

fn book_cell(b: Option<&BookRecord>) -> String {
    match b {
        Some(b) => format!(
            "DESC: {} {} {}",
            b.description,
            b.posting_date.format("%d/%m/%Y"),
            fmt_amount(b.amount)
        ),
        None => "No Record".to_string(),
    }
}

/// Render the item table after applying `filter`, keeping at most `limit` rows.
pub fn render_table(
    items: &[ReconciliationItem],
    filter: StatusFilter,
    limit: Option<usize>,
) -> String {
    let rows: Vec<&ReconciliationItem> = items
        .iter()
        .filter(|i| filter.accepts(i.status))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    let mut out = String::new();
    out.push_str(&format!(
        "{:<14}{:<40}    {:<40}{:>12}  {}\n",
        "STATUS", "BANK (SOURCE)", "BOOK (GL)", "VARIANCE", "REMARKS"
    ));

    if rows.is_empty() {
        out.push_str("No transactions found for this filter.\n");
        return out;
    }

    for item in rows {
        out.push_str(
            format!(
                "{:<14}{:<40} -> {:<40}{:>12}  {}",
                item.status.label(),
                bank_cell(item.bank.as_ref()),
                book_cell(item.book.as_ref()),
                fmt_variance(item.diff_amount),
                item.remarks
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchbook_core::reconcile;
    use matchbook_ingest::sample_records;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fmt_amount_groups_thousands() {
        assert_eq!(fmt_amount(dec!(2080)), "2,080.00");
        assert_eq!(fmt_amount(dec!(864.8)), "864.80");
        assert_eq!(fmt_amount(dec!(1234567.5)), "1,234,567.50");
        assert_eq!(fmt_amount(dec!(-5610.10)), "-5,610.10");
        assert_eq!(fmt_amount(dec!(0)), "0.00");
    }

    #[test]
    fn test_fmt_variance() {
        assert_eq!(fmt_variance(Some(dec!(6.00))), "+6.00");
        assert_eq!(fmt_variance(Some(dec!(-6.5))), "-6.50");
        assert_eq!(fmt_variance(Some(dec!(0.0))), "-");
        assert_eq!(fmt_variance(None), "-");
    }

    #[test]
    fn test_filters() {
        assert!(StatusFilter::All.accepts(MatchStatus::UnmatchedBook));
        assert!(StatusFilter::Mismatch.accepts(MatchStatus::DateMismatch));
        assert!(!StatusFilter::Mismatch.accepts(MatchStatus::Matched));
        assert!(StatusFilter::Unmatched.accepts(MatchStatus::UnmatchedBank));
        assert!(!StatusFilter::Matched.accepts(MatchStatus::AmountMismatch));
    }

    #[test]
    fn test_sample_table() {
        let (bank, book) = sample_records().unwrap();
        let rec = reconcile(&bank, &book).unwrap();

        let table = render_table(&rec.items, StatusFilter::Mismatch, None);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Amount Diff"));
        assert!(lines[1].contains("INV: 934785 01/09/2025 1,606.00"));
        assert!(lines[1].contains("DESC: 934785 01/09/2025 1,600.00"));
        assert!(lines[1].contains("+6.00"));
        assert!(lines[1].ends_with("Amount differs by 6.00"));
        assert!(lines[2].starts_with("Date Diff"));

        let empty = render_table(&rec.items, StatusFilter::Unmatched, None);
        assert!(empty.contains("No transactions found for this filter."));

        let limited = render_table(&rec.items, StatusFilter::All, Some(2));
        assert_eq!(limited.lines().count(), 3);
    }

    #[test]
    fn test_dashboard() {
        let (bank, book) = sample_records().unwrap();
        let rec = reconcile(&bank, &book).unwrap();
        let dash = render_dashboard(&rec.summary);

        assert!(dash.contains("Matched                    3"));
        assert!(dash.contains("(amount 1, date 1)"));
        assert!(dash.contains("60.00%"));
        assert!(dash.contains("+6.00"));
    }

    #[test]
    fn test_bar_lengths() {
        assert_eq!(bar(0, 0), "");
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(1, 1000), "#");
        assert_eq!(bar(5, 5).len(), BAR_WIDTH);
    }
}
