//! Calendar date helpers. Ledgers in this domain write dates day-first.

use chrono::NaiveDate;

/// Parse `D/M/YYYY` (one- or two-digit day and month), e.g. "1/9/2025".
pub fn parse_dmy(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let mut it = s.split('/');
    let d: u32 = it.next()?.trim().parse().ok()?;
    let m: u32 = it.next()?.trim().parse().ok()?;
    let y: i32 = it.next()?.trim().parse().ok()?;
    if it.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Whole calendar days between two dates, unsigned.
pub fn days_apart(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days().abs()
}
