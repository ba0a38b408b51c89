//! Currency cell cleanup: "1,234.56" -> 1234.56

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a currency cell. Thousands separators are stripped; an empty cell is zero.
pub fn parse_currency(raw: &str) -> Result<Decimal> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).with_context(|| format!("invalid amount '{raw}'"))
}
