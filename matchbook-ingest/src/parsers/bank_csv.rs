//! Bank statement CSV parser.
//!
//! Expected header (extra columns are ignored):
//!   account_no,settlement_date,transaction_date,time,invoice_number,product,...,
//!   total_amount,...,merchant_id,fuel_brand
//!
//! Dates are D/M/YYYY; amounts may carry thousands separators ("2,080.00").

use anyhow::{Context, Result};
use matchbook_core::{BankRecord, ReconcileError, Side, parse_dmy};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::amount::parse_currency;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBankRow {
    account_no: String,
    transaction_date: String,
    time: String,
    invoice_number: String,
    total_amount: String,
    merchant_id: String,
    fuel_brand: String,
}

/// Parse a bank statement CSV file.
pub fn parse_bank_csv(path: impl AsRef<Path>) -> Result<Vec<BankRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_bank_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse bank statement CSV text from any reader.
///
/// Rows whose invoice_number is blank are dropped. Ids are `bank-<row>`, where
/// `<row>` is the zero-based data row index before dropping.
pub fn read_bank_csv(rdr: impl Read) -> Result<Vec<BankRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(rdr);

    let mut out = Vec::new();

    for (i, result) in rdr.deserialize::<RawBankRow>().enumerate() {
        let row = result.with_context(|| format!("reading bank row {i}"))?;
        let id = format!("bank-{i}");

        let invoice_number = row.invoice_number.trim().to_string();
        if invoice_number.is_empty() {
            debug!(row = i, "dropping bank row without invoice_number");
            continue;
        }

        let transaction_date = parse_dmy(&row.transaction_date).ok_or_else(|| {
            ReconcileError::malformed(
                Side::Bank,
                &id,
                format!("unparseable transaction_date '{}'", row.transaction_date),
            )
        })?;

        let amount = parse_currency(&row.total_amount)
            .map_err(|e| ReconcileError::malformed(Side::Bank, &id, format!("{e}")))?;

        out.push(BankRecord {
            id,
            account_no: row.account_no.trim().to_string(),
            transaction_date,
            time: row.time.trim().to_string(),
            invoice_number,
            amount,
            merchant_id: row.merchant_id.trim().to_string(),
            fuel_brand: row.fuel_brand.trim().to_string(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parses_basic_rows() {
        let text = "\
account_no,transaction_date,time,invoice_number,total_amount,merchant_id,fuel_brand
123456789,1/9/2025,19:21:15,395443,\"2,080.00\",1235001074,PTT
123456789,2/9/2025,14:28:08, 965451 ,864.8,1000020346,PTT
";
        let txns = read_bank_csv(text.as_bytes()).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].id, "bank-0");
        assert_eq!(txns[0].amount, dec!(2080.00));
        assert_eq!(txns[0].transaction_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(txns[1].invoice_number, "965451");
        assert_eq!(txns[1].fuel_brand, "PTT");
    }

    #[test]
    fn test_drops_rows_without_invoice_but_keeps_row_ids() {
        let text = "\
account_no,transaction_date,invoice_number,total_amount
1,1/9/2025,,10.00
1,1/9/2025,   ,10.00
1,3/9/2025,A-7,10.00
";
        let txns = read_bank_csv(text.as_bytes()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].id, "bank-2");
        assert_eq!(txns[0].time, "");
    }

    #[test]
    fn test_bad_date_is_malformed_record() {
        let text = "\
transaction_date,invoice_number,total_amount
not-a-date,A-1,10.00
";
        let err = read_bank_csv(text.as_bytes()).unwrap_err();
        let rec = err.downcast_ref::<ReconcileError>().unwrap();
        assert!(matches!(
            rec,
            ReconcileError::MalformedRecord { side: Side::Bank, id, .. } if id == "bank-0"
        ));
    }

    #[test]
    fn test_bad_amount_is_malformed_record() {
        let text = "\
transaction_date,invoice_number,total_amount
1/9/2025,A-1,ten
";
        let err = read_bank_csv(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("malformed bank record bank-0"));
    }
}
