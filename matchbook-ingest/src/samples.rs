//! Built-in sample data: one fuel-card bank statement and the matching GL extract.
//!
//! Covers a perfect match, an amount difference (934785) and a date
//! difference (669397).

use anyhow::Result;
use matchbook_core::{BankRecord, BookRecord};

use crate::parsers::{read_bank_csv, read_book_csv};

pub const SAMPLE_BANK_CSV: &str = "\
account_no,settlement_date,transaction_date,time,invoice_number,product,liter,price,amount_before_vat,vat,total_amount,wht_1_percent,total_amount_after_wd,merchant_id,fuel_brand
123456789,1/9/2025,1/9/2025,19:21:15,395443,DIESEL (PTT),65,32,\"1,943.93\",136.07,\"2,080.00\",19.44,\"2,060.56\",1235001074,PTT
123456789,1/9/2025,1/9/2025,15:01:09,934785,DIESEL (PTT),50,32.12,\"1,500.93\",105.07,\"1,606.00\",15.01,\"1,590.99\",1024261188,PTT
123456789,2/9/2025,2/9/2025,14:28:08,965451,DIESEL (PTT),27,32.03,808.22,56.58,864.8,8.08,856.72,1000020346,PTT
123456789,12/9/2025,12/9/2025,12:34:13,961851,HI DIESEL S (BCP),50.37,32.16,\"1,514.11\",105.99,\"1,620.10\",15.14,\"1,604.96\",1024500988,BCP
123456789,26/9/2025,26/9/2025,06:55:36,669397,HI DIESEL S (BCP),175.15,32.03,\"5,243.08\",367.02,\"5,610.10\",52.43,\"5,557.67\",1219090472,BCP
";

pub const SAMPLE_BOOK_CSV: &str = "\
document_no,posting_date,description,amount
1,1/9/2025,395443,\"2,080.00\"
2,1/9/2025,934785,\"1,600.00\"
11,2/9/2025,965451,864.80
105,12/9/2025,961851,\"1,620.10\"
224,28/9/2025,669397,\"5,610.10\"
";

/// Parse both samples.
pub fn sample_records() -> Result<(Vec<BankRecord>, Vec<BookRecord>)> {
    let bank = read_bank_csv(SAMPLE_BANK_CSV.as_bytes())?;
    let book = read_book_csv(SAMPLE_BOOK_CSV.as_bytes())?;
    Ok((bank, book))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_parse() {
        let (bank, book) = sample_records().unwrap();
        assert_eq!(bank.len(), 5);
        assert_eq!(book.len(), 5);
        assert_eq!(bank[4].merchant_id, "1219090472");
        assert_eq!(book[4].description, "669397");
    }
}
