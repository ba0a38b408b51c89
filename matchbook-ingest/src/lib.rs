//! matchbook-ingest: turns bank statement and GL extract CSVs into typed records.

pub mod amount;
pub mod parsers;
pub mod samples;

pub use amount::parse_currency;
pub use parsers::{parse_bank_csv, parse_book_csv, read_bank_csv, read_book_csv};
pub use samples::{SAMPLE_BANK_CSV, SAMPLE_BOOK_CSV, sample_records};
