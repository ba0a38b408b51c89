pub mod bank_csv;
pub mod book_csv;

pub use bank_csv::{parse_bank_csv, read_bank_csv};
pub use book_csv::{parse_book_csv, read_book_csv};
