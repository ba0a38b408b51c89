//! Book / GL extract CSV parser.
//!
//! Expected header: document_no,posting_date,description,amount
//! `description` carries the invoice number used for matching.

use anyhow::{Context, Result};
use matchbook_core::{BookRecord, ReconcileError, Side, parse_dmy};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::amount::parse_currency;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBookRow {
    document_no: String,
    posting_date: String,
    description: String,
    amount: String,
}

/// Parse a GL extract CSV file.
pub fn parse_book_csv(path: impl AsRef<Path>) -> Result<Vec<BookRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_book_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse GL extract CSV text from any reader. Rows with a blank description are dropped.
pub fn read_book_csv(rdr: impl Read) -> Result<Vec<BookRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(rdr);

    let mut out = Vec::new();

    for (i, result) in rdr.deserialize::<RawBookRow>().enumerate() {
        let row = result.with_context(|| format!("reading book row {i}"))?;
        let id = format!("book-{i}");

        let description = row.description.trim().to_string();
        if description.is_empty() {
            debug!(row = i, "dropping book row without description");
            continue;
        }

        let posting_date = parse_dmy(&row.posting_date).ok_or_else(|| {
            ReconcileError::malformed(
                Side::Book,
                &id,
                format!("unparseable posting_date '{}'", row.posting_date),
            )
        })?;

        let amount = parse_currency(&row.amount)
            .map_err(|e| ReconcileError::malformed(Side::Book, &id, format!("{e}")))?;

        out.push(BookRecord {
            id,
            document_no: row.document_no.trim().to_string(),
            posting_date,
            description,
            amount,
        });
    }

    Ok(out)
}
