//! matchbook-core: bank vs. book ledger matching.
//!
//! Pure and synchronous: two complete record sets in, items + summary out.

pub mod classify;
pub mod date;
pub mod error;
pub mod matcher;
pub mod reconcile;
pub mod summary;
pub mod types;

pub use classify::{MatchPolicy, classify, fixed2};
pub use date::{days_apart, parse_dmy};
pub use error::{ReconcileError, ReconcileResult};
pub use matcher::{BookPool, BookSlot, match_bank_records};
pub use reconcile::{reconcile, reconcile_with};
pub use summary::summarize;
pub use types::{
    BankRecord, BookRecord, Classification, MatchStatus, Reconciliation, ReconciliationItem,
    ReconciliationSummary, Side,
};
