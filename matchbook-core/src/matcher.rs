//! Matcher + orphan collector.
//!
//! Bank records drive iteration in input order. Each one claims the first
//! still-available book record with an equal key. Book records move from
//! `Available` to `Claimed` exactly once, so pairing is one-to-one.
//!
//! Candidate lookup goes through an index of key -> queue of book positions
//! (in input order). Popping the front of the queue gives the same
//! first-available-in-input-order choice as rescanning the book list, in
//! near-linear total time.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::classify::{MatchPolicy, classify};
use crate::error::ReconcileResult;
use crate::types::{BankRecord, BookRecord, ReconciliationItem};

/// Ownership state of one book record within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSlot {
    Available,
    Claimed { by: String },
}

/// The book side of one reconciliation run.
#[derive(Debug)]
pub struct BookPool<'a> {
    records: &'a [BookRecord],
    slots: Vec<BookSlot>,
    // key -> unclaimed positions, front = earliest in input
    idx: HashMap<&'a str, VecDeque<usize>>,
}

impl<'a> BookPool<'a> {
    pub fn new(records: &'a [BookRecord]) -> Self {
        let mut idx: HashMap<&'a str, VecDeque<usize>> = HashMap::new();
        for (pos, rec) in records.iter().enumerate() {
            idx.entry(rec.key()).or_default().push_back(pos);
        }
        Self {
            records,
            slots: vec![BookSlot::Available; records.len()],
            idx,
        }
    }

    pub fn slot(&self, pos: usize) -> Option<&BookSlot> {
        self.slots.get(pos)
    }

    pub fn available_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| **s == BookSlot::Available)
            .count()
    }

    /// Claim the earliest available book record whose key equals `key`.
    pub fn claim(&mut self, key: &str, bank_id: &str) -> Option<&'a BookRecord> {
        let queue = self.idx.get_mut(key)?;
        let pos = queue.pop_front()?;
        if queue.is_empty() {
            self.idx.remove(key);
        }

        // Every position sits in exactly one queue and is popped at most once.
        debug_assert_eq!(self.slots[pos], BookSlot::Available);
        self.slots[pos] = BookSlot::Claimed {
            by: bank_id.to_string(),
        };
        Some(&self.records[pos])
    }

    /// One `UnmatchedBook` item per never-claimed record, in book input order.
    pub fn into_orphans(self) -> Vec<ReconciliationItem> {
        let records = self.records;
        records
            .iter()
            .zip(self.slots)
            .filter(|(_, slot)| *slot == BookSlot::Available)
            .map(|(rec, _)| ReconciliationItem::unmatched_book(rec.clone()))
            .collect()
    }
}

/// Bank-driven pass: exactly one item per bank record, in bank input order.
/// Stops at the first pair that cannot be classified.
pub fn match_bank_records(
    bank: &[BankRecord],
    pool: &mut BookPool<'_>,
    policy: &MatchPolicy,
) -> ReconcileResult<Vec<ReconciliationItem>> {
    bank.iter()
        .map(|b| match pool.claim(b.key(), &b.id) {
            Some(book) => {
                let outcome = classify(b, book, policy)?;
                debug!(bank = %b.id, book = %book.id, status = %outcome.status, "paired");
                Ok(ReconciliationItem::paired(b.clone(), book.clone(), outcome))
            }
            None => {
                debug!(bank = %b.id, key = b.key(), "no book record for key");
                Ok(ReconciliationItem::unmatched_bank(b.clone()))
            }
        })
        .collect()
}
