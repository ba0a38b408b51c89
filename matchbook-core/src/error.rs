use crate::types::Side;

/// Errors that abort a whole reconciliation batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("malformed {side} record {id}: {reason}")]
    MalformedRecord {
        side: Side,
        id: String,
        reason: String,
    },
    #[error("invalid match policy: {0}")]
    InvalidPolicy(String),
    #[error("total variance overflowed at {0}")]
    AmountOverflow(String),
}

impl ReconcileError {
    pub fn malformed(side: Side, id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            side,
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;
