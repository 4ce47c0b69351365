use crate::domain::{AccountId, Money};

/// Which zero-value guard rejected the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAction {
    Save,
    Send,
}

impl core::fmt::Display for ValueAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValueAction::Save => f.write_str("save"),
            ValueAction::Send => f.write_str("send"),
        }
    }
}

/// Rejections raised by the ledger. A rejected call leaves no trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("can't {0} zero value")]
    InvalidAmount(ValueAction),

    #[error("you don't have any savings")]
    NoSavings,

    #[error("Insufficient savings")]
    InsufficientFunds,

    #[error("no zero address call")]
    InvalidRecipient,

    #[error("balance overflow")]
    Overflow,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Transfer of {amount} to {to} failed: {reason}")]
    Transfer {
        to: AccountId,
        amount: Money,
        reason: String,
    },
}

impl Error {
    /// The ledger rejection behind this error, if any.
    pub fn ledger(&self) -> Option<LedgerError> {
        match self {
            Error::Ledger(e) => Some(*e),
            _ => None,
        }
    }
}
