use crate::domain::{AccountId, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Emitted once per accepted deposit.
    SavingSuccessful { account: AccountId, amount: Money },
}

impl core::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LedgerEvent::SavingSuccessful { account, amount } => {
                write!(f, "SavingSuccessful({}, {})", account, amount)
            }
        }
    }
}
