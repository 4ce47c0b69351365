use crate::domain::{AccountId, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Deposit { amount: Money },
    Withdraw,
    SendOutSaving { recipient: AccountId, amount: Money },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub caller: AccountId,
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            CommandKind::Deposit { amount } => {
                write!(f, "deposit,caller={},amount={}", self.caller, amount)
            }
            CommandKind::Withdraw => write!(f, "withdraw,caller={}", self.caller),
            CommandKind::SendOutSaving { recipient, amount } => write!(
                f,
                "send,caller={},recipient={},amount={}",
                self.caller, recipient, amount
            ),
        }
    }
}
