use futures::Stream;

use crate::domain::{AccountId, Command, Error, Money};
use crate::ledger::Ledger;

pub trait CommandStream {
    type CmdStream: Stream<Item = Result<Command, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::CmdStream;
}

pub trait DeadLetterQueue {
    fn report(&self, command: Option<&Command>, error: &Error);
}

/// Persistent mapping from account to balance, owned by a single ledger.
///
/// Entries are never removed; a drained account keeps a zero entry.
pub trait BalanceStore {
    fn balance(&self, account: &AccountId) -> Option<Money>;

    fn get_or_create(&mut self, account: &AccountId) -> &mut Money;

    /// Every entry, ordered by account id.
    fn accounts(&self) -> Vec<(AccountId, Money)>;
}

/// Moves value out of the ledger to an external account.
///
/// The ledger hands itself to the medium, so the recipient may call back
/// into it before `transfer` returns.
pub trait ValueMedium<S: BalanceStore> {
    fn transfer(
        &mut self,
        ledger: &mut Ledger<S>,
        to: &AccountId,
        amount: Money,
    ) -> Result<(), Error>;
}
