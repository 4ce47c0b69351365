//! In-memory stand-in for the external value medium.
//!
//! Tracks what each external account has been paid. Recipients can refuse
//! payments or run a receive hook that calls back into the paying ledger.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{AccountId, BalanceStore, Error, Money, ValueMedium};
use crate::ledger::Ledger;

pub type ReceiveHook<S> = Box<dyn FnMut(&mut Ledger<S>, &mut Network<S>, Money)>;

pub struct Network<S> {
    balances: HashMap<AccountId, Money>,
    rejecting: HashSet<AccountId>,
    hooks: HashMap<AccountId, ReceiveHook<S>>,
}

impl<S> Network<S>
where
    S: BalanceStore,
{
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            rejecting: HashSet::new(),
            hooks: HashMap::new(),
        }
    }

    pub fn balance_of(&self, account: &AccountId) -> Money {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Every account that has received a payment, ordered by account id.
    pub fn balances(&self) -> Vec<(AccountId, Money)> {
        let mut balances: Vec<_> = self
            .balances
            .iter()
            .map(|(account, balance)| (*account, *balance))
            .collect();
        balances.sort_by_key(|(account, _)| *account);
        balances
    }

    /// Payments to `account` fail from now on.
    pub fn reject_payments(&mut self, account: AccountId) {
        self.rejecting.insert(account);
    }

    /// Runs `hook` after `account` is credited, with the paying ledger still
    /// mid-operation.
    ///
    /// The hook is detached while it runs, so nested payments to the same
    /// account do not fire it again.
    pub fn on_receive<F>(&mut self, account: AccountId, hook: F)
    where
        F: FnMut(&mut Ledger<S>, &mut Network<S>, Money) + 'static,
    {
        self.hooks.insert(account, Box::new(hook));
    }
}

impl<S> Default for Network<S>
where
    S: BalanceStore,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ValueMedium<S> for Network<S>
where
    S: BalanceStore,
{
    fn transfer(
        &mut self,
        ledger: &mut Ledger<S>,
        to: &AccountId,
        amount: Money,
    ) -> Result<(), Error> {
        if self.rejecting.contains(to) {
            return Err(Error::Transfer {
                to: *to,
                amount,
                reason: "recipient rejected payment".to_string(),
            });
        }

        let balance = self.balances.entry(*to).or_default();
        *balance = balance.checked_add(amount).ok_or_else(|| Error::Transfer {
            to: *to,
            amount,
            reason: "recipient balance overflow".to_string(),
        })?;
        debug!(%to, %amount, "payment delivered");

        if let Some(mut hook) = self.hooks.remove(to) {
            hook(ledger, self, amount);
            self.hooks.entry(*to).or_insert(hook);
        }

        Ok(())
    }
}
