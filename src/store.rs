use std::collections::HashMap;

use crate::domain::{AccountId, BalanceStore, Money};

#[derive(Default, Debug)]
pub struct InMemoryStore {
    balances: HashMap<AccountId, Money>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }
}

impl BalanceStore for InMemoryStore {
    fn balance(&self, account: &AccountId) -> Option<Money> {
        self.balances.get(account).copied()
    }

    fn get_or_create(&mut self, account: &AccountId) -> &mut Money {
        self.balances.entry(*account).or_default()
    }

    fn accounts(&self) -> Vec<(AccountId, Money)> {
        let mut accounts: Vec<_> = self
            .balances
            .iter()
            .map(|(account, balance)| (*account, *balance))
            .collect();
        accounts.sort_by_key(|(account, _)| *account);
        accounts
    }
}
