//! Custodial savings ledger.
//!
//! Holds value for depositors and pays it back out through a [`ValueMedium`].
//! Every operation either applies in full or leaves the ledger untouched.

use tracing::{debug, info, warn};

use crate::domain::{
    AccountId, BalanceStore, Error, LedgerError, LedgerEvent, Money, ValueAction, ValueMedium,
};

#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    held: Money,
    events: Vec<LedgerEvent>,
}

impl<S> Ledger<S>
where
    S: BalanceStore,
{
    /// Wraps `store`. The held total starts at the sum of its balances.
    pub fn new(store: S) -> Result<Self, Error> {
        let held = store
            .accounts()
            .into_iter()
            .try_fold(Money::ZERO, |acc, (_, balance)| acc.checked_add(balance))
            .ok_or(LedgerError::Overflow)?;

        Ok(Self {
            store,
            held,
            events: Vec::new(),
        })
    }

    pub fn deposit(&mut self, caller: &AccountId, amount: Money) -> Result<(), Error> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount(ValueAction::Save).into());
        }

        let balance = self
            .check_savings(caller)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let held = self.held.checked_add(amount).ok_or(LedgerError::Overflow)?;

        *self.store.get_or_create(caller) = balance;
        self.held = held;
        debug!(%caller, %amount, %balance, "deposit accepted");

        self.emit(LedgerEvent::SavingSuccessful {
            account: *caller,
            amount,
        });
        Ok(())
    }

    /// Pays the caller's whole balance back to the caller.
    ///
    /// The balance is zeroed before the medium is invoked, so a re-entrant
    /// withdrawal from the recipient fails with `NoSavings`.
    pub fn withdraw<M>(&mut self, caller: &AccountId, medium: &mut M) -> Result<Money, Error>
    where
        M: ValueMedium<S>,
    {
        let amount = self.check_savings(caller);
        if amount.is_zero() {
            return Err(LedgerError::NoSavings.into());
        }

        self.debit(caller, amount)?;
        debug!(%caller, %amount, "withdrawal debited");

        self.pay_out(caller, caller, amount, medium)?;
        Ok(amount)
    }

    /// Pays `amount` of the caller's savings to `recipient` outside the ledger.
    ///
    /// The recipient's own savings are not credited.
    pub fn send_out_saving<M>(
        &mut self,
        caller: &AccountId,
        recipient: &AccountId,
        amount: Money,
        medium: &mut M,
    ) -> Result<(), Error>
    where
        M: ValueMedium<S>,
    {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount(ValueAction::Send).into());
        }
        if recipient.is_null() {
            return Err(LedgerError::InvalidRecipient.into());
        }
        if self.check_savings(caller) < amount {
            return Err(LedgerError::InsufficientFunds.into());
        }

        self.debit(caller, amount)?;
        debug!(%caller, %recipient, %amount, "send out debited");

        self.pay_out(caller, recipient, amount, medium)
    }

    pub fn check_savings(&self, account: &AccountId) -> Money {
        self.store.balance(account).unwrap_or_default()
    }

    pub fn check_contract_bal(&self) -> Money {
        self.held
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn emit(&mut self, event: LedgerEvent) {
        info!(%event, "ledger event");
        self.events.push(event);
    }

    fn debit(&mut self, account: &AccountId, amount: Money) -> Result<(), Error> {
        let balance = self
            .check_savings(account)
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds)?;
        let held = self
            .held
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds)?;

        *self.store.get_or_create(account) = balance;
        self.held = held;
        Ok(())
    }

    fn pay_out<M>(
        &mut self,
        debited: &AccountId,
        to: &AccountId,
        amount: Money,
        medium: &mut M,
    ) -> Result<(), Error>
    where
        M: ValueMedium<S>,
    {
        if let Err(e) = medium.transfer(self, to, amount) {
            warn!(%debited, %to, %amount, error = %e, "payout failed, restoring savings");
            let balance = self.store.get_or_create(debited);
            *balance = balance.saturating_add(amount);
            self.held = self.held.saturating_add(amount);
            return Err(e);
        }
        Ok(())
    }
}
