use std::collections::BTreeMap;
use std::io::Write;

use futures::StreamExt;
use tracing::debug;

use crate::domain::{
    AccountId, BalanceStore, Command, CommandKind, Error, Money,
    traits::{CommandStream, DeadLetterQueue},
};
use crate::ledger::Ledger;
use crate::network::Network;

pub struct Engine<I, D, S>
where
    I: CommandStream,
    D: DeadLetterQueue,
    S: BalanceStore,
{
    ingestion: I,
    ledger: Ledger<S>,
    network: Network<S>,
    dlq: D,
}

impl<I, D, S> Engine<I, D, S>
where
    I: CommandStream,
    D: DeadLetterQueue,
    S: BalanceStore,
{
    pub fn new(ingestion: I, store: S, dlq: D) -> Result<Self, Error> {
        Self::with_network(ingestion, store, Network::new(), dlq)
    }

    pub fn with_network(
        ingestion: I,
        store: S,
        network: Network<S>,
        dlq: D,
    ) -> Result<Self, Error> {
        Ok(Self {
            ingestion,
            ledger: Ledger::new(store)?,
            network,
            dlq,
        })
    }

    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();

        while let Some(cmd) = res.next().await {
            match cmd {
                Ok(cmd) => match self.apply_command(&cmd) {
                    Ok(()) => debug!(%cmd, "command applied"),
                    Err(e) => self.dlq.report(Some(&cmd), &e),
                },
                Err(e) => self.dlq.report(None, &e),
            }
        }

        Ok(())
    }

    fn apply_command(&mut self, cmd: &Command) -> Result<(), Error> {
        match cmd.kind {
            CommandKind::Deposit { amount } => self.ledger.deposit(&cmd.caller, amount),
            CommandKind::Withdraw => self
                .ledger
                .withdraw(&cmd.caller, &mut self.network)
                .map(|_| ()),
            CommandKind::SendOutSaving { recipient, amount } => {
                self.ledger
                    .send_out_saving(&cmd.caller, &recipient, amount, &mut self.network)
            }
        }
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn network(&self) -> &Network<S> {
        &self.network
    }

    /// Writes savings and received payouts per account, then the held total.
    pub fn flush<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        let mut rows: BTreeMap<AccountId, (Money, Money)> = BTreeMap::new();
        for (account, savings) in self.ledger.store().accounts() {
            rows.entry(account).or_default().0 = savings;
        }
        for (account, received) in self.network.balances() {
            rows.entry(account).or_default().1 = received;
        }

        writeln!(out, "account,savings,received")?;
        for (account, (savings, received)) in &rows {
            writeln!(out, "{},{},{}", account, savings, received)?;
        }
        writeln!(out, "contract_balance,{}", self.ledger.check_contract_bal())?;
        out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::dlq::MemoryDLQ;
    use crate::domain::{AccountId, Money};
    use crate::ingestion::CsvReader;
    use crate::network::Network;
    use crate::store::InMemoryStore;

    const A: &str = "0x00000000000000000000000000000000000000a1";
    const B: &str = "0x00000000000000000000000000000000000000b2";
    const C: &str = "0x00000000000000000000000000000000000000c3";
    const NULL: &str = "0x0000000000000000000000000000000000000000";

    fn engine(
        input: String,
    ) -> Engine<CsvReader<std::io::Cursor<Vec<u8>>>, MemoryDLQ, InMemoryStore> {
        let reader = CsvReader::new(std::io::Cursor::new(input.into_bytes())).unwrap();
        Engine::new(reader, InMemoryStore::new(), MemoryDLQ::default()).unwrap()
    }

    #[tokio::test]
    async fn replays_commands_and_reports_rejections() {
        let mut engine = engine(format!(
            "op, caller, recipient, amount\n\
             deposit, {A}, , 1.0\n\
             deposit, {B}, , 2\n\
             deposit, {A}, , 0\n\
             withdraw, {C}, ,\n\
             send, {A}, {C}, 0.25\n\
             send, {A}, {C}, 5\n\
             send, {A}, {NULL}, 0.1\n\
             withdraw, {B}, ,\n"
        ));

        engine.process().await.unwrap();

        let (a, b, c) = (
            AccountId::from_low_u64(0xa1),
            AccountId::from_low_u64(0xb2),
            AccountId::from_low_u64(0xc3),
        );
        let ledger = engine.ledger();
        assert_eq!(
            ledger.check_savings(&a),
            Money::from_decimal_str("0.75").unwrap()
        );
        assert_eq!(ledger.check_savings(&b), Money::ZERO);
        assert_eq!(ledger.check_savings(&c), Money::ZERO);
        assert_eq!(ledger.check_contract_bal(), ledger.check_savings(&a));
        assert_eq!(ledger.events().len(), 2);
        assert_eq!(engine.network().balance_of(&b), Money::units(2));
        assert_eq!(
            engine.network().balance_of(&c),
            Money::from_decimal_str("0.25").unwrap()
        );

        let reports = engine.dlq.reports();
        assert_eq!(reports.len(), 4);
        assert!(reports[0].ends_with("can't save zero value"));
        assert!(reports[1].ends_with("you don't have any savings"));
        assert!(reports[2].ends_with("Insufficient savings"));
        assert!(reports[3].ends_with("no zero address call"));
    }

    #[tokio::test]
    async fn rejected_payout_is_reported_and_rolled_back() {
        let reader = CsvReader::new(std::io::Cursor::new(
            format!("op, caller, recipient, amount\ndeposit, {A}, , 1\nwithdraw, {A}, ,\n")
                .into_bytes(),
        ))
        .unwrap();
        let a = AccountId::from_low_u64(0xa1);
        let mut network: Network<InMemoryStore> = Network::new();
        network.reject_payments(a);
        let mut engine =
            Engine::with_network(reader, InMemoryStore::new(), network, MemoryDLQ::default())
                .unwrap();

        engine.process().await.unwrap();

        assert_eq!(engine.ledger().check_savings(&a), Money::units(1));
        let reports = engine.dlq.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("recipient rejected payment"));
    }

    #[tokio::test]
    async fn flush_lists_every_account_once() {
        let mut engine = engine(format!(
            "op, caller, recipient, amount\n\
             deposit, {B}, , 2\n\
             deposit, {A}, , 1\n\
             send, {A}, {C}, 0.5\n"
        ));
        engine.process().await.unwrap();

        let mut out = Vec::new();
        engine.flush(&mut out).unwrap();

        let expected = format!(
            "account,savings,received\n\
             {A},0.5,0\n\
             {B},2,0\n\
             {C},0,0.5\n\
             contract_balance,2.5\n"
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
