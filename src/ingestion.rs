use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::domain::traits::CommandStream;
use crate::domain::{AccountId, Command, CommandKind, Error, Money};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Result<Self, Error> {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Ok(Self { reader: Some(rdr) })
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    op: String,
    caller: String,
    recipient: Option<String>,
    amount: Option<Money>,
}

impl TryFrom<CsvRow> for Command {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let caller: AccountId = row.caller.parse()?;
        let recipient = row
            .recipient
            .filter(|r| !r.trim().is_empty())
            .map(|r| r.parse::<AccountId>())
            .transpose()?;

        let kind = match (
            row.op.trim().to_ascii_lowercase().as_str(),
            recipient,
            row.amount,
        ) {
            ("deposit", None, Some(amount)) => CommandKind::Deposit { amount },
            ("withdraw", None, None) => CommandKind::Withdraw,
            ("send" | "sendoutsaving", Some(recipient), Some(amount)) => {
                CommandKind::SendOutSaving { recipient, amount }
            }
            (other, _, _) => {
                return Err(Error::Ingestion(format!(
                    "Invalid command: {} for caller {}",
                    other, caller
                )));
            }
        };

        Ok(Command { kind, caller })
    }
}

impl<R: Read + Send + 'static> CommandStream for CsvReader<R> {
    type CmdStream = Pin<Box<dyn Stream<Item = Result<Command, Error>> + Send>>;

    fn stream(&mut self) -> Self::CmdStream {
        // Take ownership of the reader so the iterator we build owns all data and is 'static.
        let reader = match self.reader.take() {
            Some(r) => r,
            None => {
                // Already consumed; return an empty stream.
                return Box::pin(stream::iter(Vec::<Result<Command, Error>>::new()));
            }
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Command::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::CsvReader;
    use crate::domain::traits::CommandStream;
    use crate::domain::{AccountId, Command, CommandKind, Error, Money};

    const A: &str = "0x00000000000000000000000000000000000000a1";
    const C: &str = "0x00000000000000000000000000000000000000c3";

    async fn read_all(input: String) -> Vec<Result<Command, Error>> {
        let mut reader = CsvReader::new(std::io::Cursor::new(input.into_bytes())).unwrap();
        reader.stream().collect().await
    }

    #[tokio::test]
    async fn parses_each_command_kind() {
        let input = format!(
            "op, caller, recipient, amount\n\
             deposit, {A}, , 1.5\n\
             Withdraw, {A}, ,\n\
             send, {A}, {C}, 0.25\n"
        );

        let commands: Vec<Command> = read_all(input)
            .await
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        let a = AccountId::from_low_u64(0xa1);
        let c = AccountId::from_low_u64(0xc3);
        assert_eq!(
            commands,
            vec![
                Command {
                    kind: CommandKind::Deposit {
                        amount: Money::from_decimal_str("1.5").unwrap()
                    },
                    caller: a,
                },
                Command {
                    kind: CommandKind::Withdraw,
                    caller: a,
                },
                Command {
                    kind: CommandKind::SendOutSaving {
                        recipient: c,
                        amount: Money::from_decimal_str("0.25").unwrap()
                    },
                    caller: a,
                },
            ]
        );
    }

    #[tokio::test]
    async fn malformed_rows_become_errors_without_stopping_the_stream() {
        let input = format!(
            "op, caller, recipient, amount\n\
             withdraw, {A}, , 1.0\n\
             send, {A}, , 1.0\n\
             deposit, 0x12, , 1.0\n\
             deposit, {A}, , -1\n\
             launder, {A}, , 1.0\n\
             deposit, {A}, , 1.0\n"
        );

        let results = read_all(input).await;

        assert_eq!(results.len(), 6);
        assert!(results[..5].iter().all(|r| r.is_err()));
        assert!(results[5].is_ok());
    }

    #[tokio::test]
    async fn zero_amounts_parse_and_are_left_to_the_ledger() {
        let input = format!("op, caller, recipient, amount\ndeposit, {A}, , 0\n");

        let results = read_all(input).await;

        assert!(matches!(
            &results[0],
            Ok(Command {
                kind: CommandKind::Deposit { amount },
                ..
            }) if amount.is_zero()
        ));
    }

    #[tokio::test]
    async fn stream_is_consumed_once() {
        let input = format!("op, caller, recipient, amount\ndeposit, {A}, , 1\n");
        let mut reader = CsvReader::new(std::io::Cursor::new(input.into_bytes())).unwrap();

        assert_eq!(reader.stream().count().await, 1);
        assert_eq!(reader.stream().count().await, 0);
    }
}
