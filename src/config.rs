use std::path::PathBuf;

use crate::domain::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV file of ledger commands to replay.
    pub input: PathBuf,
}

impl Config {
    /// Reads `<program> <commands.csv>`.
    pub fn from_args<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "save_ether".to_string());

        let input = args
            .next()
            .ok_or_else(|| Error::Config(format!("usage: {} <commands.csv>", program)))?;

        if let Some(extra) = args.next() {
            return Err(Error::Config(format!("unexpected argument: {}", extra)));
        }

        Ok(Self {
            input: PathBuf::from(input),
        })
    }
}
