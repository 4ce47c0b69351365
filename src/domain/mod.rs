pub mod account;
pub mod command;
pub mod error;
pub mod event;
pub mod money;
pub mod traits;

pub use account::AccountId;
pub use command::{Command, CommandKind};
pub use error::{Error, LedgerError, ValueAction};
pub use event::LedgerEvent;
pub use money::Money;
pub use traits::{BalanceStore, CommandStream, DeadLetterQueue, ValueMedium};
