use std::str::FromStr;

use crate::domain::Error;

pub const ACCOUNT_ID_LEN: usize = 20;

/// Address-like account identifier, written as `0x` followed by 40 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// The zero address. Never a valid payout recipient.
    pub const NULL: Self = Self([0u8; ACCOUNT_ID_LEN]);

    /// Builds an id whose trailing eight bytes hold `value` (big endian).
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        bytes[ACCOUNT_ID_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl FromStr for AccountId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| Error::Ingestion(format!("Invalid account id {}: {}", s, e)))?;

        Ok(Self(bytes))
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
