use serde::{Deserialize, Deserializer};

/// Non-negative amount of value in minor units (18 decimals per major unit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(pub u128);

impl Money {
    pub const DECIMALS: u32 = 18;
    pub const SCALE: u128 = 1_000_000_000_000_000_000;
    pub const ZERO: Self = Self(0);

    pub fn as_minor(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Whole major units, e.g. `Money::units(2)` is `2.0`.
    pub fn units(units: u64) -> Self {
        Self(u128::from(units) * Self::SCALE)
    }

    /// Parses a major-unit decimal such as `1`, `0.5` or `12.000000000000000001`.
    ///
    /// Negative values, values finer than one minor unit and values past
    /// `u128::MAX` minor units are rejected rather than rounded.
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let s = s.trim();
        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty()
            || !all_digits(int_part)
            || !all_digits(frac_part)
            || frac_part.len() > Self::DECIMALS as usize
        {
            return None;
        }

        let int_val = int_part.parse::<u128>().ok()?.checked_mul(Self::SCALE)?;
        let frac_val = if frac_part.is_empty() {
            0
        } else {
            let pad = Self::DECIMALS - frac_part.len() as u32;
            frac_part.parse::<u128>().ok()? * 10u128.pow(pad)
        };

        int_val.checked_add(frac_val).map(Self)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let int_part = self.0 / Self::SCALE;
        let frac_part = self.0 % Self::SCALE;
        if frac_part == 0 {
            return write!(f, "{}", int_part);
        }

        let frac = format!("{:018}", frac_part);
        write!(f, "{}.{}", int_part, frac.trim_end_matches('0'))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_decimal_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid Money format: {}", s)))
    }
}
