// src/amount.rs
use std::fmt;

use alloy::primitives::{I256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SummaryError;

/// Signed token amount in raw (undenominated) units.
///
/// Backed by a 256-bit signed integer so sums of on-chain `u64` amounts can
/// never lose precision. Arithmetic is checked; overflow surfaces as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Amount(I256);

impl Amount {
    pub const ZERO: Self = Self(I256::ZERO);

    pub fn from_u64(value: u64) -> Self {
        Self(I256::from_raw(U256::from(value)))
    }

    /// Parse a base-10 string such as `"1000000"` or `"-59"`.
    ///
    /// Empty strings and bare signs are rejected rather than read as zero.
    pub fn parse(s: &str) -> Result<Self, SummaryError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('-')
            .or_else(|| trimmed.strip_prefix('+'))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SummaryError::InvalidAmount(s.to_string()));
        }

        let unsigned_plus = trimmed.starts_with('+');
        I256::from_dec_str(if unsigned_plus { digits } else { trimmed })
            .map(Self)
            .map_err(|_| SummaryError::InvalidAmount(s.to_string()))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Render the amount shifted by `denomination` decimal places.
    ///
    /// `-59` with denomination 1 becomes `"-5.9"`; trailing fractional zeros
    /// are dropped, so `1000000000` with denomination 9 becomes `"1"`.
    pub fn to_display(&self, denomination: u8) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let places = usize::from(denomination);

        let (int_part, frac_part) = if digits.len() > places {
            let (int_part, frac_part) = digits.split_at(digits.len() - places);
            (int_part.to_string(), frac_part.to_string())
        } else {
            ("0".to_string(), format!("{:0>width$}", digits, width = places))
        };

        let frac_part = frac_part.trim_end_matches('0');
        let sign = if self.is_negative() { "-" } else { "" };

        if frac_part.is_empty() {
            format!("{}{}", sign, int_part)
        } else {
            format!("{}{}.{}", sign, int_part, frac_part)
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Amounts travel as decimal strings (safe for JSON consumers without big ints)
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Unsigned(v) => Ok(Amount::from_u64(v)),
            Raw::Signed(v) => Amount::parse(&v.to_string()).map_err(serde::de::Error::custom),
            Raw::Text(s) => Amount::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> Amount {
        Amount::parse(s).unwrap()
    }

    #[test]
    fn display_shifts_by_denomination() {
        assert_eq!(amt("1000000000").to_display(9), "1");
        assert_eq!(amt("1500000000").to_display(9), "1.5");
        assert_eq!(amt("1").to_display(9), "0.000000001");
        assert_eq!(amt("-59").to_display(0), "-59");
        assert_eq!(amt("-59").to_display(1), "-5.9");
        assert_eq!(amt("-59").to_display(3), "-0.059");
        assert_eq!(Amount::ZERO.to_display(9), "0");
    }

    #[test]
    fn display_keeps_precision_beyond_u64() {
        let big = amt("123456789012345678901234567890");
        assert_eq!(big.to_display(18), "123456789012.34567890123456789");
    }

    #[test]
    fn checked_arithmetic() {
        let a = Amount::from_u64(40);
        let b = Amount::from_u64(99);
        let net = a.checked_sub(b).unwrap();
        assert!(net.is_negative());
        assert_eq!(net, amt("-59"));
        assert!(net.checked_add(Amount::from_u64(59)).unwrap().is_zero());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Amount::parse("12ab").is_err());
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("   ").is_err());
        assert!(Amount::parse("-").is_err());
        assert!(Amount::parse("+").is_err());
        assert!(Amount::parse("--5").is_err());
        assert!(Amount::parse("1 000").is_err());
    }

    #[test]
    fn accepts_signed_and_padded_input() {
        assert_eq!(amt(" 42 "), Amount::from_u64(42));
        assert_eq!(amt("+42"), Amount::from_u64(42));
        assert!(amt("-42").is_negative());
        assert!(amt("0").is_zero());
    }

    #[test]
    fn empty_wire_amount_is_an_error() {
        assert!(serde_json::from_str::<Amount>("\"\"").is_err());
        assert!(serde_json::from_str::<Amount>("\"-\"").is_err());
    }

    #[test]
    fn serde_accepts_strings_and_numbers() {
        let from_str: Amount = serde_json::from_str("\"1000\"").unwrap();
        let from_num: Amount = serde_json::from_str("1000").unwrap();
        assert_eq!(from_str, from_num);
        assert_eq!(serde_json::to_string(&from_num).unwrap(), "\"1000\"");
    }
}
