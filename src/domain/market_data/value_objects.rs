use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::errors::{AppError, DomainResult};

/// Value Object - Price quoted in USD
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// `$` followed by the en-US locale rendering with exactly two fraction
    /// digits, e.g. `$1,234.56` or `$-3.50`.
    ///
    /// Rounds the shortest decimal form of the value half away from zero, so
    /// `1.005` becomes `$1.01` as it does in the browser.
    pub fn format_usd(&self) -> String {
        if self.0.is_nan() {
            return "$NaN".to_string();
        }
        let sign = if self.0.is_sign_negative() { "-" } else { "" };
        if self.0.is_infinite() {
            return format!("${sign}∞");
        }
        let (whole, cents) = round_to_cents(&self.0.abs().to_string());
        format!("${sign}{}.{cents}", group_thousands(&whole))
    }

    pub fn offset_by(&self, delta: f64) -> Self {
        Self(self.0 + delta)
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Two-digit rounding of a plain decimal string such as `1234.565`.
fn round_to_cents(decimal: &str) -> (String, String) {
    let (whole, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));
    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let (whole, cents) = text.split_at(text.len() - 2);
    (whole.to_string(), cents.to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Value Object - tradable pair label such as `NGN/USD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct Instrument(String);

impl Instrument {
    pub fn new(label: impl Into<String>) -> DomainResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(AppError::Validation("Instrument label cannot be empty".to_string()));
        }
        Ok(Self(label))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Instrument {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// X-axis slot of the synthetic trend line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum SampleSlot {
    #[strum(serialize = "1m")]
    #[serde(rename = "1m")]
    OneMinute,

    #[strum(serialize = "2m")]
    #[serde(rename = "2m")]
    TwoMinutes,

    #[strum(serialize = "3m")]
    #[serde(rename = "3m")]
    ThreeMinutes,

    #[strum(serialize = "4m")]
    #[serde(rename = "4m")]
    FourMinutes,

    #[strum(serialize = "5m")]
    #[serde(rename = "5m")]
    FiveMinutes,
}

impl SampleSlot {
    pub const COUNT: usize = 5;

    pub fn label(&self) -> &str {
        self.as_ref()
    }

    /// The first slot carries the unjittered snapshot price.
    pub fn is_anchor(&self) -> bool {
        matches!(self, Self::OneMinute)
    }
}

/// Value Object - one point of the trend line
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct SamplePoint {
    pub slot: SampleSlot,
    pub value: Price,
}
