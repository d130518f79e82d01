use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A classic account address (`r...`).
///
/// Only the outer shape is checked; checksum verification belongs to the
/// address codec, not to metadata decoding.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Result<Self, TypeError> {
        let address = address.into();
        let well_formed = address.starts_with('r')
            && (25..=35).contains(&address.len())
            && address.chars().all(|c| c.is_ascii_alphanumeric());
        if !well_formed {
            return Err(TypeError::InvalidAddress(address));
        }
        Ok(Self(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// An amount of XRP in drops. Written on the wire as a decimal string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct XrpAmount(u64);

impl XrpAmount {
    pub const fn from_drops(drops: u64) -> Self {
        Self(drops)
    }

    pub fn drops(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for XrpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} drops", self.0)
    }
}

impl TryFrom<String> for XrpAmount {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidAmount(s))
    }
}

impl From<XrpAmount> for String {
    fn from(amount: XrpAmount) -> Self {
        amount.0.to_string()
    }
}

/// An amount of a non-XRP currency issued by an account.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssuedCurrencyAmount {
    pub currency: String,
    pub issuer: Address,
    /// Decimal value as written by the server; kept textual to avoid rounding.
    pub value: String,
}

impl fmt::Display for IssuedCurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.value, self.currency, self.issuer)
    }
}

/// Either shape of amount a ledger field may hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyAmount {
    Xrp(XrpAmount),
    Issued(IssuedCurrencyAmount),
}

impl CurrencyAmount {
    pub fn is_xrp(&self) -> bool {
        matches!(self, Self::Xrp(_))
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xrp(amount) => write!(f, "{amount}"),
            Self::Issued(amount) => write!(f, "{amount}"),
        }
    }
}

impl From<XrpAmount> for CurrencyAmount {
    fn from(amount: XrpAmount) -> Self {
        Self::Xrp(amount)
    }
}

impl From<IssuedCurrencyAmount> for CurrencyAmount {
    fn from(amount: IssuedCurrencyAmount) -> Self {
        Self::Issued(amount)
    }
}

/// An asset specification without a quantity: XRP, or a currency plus issuer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Address>,
}

impl Issue {
    pub fn xrp() -> Self {
        Self {
            currency: "XRP".into(),
            issuer: None,
        }
    }
}
