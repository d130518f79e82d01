use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::Hash256;

/// Opaque ledger-object kind discriminator, e.g. `"AccountRoot"`.
///
/// Tags are compared by value. A tag need not name a kind in the
/// [`LedgerEntryType`] catalog: servers ship new kinds between releases and
/// metadata carrying them must still be readable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryTypeTag(String);

impl EntryTypeTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The catalog entry for this tag, if it is a known kind.
    pub fn entry_type(&self) -> Option<LedgerEntryType> {
        LedgerEntryType::from_tag(&self.0)
    }
}

impl fmt::Debug for EntryTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryTypeTag({})", self.0)
    }
}

impl fmt::Display for EntryTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryTypeTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for EntryTypeTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl From<LedgerEntryType> for EntryTypeTag {
    fn from(kind: LedgerEntryType) -> Self {
        Self(kind.as_str().to_string())
    }
}

/// Ledger-object kinds known to this build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LedgerEntryType {
    AccountRoot,
    Amendments,
    Amm,
    Bridge,
    Check,
    DepositPreauth,
    Did,
    DirectoryNode,
    Escrow,
    FeeSettings,
    LedgerHashes,
    NegativeUnl,
    NfTokenOffer,
    NfTokenPage,
    Offer,
    Oracle,
    PayChannel,
    RippleState,
    SignerList,
    Ticket,
}

impl LedgerEntryType {
    /// Every kind in the catalog, in wire-name order.
    pub const ALL: [LedgerEntryType; 20] = [
        Self::AccountRoot,
        Self::Amendments,
        Self::Amm,
        Self::Bridge,
        Self::Check,
        Self::DepositPreauth,
        Self::Did,
        Self::DirectoryNode,
        Self::Escrow,
        Self::FeeSettings,
        Self::LedgerHashes,
        Self::NegativeUnl,
        Self::NfTokenOffer,
        Self::NfTokenPage,
        Self::Offer,
        Self::Oracle,
        Self::PayChannel,
        Self::RippleState,
        Self::SignerList,
        Self::Ticket,
    ];

    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountRoot => "AccountRoot",
            Self::Amendments => "Amendments",
            Self::Amm => "AMM",
            Self::Bridge => "Bridge",
            Self::Check => "Check",
            Self::DepositPreauth => "DepositPreauth",
            Self::Did => "DID",
            Self::DirectoryNode => "DirectoryNode",
            Self::Escrow => "Escrow",
            Self::FeeSettings => "FeeSettings",
            Self::LedgerHashes => "LedgerHashes",
            Self::NegativeUnl => "NegativeUNL",
            Self::NfTokenOffer => "NFTokenOffer",
            Self::NfTokenPage => "NFTokenPage",
            Self::Offer => "Offer",
            Self::Oracle => "Oracle",
            Self::PayChannel => "PayChannel",
            Self::RippleState => "RippleState",
            Self::SignerList => "SignerList",
            Self::Ticket => "Ticket",
        }
    }

    /// Look up a kind by wire name. Unknown names yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    pub fn tag(&self) -> EntryTypeTag {
        EntryTypeTag::from(*self)
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one ledger object: its key and its kind.
///
/// Present on every affected node, whether or not the object's fields can
/// be decoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentifier {
    #[serde(rename = "LedgerIndex")]
    pub ledger_index: Hash256,
    #[serde(rename = "LedgerEntryType")]
    pub entry_type: EntryTypeTag,
}

impl ObjectIdentifier {
    pub fn new(ledger_index: Hash256, entry_type: impl Into<EntryTypeTag>) -> Self {
        Self {
            ledger_index,
            entry_type: entry_type.into(),
        }
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.entry_type, self.ledger_index.short_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_roundtrips_through_its_tag() {
        for kind in LedgerEntryType::ALL {
            assert_eq!(LedgerEntryType::from_tag(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(LedgerEntryType::from_tag("MPTokenIssuance"), None);
        assert_eq!(LedgerEntryType::from_tag(""), None);
        assert_eq!(EntryTypeTag::from("NotAKind").entry_type(), None);
    }

    #[test]
    fn tags_compare_by_value() {
        assert_eq!(EntryTypeTag::from("Offer"), LedgerEntryType::Offer.tag());
        assert_ne!(EntryTypeTag::from("offer"), LedgerEntryType::Offer.tag());
    }

    #[test]
    fn acronym_kinds_use_wire_spelling() {
        assert_eq!(LedgerEntryType::Amm.as_str(), "AMM");
        assert_eq!(LedgerEntryType::NegativeUnl.as_str(), "NegativeUNL");
        assert_eq!(LedgerEntryType::NfTokenPage.as_str(), "NFTokenPage");
    }

    #[test]
    fn identifier_display_is_short() {
        let id = ObjectIdentifier::new(Hash256::zero(), LedgerEntryType::Offer);
        assert_eq!(id.to_string(), "Offer 00000000");
    }

    #[test]
    fn tag_serializes_as_plain_string() {
        let json = serde_json::to_string(&EntryTypeTag::from("Ticket")).unwrap();
        assert_eq!(json, "\"Ticket\"");
    }
}
