use serde::{Deserialize, Serialize};

use lm_types::{Hash256, LedgerEntryType, LedgerIndex};

use crate::kinds::{
    AccountRootObject, AmmObject, CheckObject, DepositPreauthObject, EscrowObject, OfferObject,
    PayChannelObject, RippleStateObject, SignerListObject, TicketObject,
};

/// Kinds that have a full typed schema in this crate.
///
/// Must list exactly the variants of [`LedgerObject`].
pub const DECODABLE_KINDS: [LedgerEntryType; 10] = [
    LedgerEntryType::AccountRoot,
    LedgerEntryType::Amm,
    LedgerEntryType::Check,
    LedgerEntryType::DepositPreauth,
    LedgerEntryType::Escrow,
    LedgerEntryType::Offer,
    LedgerEntryType::PayChannel,
    LedgerEntryType::RippleState,
    LedgerEntryType::SignerList,
    LedgerEntryType::Ticket,
];

/// A fully decoded ledger object, discriminated by its `LedgerEntryType`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "LedgerEntryType")]
pub enum LedgerObject {
    AccountRoot(AccountRootObject),
    #[serde(rename = "AMM")]
    Amm(AmmObject),
    Check(CheckObject),
    DepositPreauth(DepositPreauthObject),
    Escrow(EscrowObject),
    Offer(OfferObject),
    PayChannel(PayChannelObject),
    RippleState(RippleStateObject),
    SignerList(SignerListObject),
    Ticket(TicketObject),
}

impl LedgerObject {
    pub fn entry_type(&self) -> LedgerEntryType {
        match self {
            Self::AccountRoot(_) => LedgerEntryType::AccountRoot,
            Self::Amm(_) => LedgerEntryType::Amm,
            Self::Check(_) => LedgerEntryType::Check,
            Self::DepositPreauth(_) => LedgerEntryType::DepositPreauth,
            Self::Escrow(_) => LedgerEntryType::Escrow,
            Self::Offer(_) => LedgerEntryType::Offer,
            Self::PayChannel(_) => LedgerEntryType::PayChannel,
            Self::RippleState(_) => LedgerEntryType::RippleState,
            Self::SignerList(_) => LedgerEntryType::SignerList,
            Self::Ticket(_) => LedgerEntryType::Ticket,
        }
    }

    /// The object's key in the ledger state tree.
    pub fn index(&self) -> Hash256 {
        match self {
            Self::AccountRoot(o) => o.index,
            Self::Amm(o) => o.index,
            Self::Check(o) => o.index,
            Self::DepositPreauth(o) => o.index,
            Self::Escrow(o) => o.index,
            Self::Offer(o) => o.index,
            Self::PayChannel(o) => o.index,
            Self::RippleState(o) => o.index,
            Self::SignerList(o) => o.index,
            Self::Ticket(o) => o.index,
        }
    }

    /// Hash of the last transaction to touch this object, if the kind tracks it.
    pub fn previous_txn_id(&self) -> Option<Hash256> {
        match self {
            Self::AccountRoot(o) => Some(o.previous_txn_id),
            Self::Amm(o) => o.previous_txn_id,
            Self::Check(o) => Some(o.previous_txn_id),
            Self::DepositPreauth(o) => Some(o.previous_txn_id),
            Self::Escrow(o) => Some(o.previous_txn_id),
            Self::Offer(o) => Some(o.previous_txn_id),
            Self::PayChannel(o) => Some(o.previous_txn_id),
            Self::RippleState(o) => Some(o.previous_txn_id),
            Self::SignerList(o) => Some(o.previous_txn_id),
            Self::Ticket(o) => Some(o.previous_txn_id),
        }
    }

    pub fn previous_txn_lgr_seq(&self) -> Option<LedgerIndex> {
        match self {
            Self::AccountRoot(o) => Some(o.previous_txn_lgr_seq),
            Self::Amm(o) => o.previous_txn_lgr_seq,
            Self::Check(o) => Some(o.previous_txn_lgr_seq),
            Self::DepositPreauth(o) => Some(o.previous_txn_lgr_seq),
            Self::Escrow(o) => Some(o.previous_txn_lgr_seq),
            Self::Offer(o) => Some(o.previous_txn_lgr_seq),
            Self::PayChannel(o) => Some(o.previous_txn_lgr_seq),
            Self::RippleState(o) => Some(o.previous_txn_lgr_seq),
            Self::SignerList(o) => Some(o.previous_txn_lgr_seq),
            Self::Ticket(o) => Some(o.previous_txn_lgr_seq),
        }
    }
}
