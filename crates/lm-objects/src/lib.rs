//! Typed ledger-object schemas.
//!
//! Each decodable kind is a plain serde record with the field set the ledger
//! documents for it. [`LedgerObject`] dispatches on the `LedgerEntryType`
//! field, and [`SchemaDecoder`] is the seam through which metadata decoding
//! asks for a typed snapshot of one record.
//!
//! # Key Types
//!
//! - [`LedgerObject`] — Any decodable ledger object
//! - [`SchemaDecoder`] / [`SerdeSchema`] — Per-kind decode contract and its serde implementation
//! - [`ObjectError`] — Why a record could not be decoded

pub mod error;
pub mod kinds;
pub mod object;
pub mod schema;

pub use error::ObjectError;
pub use kinds::{
    AccountRootObject, AmmObject, AuctionSlot, AuthAccount, AuthAccountWrapper, CheckObject,
    DepositPreauthObject, EscrowObject, OfferObject, PayChannelObject, RippleStateObject,
    SignerEntry, SignerEntryWrapper, SignerListObject, TicketObject, VoteEntry, VoteEntryWrapper,
};
pub use object::{LedgerObject, DECODABLE_KINDS};
pub use schema::{SchemaDecoder, SerdeSchema};
