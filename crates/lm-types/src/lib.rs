//! Scalar types shared by every ledger-meta crate.
//!
//! These are the leaf encodings the metadata decoder consumes: object keys,
//! kind tags, ledger sequences, and the two currency amount shapes.
//!
//! # Key Types
//!
//! - [`Hash256`] — 256-bit object key / transaction hash, uppercase hex on the wire
//! - [`EntryTypeTag`] — Opaque ledger-object kind discriminator
//! - [`LedgerEntryType`] — The catalog of kinds known at build time
//! - [`ObjectIdentifier`] — Hash key plus kind tag of one ledger object
//! - [`LedgerIndex`] — Ledger sequence number
//! - [`CurrencyAmount`] — XRP drops or an issued-currency amount

pub mod amount;
pub mod entry_type;
pub mod error;
pub mod hash;
pub mod sequence;

pub use amount::{Address, CurrencyAmount, Issue, IssuedCurrencyAmount, XrpAmount};
pub use entry_type::{EntryTypeTag, LedgerEntryType, ObjectIdentifier};
pub use error::TypeError;
pub use hash::Hash256;
pub use sequence::LedgerIndex;
