//! One module per decodable ledger-object kind.

pub mod account_root;
pub mod amm;
pub mod check;
pub mod deposit_preauth;
pub mod escrow;
pub mod offer;
pub mod pay_channel;
pub mod ripple_state;
pub mod signer_list;
pub mod ticket;

pub use account_root::AccountRootObject;
pub use amm::{AmmObject, AuctionSlot, AuthAccount, AuthAccountWrapper, VoteEntry, VoteEntryWrapper};
pub use check::CheckObject;
pub use deposit_preauth::DepositPreauthObject;
pub use escrow::EscrowObject;
pub use offer::OfferObject;
pub use pay_channel::PayChannelObject;
pub use ripple_state::RippleStateObject;
pub use signer_list::{SignerEntry, SignerEntryWrapper, SignerListObject};
pub use ticket::TicketObject;

/// Directory page hint written when an object sits on the first page.
pub(crate) fn first_page() -> String {
    "0000000000000000".into()
}
