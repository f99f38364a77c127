//! Tenders and the sealed-bid gate.
//!
//! Bid amounts stay masked until the tender's opening date, a manual
//! override, or closing the tender. Every decision re-reads the injected
//! [`rigops_core::Clock`].

pub mod board;
pub mod config;
pub mod seal;
pub mod tender;

pub use board::{BidBoard, BidLine, lowest_bid};
pub use config::BidDisplay;
pub use seal::{SEALED_MASK, SealOverrides, can_open_bids, can_open_bids_str, is_sealed, seal_bid};
pub use tender::{Tender, TenderBid, TenderStatus};
