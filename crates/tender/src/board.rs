//! Bid board: what a tender's bid table shows right now.

use serde::Serialize;

use rigops_core::{Clock, DomainError, DomainResult, TenderId};

use crate::config::BidDisplay;
use crate::seal::{SealOverrides, is_sealed, seal_bid};
use crate::tender::{Tender, TenderBid};

/// One rendered row. Carries no raw amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidLine {
    pub vendor: String,
    pub amount_display: String,
    /// `Some` only for revealed bids with both an amount and an HPS.
    pub within_hps: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidBoard {
    pub tender_id: TenderId,
    pub sealed: bool,
    pub lines: Vec<BidLine>,
}

impl BidBoard {
    /// Render every bid of `tender`, masked or revealed as of `clock`.
    pub fn render(
        tender: &Tender,
        overrides: &SealOverrides,
        clock: &dyn Clock,
        display: &BidDisplay,
    ) -> Self {
        let sealed = is_sealed(tender, overrides, clock);
        let lines = tender
            .bids
            .iter()
            .map(|bid| BidLine {
                vendor: bid.vendor.clone(),
                amount_display: seal_bid(bid.bid_amount, sealed, display),
                within_hps: match (sealed, bid.bid_amount, tender.hps) {
                    (false, Some(amount), Some(hps)) => Some(amount <= hps),
                    _ => None,
                },
            })
            .collect();

        Self {
            tender_id: tender.id,
            sealed,
            lines,
        }
    }
}

/// Cheapest priced bid, once the tender is unsealed.
///
/// Ties keep the earliest submission. Asking while sealed is a precondition
/// failure so ranking cannot leak ahead of the opening.
pub fn lowest_bid<'a>(
    tender: &'a Tender,
    overrides: &SealOverrides,
    clock: &dyn Clock,
) -> DomainResult<Option<&'a TenderBid>> {
    if is_sealed(tender, overrides, clock) {
        return Err(DomainError::precondition(
            "bids are sealed until the opening date",
        ));
    }
    Ok(tender
        .bids
        .iter()
        .filter(|b| b.bid_amount.is_some())
        .min_by_key(|b| (b.bid_amount, b.submitted_at)))
}
