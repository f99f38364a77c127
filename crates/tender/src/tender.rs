use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use rigops_core::{DomainError, DomainResult, TenderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenderStatus {
    Open,
    Evaluation,
    Closed,
}

/// One vendor's submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderBid {
    pub vendor: String,
    /// Whole currency units. `None` when the vendor has not priced yet.
    #[serde(default)]
    pub bid_amount: Option<u64>,
    pub submitted_at: DateTime<Utc>,
}

/// Sourcing event with optional sealed bidding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tender {
    pub id: TenderId,
    pub title: String,
    /// Owner's cost estimate (HPS) used as the budget ceiling.
    #[serde(default)]
    pub hps: Option<u64>,
    /// Bids stay masked before this date unless overridden.
    #[serde(default)]
    pub bid_opening_date: Option<NaiveDate>,
    pub status: TenderStatus,
    #[serde(default)]
    pub bids: Vec<TenderBid>,
}

impl Tender {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TenderId::new(),
            title: title.into(),
            hps: None,
            bid_opening_date: None,
            status: TenderStatus::Open,
            bids: Vec::new(),
        }
    }

    pub fn with_opening_date(mut self, date: NaiveDate) -> Self {
        self.bid_opening_date = Some(date);
        self
    }

    pub fn with_hps(mut self, hps: u64) -> Self {
        self.hps = Some(hps);
        self
    }

    pub fn is_closed(&self) -> bool {
        self.status == TenderStatus::Closed
    }

    /// Record a vendor's bid. One bid per vendor; none once closed.
    pub fn submit_bid(
        &mut self,
        vendor: impl Into<String>,
        bid_amount: Option<u64>,
        submitted_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let vendor = vendor.into();
        if vendor.trim().is_empty() {
            return Err(DomainError::validation("vendor cannot be empty"));
        }
        if self.is_closed() {
            return Err(DomainError::invariant("cannot bid on a closed tender"));
        }
        if self.bids.iter().any(|b| b.vendor == vendor) {
            return Err(DomainError::conflict(format!("{vendor} has already bid")));
        }
        self.bids.push(TenderBid {
            vendor,
            bid_amount,
            submitted_at,
        });
        Ok(())
    }

    pub fn start_evaluation(&mut self) -> DomainResult<()> {
        if self.status != TenderStatus::Open {
            return Err(DomainError::invariant("only open tenders move to evaluation"));
        }
        self.status = TenderStatus::Evaluation;
        Ok(())
    }

    /// Closing is idempotent.
    pub fn close(&mut self) {
        self.status = TenderStatus::Closed;
    }
}
