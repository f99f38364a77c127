//! JSON snapshot of the dashboard state the commands run against.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use rigops_assets::{Asset, Contract, QuotationRequest};
use rigops_core::Clock;
use rigops_market::{AssessmentFilter, AvailabilityFilter, MarketSnapshot};
use rigops_tender::{BidBoard, BidDisplay, SealOverrides, Tender};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub assets: Vec<Asset>,
    pub contracts: Vec<Contract>,
    pub requests: Vec<QuotationRequest>,
    pub filters: AssessmentFilter,
    pub tenders: Vec<Tender>,
    pub overrides: SealOverrides,
}

impl Snapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn market(&self) -> MarketSnapshot<'_> {
        MarketSnapshot::new(&self.assets, &self.contracts, &self.requests)
    }

    /// One line per asset: available, or excluded with the reason.
    pub fn assessment_lines(&self, filter: &AvailabilityFilter) -> Vec<String> {
        let market = self.market();
        let mut available = 0usize;
        let lines: Vec<String> = market
            .assets
            .iter()
            .map(|asset| {
                match filter.evaluate(&self.filters, asset, market.contracts, market.requests) {
                    Ok(()) => {
                        available += 1;
                        format!("AVAILABLE  {}", asset.name)
                    }
                    Err(reason) => format!("excluded   {} ({reason})", asset.name),
                }
            })
            .collect();
        tracing::info!(
            assets = market.assets.len(),
            candidates = available,
            "market assessment computed"
        );
        lines
    }

    /// Every tender's header followed by its bid lines, as of `clock`.
    pub fn bid_lines(&self, clock: &dyn Clock, display: &BidDisplay) -> Vec<String> {
        let mut lines = Vec::new();
        for tender in &self.tenders {
            let board = BidBoard::render(tender, &self.overrides, clock, display);
            let state = if board.sealed { "sealed" } else { "open" };
            lines.push(format!("{} [{state}]", tender.title));
            for line in &board.lines {
                lines.push(format!("  {:<30} {}", line.vendor, line.amount_display));
            }
        }
        lines
    }
}
