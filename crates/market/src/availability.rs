//! Availability query.
//!
//! Per asset, the first failing predicate decides:
//! status, category, build year, capacity, region, contracts, requests.

use thiserror::Error;

use rigops_assets::{Asset, Booking, BookingRef, Contract, QuotationRequest};

use crate::config::AvailabilityConfig;
use crate::filter::AssessmentFilter;

/// Why an asset is not a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("asset is not active")]
    Inactive,
    #[error("category does not match")]
    CategoryMismatch,
    #[error("built {year_built}, minimum is {min_year}")]
    BuiltBefore { year_built: i32, min_year: i32 },
    #[error("capacity {capacity} below minimum {min_capacity}")]
    CapacityBelow { capacity: u64, min_capacity: u64 },
    #[error("location outside requested region")]
    OutsideRegion,
    #[error("booked by {0}")]
    Booked(BookingRef),
}

/// Borrowed view of the records the query runs over.
#[derive(Debug, Clone, Copy)]
pub struct MarketSnapshot<'a> {
    pub assets: &'a [Asset],
    pub contracts: &'a [Contract],
    pub requests: &'a [QuotationRequest],
}

impl<'a> MarketSnapshot<'a> {
    pub fn new(
        assets: &'a [Asset],
        contracts: &'a [Contract],
        requests: &'a [QuotationRequest],
    ) -> Self {
        Self {
            assets,
            contracts,
            requests,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityFilter {
    config: AvailabilityConfig,
}

impl AvailabilityFilter {
    pub fn new(config: AvailabilityConfig) -> Self {
        Self { config }
    }

    /// Check one asset against `filters` and the current bookings.
    pub fn evaluate(
        &self,
        filters: &AssessmentFilter,
        asset: &Asset,
        contracts: &[Contract],
        requests: &[QuotationRequest],
    ) -> Result<(), Rejection> {
        if !asset.is_active() {
            return Err(Rejection::Inactive);
        }
        if !filters.category.accepts(asset.category) {
            return Err(Rejection::CategoryMismatch);
        }
        if let Some(min_year) = filters.year_threshold() {
            if asset.year_built < min_year {
                return Err(Rejection::BuiltBefore {
                    year_built: asset.year_built,
                    min_year,
                });
            }
        }
        if let Some(min_capacity) = filters.capacity_threshold() {
            let capacity = asset.capacity_value();
            if capacity < min_capacity {
                return Err(Rejection::CapacityBelow {
                    capacity,
                    min_capacity,
                });
            }
        }
        if let Some(needle) = filters.region_needle() {
            if !asset.location.to_lowercase().contains(&needle) {
                return Err(Rejection::OutsideRegion);
            }
        }

        // Without a complete window nothing can overlap.
        let Some(window) = filters.window() else {
            return Ok(());
        };
        let key = self.config.join_key;

        if let Some(contract) = contracts.iter().find(|c| c.holds(asset, &window, key)) {
            return Err(Rejection::Booked(contract.booking_ref()));
        }
        if let Some(request) = requests.iter().find(|r| r.holds(asset, &window, key)) {
            return Err(Rejection::Booked(request.booking_ref()));
        }
        Ok(())
    }

    /// Assets that pass every check, in input order.
    pub fn candidates(&self, filters: &AssessmentFilter, market: MarketSnapshot<'_>) -> Vec<Asset> {
        let candidates: Vec<Asset> = market
            .assets
            .iter()
            .filter(|asset| {
                match self.evaluate(filters, asset, market.contracts, market.requests) {
                    Ok(()) => true,
                    Err(reason) => {
                        tracing::debug!(asset = %asset.name, %reason, "asset excluded");
                        false
                    }
                }
            })
            .cloned()
            .collect();

        tracing::debug!(
            considered = market.assets.len(),
            candidates = candidates.len(),
            "market availability evaluated"
        );
        candidates
    }
}

/// [`AvailabilityFilter::candidates`] with the default (name-join) config.
pub fn find_available_assets(
    filters: &AssessmentFilter,
    assets: &[Asset],
    contracts: &[Contract],
    requests: &[QuotationRequest],
) -> Vec<Asset> {
    AvailabilityFilter::default().candidates(filters, MarketSnapshot::new(assets, contracts, requests))
}
