//! How a contract or request claims an asset for a period.

use serde::{Deserialize, Serialize};

use rigops_core::{ContractId, DateRange, RequestId};

use crate::asset::Asset;

/// Which field links a booking to an asset.
///
/// `AssetName` is the legacy behaviour: exact display-name match, so renamed
/// or duplicated names silently mis-match. `AssetIdWithNameFallback` matches
/// on stable ids whenever the booking carries them and only falls back to the
/// name for records that have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKey {
    #[default]
    AssetName,
    AssetIdWithNameFallback,
}

/// Identity of whatever made an asset unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum BookingRef {
    Contract(ContractId),
    Request(RequestId),
}

impl core::fmt::Display for BookingRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BookingRef::Contract(id) => write!(f, "contract {id}"),
            BookingRef::Request(id) => write!(f, "request {id}"),
        }
    }
}

/// Something that can hold an asset for a date range.
pub trait Booking {
    fn booking_ref(&self) -> BookingRef;

    /// Whether the record's status makes it count at all.
    fn is_blocking(&self) -> bool;

    /// Booked period, if the record has a complete one.
    fn period(&self) -> Option<DateRange>;

    fn refers_to(&self, asset: &Asset, key: JoinKey) -> bool;

    /// Blocking, linked to `asset`, and overlapping `window`.
    fn holds(&self, asset: &Asset, window: &DateRange, key: JoinKey) -> bool {
        self.is_blocking()
            && self.refers_to(asset, key)
            && self.period().is_some_and(|p| p.overlaps(window))
    }
}
