use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rigops_core::{AssetId, DateRange, RequestId};

use crate::asset::Asset;
use crate::booking::{Booking, BookingRef, JoinKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Review,
    Approved,
    Rejected,
}

/// In-flight quotation request (enquiry) for a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationRequest {
    pub id: RequestId,
    pub asset_name: String,
    #[serde(default)]
    pub asset_id: Option<AssetId>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    pub status: RequestStatus,
}

impl QuotationRequest {
    /// `Pending` request for the named asset, no dates yet.
    pub fn new(asset_name: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            asset_name: asset_name.into(),
            asset_id: None,
            date_from: None,
            date_to: None,
            status: RequestStatus::Pending,
        }
    }

    pub fn with_dates(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_asset_id(mut self, id: AssetId) -> Self {
        self.asset_id = Some(id);
        self
    }
}

impl Booking for QuotationRequest {
    fn booking_ref(&self) -> BookingRef {
        BookingRef::Request(self.id)
    }

    fn is_blocking(&self) -> bool {
        matches!(self.status, RequestStatus::Pending | RequestStatus::Approved)
    }

    /// Both dates or nothing.
    fn period(&self) -> Option<DateRange> {
        Some(DateRange::new(self.date_from?, self.date_to?))
    }

    fn refers_to(&self, asset: &Asset, key: JoinKey) -> bool {
        match (key, self.asset_id) {
            (JoinKey::AssetIdWithNameFallback, Some(id)) => id == asset.id,
            _ => self.asset_name == asset.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssetCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pending_and_approved_block_review_and_rejected_do_not() {
        let r = QuotationRequest::new("Rig A");
        assert!(r.clone().with_status(RequestStatus::Pending).is_blocking());
        assert!(r.clone().with_status(RequestStatus::Approved).is_blocking());
        assert!(!r.clone().with_status(RequestStatus::Review).is_blocking());
        assert!(!r.with_status(RequestStatus::Rejected).is_blocking());
    }

    #[test]
    fn half_dated_requests_have_no_period() {
        let mut r = QuotationRequest::new("Rig A");
        assert_eq!(r.period(), None);
        r.date_from = Some(date(2025, 6, 1));
        assert_eq!(r.period(), None);
        r.date_to = Some(date(2025, 6, 30));
        assert_eq!(r.period(), Some(DateRange::new(date(2025, 6, 1), date(2025, 6, 30))));
    }

    #[test]
    fn undated_request_never_holds() {
        let asset = Asset::new("Rig A", AssetCategory::OffshoreRig, 2015, "2000 HP", "Natuna");
        let window = DateRange::new(date(2025, 1, 1), date(2025, 12, 31));
        let r = QuotationRequest::new("Rig A").with_status(RequestStatus::Approved);
        assert!(!r.holds(&asset, &window, JoinKey::AssetName));
    }

    #[test]
    fn request_id_join_prefers_asset_id() {
        let asset = Asset::new("Rig A", AssetCategory::OffshoreRig, 2015, "2000 HP", "Natuna");
        let other = AssetId::new();
        let r = QuotationRequest::new("Rig A").with_asset_id(other);
        assert!(!r.refers_to(&asset, JoinKey::AssetIdWithNameFallback));
        assert!(r.refers_to(&asset, JoinKey::AssetName));
    }
}
