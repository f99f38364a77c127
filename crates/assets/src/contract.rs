use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rigops_core::{AssetId, ContractId, DateRange};

use crate::asset::Asset;
use crate::booking::{Booking, BookingRef, JoinKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Completed,
    Disputed,
}

/// An awarded engagement for one or more assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub title: String,
    /// Display names of the contracted assets.
    pub asset_names: Vec<String>,
    /// Stable references; empty on records created before ids existed.
    #[serde(default)]
    pub asset_ids: Vec<AssetId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ContractStatus,
}

impl Contract {
    /// Active contract over `[start_date, end_date]` for the named assets.
    pub fn new(
        title: impl Into<String>,
        asset_names: Vec<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: ContractId::new(),
            title: title.into(),
            asset_names,
            asset_ids: Vec::new(),
            start_date,
            end_date,
            status: ContractStatus::Active,
        }
    }

    pub fn with_status(mut self, status: ContractStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_asset_ids(mut self, ids: Vec<AssetId>) -> Self {
        self.asset_ids = ids;
        self
    }
}

impl Booking for Contract {
    fn booking_ref(&self) -> BookingRef {
        BookingRef::Contract(self.id)
    }

    fn is_blocking(&self) -> bool {
        self.status == ContractStatus::Active
    }

    fn period(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start_date, self.end_date))
    }

    fn refers_to(&self, asset: &Asset, key: JoinKey) -> bool {
        match key {
            JoinKey::AssetIdWithNameFallback if !self.asset_ids.is_empty() => {
                self.asset_ids.contains(&asset.id)
            }
            _ => self.asset_names.iter().any(|n| *n == asset.name),
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

    fn rig(name: &str) -> Asset {
        Asset::new(name, AssetCategory::OffshoreRig, 2015, "2000 HP", "Natuna")
    }

    #[test]
    fn only_active_contracts_block() {
        let c = Contract::new("Drilling 2025", vec!["Rig A".into()], date(2025, 1, 1), date(2025, 12, 31));
        assert!(c.is_blocking());
        assert!(!c.clone().with_status(ContractStatus::Completed).is_blocking());
        assert!(!c.with_status(ContractStatus::Disputed).is_blocking());
    }

    #[test]
    fn name_join_is_exact_and_case_sensitive() {
        let c = Contract::new("c", vec!["Rig A".into()], date(2025, 1, 1), date(2025, 1, 31));
        assert!(c.refers_to(&rig("Rig A"), JoinKey::AssetName));
        assert!(!c.refers_to(&rig("rig a"), JoinKey::AssetName));
        assert!(!c.refers_to(&rig("Rig A "), JoinKey::AssetName));
    }

    #[test]
    fn id_join_ignores_names_when_ids_are_present() {
        let renamed = rig("Rig A (refit)");
        let namesake = rig("Rig A");
        let c = Contract::new("c", vec!["Rig A".into()], date(2025, 1, 1), date(2025, 1, 31))
            .with_asset_ids(vec![renamed.id]);

        assert!(c.refers_to(&renamed, JoinKey::AssetIdWithNameFallback));
        assert!(!c.refers_to(&namesake, JoinKey::AssetIdWithNameFallback));
        // Legacy mode still trusts the name.
        assert!(c.refers_to(&namesake, JoinKey::AssetName));
    }

    #[test]
    fn id_join_falls_back_to_name_without_ids() {
        let c = Contract::new("c", vec!["Rig A".into()], date(2025, 1, 1), date(2025, 1, 31));
        assert!(c.refers_to(&rig("Rig A"), JoinKey::AssetIdWithNameFallback));
    }

    #[test]
    fn holds_requires_overlap() {
        let asset = rig("Rig A");
        let c = Contract::new("c", vec!["Rig A".into()], date(2024, 1, 1), date(2024, 1, 10));
        let touching = DateRange::new(date(2024, 1, 10), date(2024, 1, 20));
        let after = DateRange::new(date(2024, 1, 11), date(2024, 1, 20));
        assert!(c.holds(&asset, &touching, JoinKey::AssetName));
        assert!(!c.holds(&asset, &after, JoinKey::AssetName));
    }
}
