use core::str::FromStr;

use serde::{Deserialize, Serialize};

use rigops_core::{AssetId, DomainError};

/// Fleet category, serialized with the labels the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    #[serde(rename = "Offshore Rig")]
    OffshoreRig,
    #[serde(rename = "Onshore Rig")]
    OnshoreRig,
    #[serde(rename = "Jack-up")]
    JackUp,
    #[serde(rename = "AHTS")]
    Ahts,
    #[serde(rename = "PSV")]
    Psv,
    #[serde(rename = "Crew Boat")]
    CrewBoat,
    #[serde(rename = "Tug Boat")]
    TugBoat,
    #[serde(rename = "Barge")]
    Barge,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 8] = [
        AssetCategory::OffshoreRig,
        AssetCategory::OnshoreRig,
        AssetCategory::JackUp,
        AssetCategory::Ahts,
        AssetCategory::Psv,
        AssetCategory::CrewBoat,
        AssetCategory::TugBoat,
        AssetCategory::Barge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AssetCategory::OffshoreRig => "Offshore Rig",
            AssetCategory::OnshoreRig => "Onshore Rig",
            AssetCategory::JackUp => "Jack-up",
            AssetCategory::Ahts => "AHTS",
            AssetCategory::Psv => "PSV",
            AssetCategory::CrewBoat => "Crew Boat",
            AssetCategory::TugBoat => "Tug Boat",
            AssetCategory::Barge => "Barge",
        }
    }
}

impl core::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unknown asset category: {s:?}")))
    }
}

/// Operational status of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetStatus {
    Active,
    Maintenance,
    Inactive,
}

/// A physical unit (vessel or rig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    /// Display name. Contracts and requests refer to assets by this string.
    pub name: String,
    pub category: AssetCategory,
    pub status: AssetStatus,
    pub year_built: i32,
    /// Free text, e.g. "2000 HP" or "80 Ton BP".
    pub capacity: String,
    pub location: String,
}

impl Asset {
    /// New `Active` asset with a fresh id.
    pub fn new(
        name: impl Into<String>,
        category: AssetCategory,
        year_built: i32,
        capacity: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: AssetId::new(),
            name: name.into(),
            category,
            status: AssetStatus::Active,
            year_built,
            capacity: capacity.into(),
            location: location.into(),
        }
    }

    pub fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == AssetStatus::Active
    }

    /// Numeric magnitude of [`Asset::capacity`].
    pub fn capacity_value(&self) -> u64 {
        capacity_magnitude(&self.capacity)
    }
}

/// First run of ASCII digits in `text`, or 0 when there is none.
///
/// Units and separators are ignored: "1,500 HP" reads as 1. Runs too long for
/// a `u64` saturate.
pub fn capacity_magnitude(text: &str) -> u64 {
    text.chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(c as u8 - b'0'))
        })
}
