use serde::{Deserialize, Serialize};

use rigops_assets::JoinKey;

pub const JOIN_KEY_ENV: &str = "RIGOPS_JOIN_KEY";

/// Settings for the availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    pub join_key: JoinKey,
}

impl AvailabilityConfig {
    /// `RIGOPS_JOIN_KEY=asset_name|asset_id`; anything else keeps the
    /// legacy name join.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(JOIN_KEY_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        let join_key = match value.map(str::trim) {
            None | Some("") | Some("asset_name") => JoinKey::AssetName,
            Some("asset_id") => JoinKey::AssetIdWithNameFallback,
            Some(other) => {
                tracing::warn!(value = other, "{JOIN_KEY_ENV} not recognised; joining on asset name");
                JoinKey::AssetName
            }
        };
        Self { join_key }
    }
}
