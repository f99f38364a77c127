use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rigops_assets::AssetCategory;
use rigops_core::{DateRange, DomainError};

/// `"All"` or one category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(AssetCategory),
}

impl CategoryFilter {
    pub fn accepts(&self, category: AssetCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        value.parse().map(CategoryFilter::Only)
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Only(category) => category.label().to_string(),
        }
    }
}

/// Search criteria of a market assessment.
///
/// Zero and empty values mean "not set", the same as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentFilter {
    pub category: CategoryFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_year: Option<i32>,
    pub min_capacity: Option<u64>,
    /// Case-insensitive substring of the asset location.
    pub region: Option<String>,
}

impl AssessmentFilter {
    /// Any category, no thresholds, over `[start, end]`.
    pub fn for_window(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: AssetCategory) -> Self {
        self.category = CategoryFilter::Only(category);
        self
    }

    pub fn min_year(mut self, year: i32) -> Self {
        self.min_year = Some(year);
        self
    }

    pub fn min_capacity(mut self, capacity: u64) -> Self {
        self.min_capacity = Some(capacity);
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Requested window; `None` unless both ends are set.
    pub fn window(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start_date?, self.end_date?))
    }

    pub(crate) fn year_threshold(&self) -> Option<i32> {
        self.min_year.filter(|y| *y != 0)
    }

    pub(crate) fn capacity_threshold(&self) -> Option<u64> {
        self.min_capacity.filter(|c| *c != 0)
    }

    /// Lower-cased region, if one is set.
    pub(crate) fn region_needle(&self) -> Option<String> {
        self.region
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(str::to_lowercase)
    }
}
