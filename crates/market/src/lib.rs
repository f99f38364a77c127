//! Market assessment: which assets are free and qualify for a sourcing window.
//!
//! [`availability`] is a pure query over snapshots of assets, contracts and
//! quotation requests. [`assessment`] is the draft/finalized session that
//! stores the filters and the resulting candidates.

pub mod assessment;
pub mod availability;
pub mod config;
pub mod filter;

pub use assessment::{
    AssessmentCommand, AssessmentDoc, AssessmentEvent, AssessmentSession, AssessmentStatus,
    DraftAssessment, FinalizedAssessment,
};
pub use availability::{AvailabilityFilter, MarketSnapshot, Rejection, find_available_assets};
pub use config::AvailabilityConfig;
pub use filter::{AssessmentFilter, CategoryFilter};
