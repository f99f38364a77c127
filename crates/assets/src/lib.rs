//! Fleet and booking records (vessels, rigs, contracts, quotation requests).
//!
//! Plain data plus the small rules attached to it: which statuses make a
//! record count, how capacity text is read, how a booking points at an asset.

pub mod asset;
pub mod booking;
pub mod contract;
pub mod request;

pub use asset::{Asset, AssetCategory, AssetStatus, capacity_magnitude};
pub use booking::{Booking, BookingRef, JoinKey};
pub use contract::{Contract, ContractStatus};
pub use request::{QuotationRequest, RequestStatus};
