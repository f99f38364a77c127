//! `rigops-core`: shared building blocks for the RigOps domain crates.
//!
//! Everything here is pure: identifiers, the domain error model, calendar
//! date helpers and the injectable clock. No IO.

pub mod aggregate;
pub mod clock;
pub mod error;
pub mod event;
pub mod id;
pub mod period;

pub use aggregate::{Aggregate, AggregateRoot};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use event::DomainEvent;
pub use id::{AssessmentId, AssetId, ContractId, RequestId, TenderId};
pub use period::{DateRange, overlaps, parse_calendar_date, parse_instant, start_of_day};
