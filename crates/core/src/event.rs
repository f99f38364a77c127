//! Domain events.

use chrono::{DateTime, Utc};

/// A fact recorded by an aggregate.
pub trait DomainEvent: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name such as `"market.assessment.finalized"`.
    fn event_type(&self) -> &'static str;

    /// Business time of the change.
    fn occurred_at(&self) -> DateTime<Utc>;
}
