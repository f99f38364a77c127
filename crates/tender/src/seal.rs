//! The sealed-bid gate.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rigops_core::{Clock, TenderId, parse_instant, start_of_day};

use crate::config::BidDisplay;
use crate::tender::Tender;

/// Shown in place of every sealed amount. Contains no digits.
pub const SEALED_MASK: &str = "🔒 ********";

/// Whether bids may be opened given the configured opening date.
///
/// No date means no seal. Otherwise opening is allowed from midnight UTC of
/// the opening date onward (inclusive).
pub fn can_open_bids(bid_opening_date: Option<NaiveDate>, clock: &dyn Clock) -> bool {
    match bid_opening_date {
        None => true,
        Some(date) => clock.now() >= start_of_day(date),
    }
}

/// [`can_open_bids`] for raw form input.
///
/// A blank string counts as "no date". A plain date opens at midnight UTC; a
/// timestamp opens at that exact instant. An unparseable string keeps the
/// gate closed: any comparison against an invalid date is false.
pub fn can_open_bids_str(bid_opening_date: Option<&str>, clock: &dyn Clock) -> bool {
    match bid_opening_date.map(str::trim) {
        None | Some("") => true,
        Some(raw) => match parse_instant(raw) {
            Ok(opens_at) => clock.now() >= opens_at,
            Err(err) => {
                tracing::debug!(%err, "bid opening date unreadable; keeping bids sealed");
                false
            }
        },
    }
}

/// Text to show for a bid amount.
///
/// When sealed the amount is dropped before anything is formatted.
pub fn seal_bid(amount: Option<u64>, is_sealed: bool, display: &BidDisplay) -> String {
    if is_sealed {
        return SEALED_MASK.to_string();
    }
    match amount {
        Some(amount) => display.format_amount(amount),
        None => display.missing_amount(),
    }
}

/// Whether `tender`'s bids are hidden right now.
///
/// Closed tenders and overridden tenders are never sealed; otherwise a
/// configured opening date that has not been reached seals them.
pub fn is_sealed(tender: &Tender, overrides: &SealOverrides, clock: &dyn Clock) -> bool {
    if tender.is_closed() || overrides.is_unsealed(tender.id) {
        return false;
    }
    tender.bid_opening_date.is_some() && !can_open_bids(tender.bid_opening_date, clock)
}

/// Caller-held manual unseal flags, keyed by tender.
///
/// Flags stay set until cleared or until the tender closes and
/// [`SealOverrides::release_closed`] drops them. Nothing re-seals on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SealOverrides {
    flags: HashMap<TenderId, bool>,
}

impl SealOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unseal(&mut self, tender_id: TenderId) {
        tracing::info!(%tender_id, "bids manually unsealed");
        self.flags.insert(tender_id, true);
    }

    pub fn clear(&mut self, tender_id: TenderId) {
        if self.flags.remove(&tender_id).is_some() {
            tracing::info!(%tender_id, "manual unseal cleared");
        }
    }

    pub fn is_unsealed(&self, tender_id: TenderId) -> bool {
        self.flags.get(&tender_id).copied().unwrap_or(false)
    }

    /// Forget overrides for tenders that have closed.
    pub fn release_closed(&mut self, tenders: &[Tender]) {
        for tender in tenders.iter().filter(|t| t.is_closed()) {
            self.flags.remove(&tender.id);
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use rigops_core::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock_at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap())
    }

    #[test]
    fn no_opening_date_means_open() {
        let clock = clock_at(2020, 1, 1, 0, 0, 0);
        assert!(can_open_bids(None, &clock));
        assert!(can_open_bids_str(None, &clock));
        assert!(can_open_bids_str(Some("   "), &clock));
    }

    #[test]
    fn opening_boundary_is_inclusive() {
        let at_midnight = clock_at(2024, 6, 1, 0, 0, 0);
        assert!(can_open_bids(Some(date(2024, 6, 1)), &at_midnight));
        assert!(can_open_bids_str(Some("2024-06-01"), &at_midnight));

        let just_before = FixedClock::new(at_midnight.now() - Duration::seconds(1));
        assert!(!can_open_bids(Some(date(2024, 6, 1)), &just_before));
    }

    #[test]
    fn malformed_opening_date_keeps_gate_closed() {
        let far_future = clock_at(2099, 1, 1, 0, 0, 0);
        assert!(!can_open_bids_str(Some("next tuesday"), &far_future));
        assert!(!can_open_bids_str(Some("2024-02-30"), &far_future));
    }

    #[test]
    fn timestamped_opening_waits_for_the_exact_instant() {
        let utc_midnight = clock_at(2024, 6, 1, 0, 0, 0);
        assert!(!can_open_bids_str(Some("2024-06-01T23:00:00+07:00"), &utc_midnight));
        assert!(!can_open_bids_str(Some("2024-06-01T10:00:00"), &utc_midnight));

        assert!(!can_open_bids_str(Some("2024-06-01T23:00:00+07:00"), &clock_at(2024, 6, 1, 15, 59, 59)));
        assert!(can_open_bids_str(Some("2024-06-01T23:00:00+07:00"), &clock_at(2024, 6, 1, 16, 0, 0)));
        assert!(can_open_bids_str(Some("2024-06-01T10:00:00"), &clock_at(2024, 6, 1, 10, 0, 0)));
    }

    #[test]
    fn gate_follows_the_clock_without_caching() {
        let mut clock = clock_at(2024, 5, 31, 23, 59, 59);
        let opening = Some(date(2024, 6, 1));
        assert!(!can_open_bids(opening, &clock));
        clock.set(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert!(can_open_bids(opening, &clock));
    }

    #[test]
    fn sealed_amount_is_masked() {
        let display = BidDisplay::default();
        assert_eq!(seal_bid(Some(45_000_000_000), true, &display), SEALED_MASK);
        assert_eq!(seal_bid(None, true, &display), SEALED_MASK);
    }

    #[test]
    fn unsealed_amount_is_grouped_with_currency_code() {
        let display = BidDisplay::default();
        let shown = seal_bid(Some(45_000_000_000), false, &display);
        assert_eq!(shown, "IDR 45.000.000.000");
        assert!(!shown.contains(','));
        assert_eq!(seal_bid(None, false, &display), "IDR -");
    }

    #[test]
    fn composed_seal_decision() {
        let before = clock_at(2024, 5, 1, 0, 0, 0);
        let after = clock_at(2024, 7, 1, 0, 0, 0);
        let mut overrides = SealOverrides::new();
        let mut tender = Tender::new("Jack-up charter").with_opening_date(date(2024, 6, 1));

        assert!(is_sealed(&tender, &overrides, &before));
        assert!(!is_sealed(&tender, &overrides, &after));

        overrides.unseal(tender.id);
        assert!(!is_sealed(&tender, &overrides, &before));
        overrides.clear(tender.id);
        assert!(is_sealed(&tender, &overrides, &before));

        tender.close();
        assert!(!is_sealed(&tender, &overrides, &before));
    }

    #[test]
    fn tender_without_opening_date_is_never_sealed() {
        let tender = Tender::new("Crew boat");
        assert!(!is_sealed(&tender, &SealOverrides::new(), &clock_at(2000, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn overrides_are_per_tender() {
        let clock = clock_at(2024, 5, 1, 0, 0, 0);
        let a = Tender::new("A").with_opening_date(date(2024, 6, 1));
        let b = Tender::new("B").with_opening_date(date(2024, 6, 1));
        let mut overrides = SealOverrides::new();
        overrides.unseal(a.id);
        assert!(!is_sealed(&a, &overrides, &clock));
        assert!(is_sealed(&b, &overrides, &clock));
    }

    #[test]
    fn release_closed_drops_only_closed_tenders() {
        let open = Tender::new("open");
        let mut closed = Tender::new("closed");
        closed.close();

        let mut overrides = SealOverrides::new();
        overrides.unseal(open.id);
        overrides.unseal(closed.id);
        overrides.release_closed(&[open.clone(), closed.clone()]);

        assert_eq!(overrides.len(), 1);
        assert!(overrides.is_unsealed(open.id));
        assert!(!overrides.is_unsealed(closed.id));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 1000,
            ..ProptestConfig::default()
        })]

        /// Property: a sealed rendering never contains a digit.
        #[test]
        fn sealed_rendering_never_leaks_digits(amount in any::<u64>(), code in "[A-Z]{3}") {
            let display = BidDisplay { currency_code: code, thousands_separator: '.' };
            let shown = seal_bid(Some(amount), true, &display);
            prop_assert!(!shown.chars().any(|c| c.is_ascii_digit()));
        }
    }
}
