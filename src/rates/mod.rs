//! Interest rate history: an ordered set of rate change events with an "effective as of" lookup.

mod banks;
mod central_bank;
mod feed;
mod loader;
mod shared;

use std::collections::BTreeMap;

use itertools::Itertools;
use log::warn;

use crate::formatting;
use crate::types::{Date, Decimal};

pub use self::banks::BankRatesFeed;
pub use self::central_bank::{CentralBankFeed, DepositRatePolicy, KeyRateAsIs, KeyRateMargin};
pub use self::feed::{FeedError, RateFeed};
pub use self::loader::{LoadedHistory, load_history, load_history_from};
pub use self::shared::SharedRateHistory;

/// Rate which is returned for any date when the history has no entries at all.
pub const FALLBACK_RATE: Decimal = dec!(6.90);

#[derive(Debug, Clone, PartialEq)]
pub struct RateChangeEvent {
    pub date: Date,
    /// Annual rate in percents
    pub rate: Decimal,
    /// Bank or other origin of the rate if the feed provides it
    pub source: Option<String>,
}

impl RateChangeEvent {
    pub fn new(date: Date, rate: Decimal) -> RateChangeEvent {
        RateChangeEvent {date, rate, source: None}
    }

    pub fn with_source(mut self, source: &str) -> RateChangeEvent {
        self.source = Some(source.to_owned());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateHistory {
    events: Vec<RateChangeEvent>,
}

impl RateHistory {
    /// Parses the raw feed data with the specified feed adapter and builds the history from it.
    pub fn build(feed: &dyn RateFeed, data: &str) -> Result<RateHistory, FeedError> {
        let events = feed.parse(data)?;
        if events.is_empty() {
            return Err(FeedError::MalformedFeed {reason: "the feed contains no rates".to_owned()});
        }
        Ok(RateHistory::from_events(events))
    }

    /// Builds the history from events in arbitrary order.
    ///
    /// If several events share the same date, the one which comes later wins. Runs of identical
    /// consecutive rates are collapsed to their first occurrence.
    pub fn from_events(events: Vec<RateChangeEvent>) -> RateHistory {
        let mut by_date: BTreeMap<Date, RateChangeEvent> = BTreeMap::new();

        for event in events {
            if let Some(prev) = by_date.get(&event.date) {
                if prev.rate != event.rate {
                    warn!(
                        "Got conflicting interest rates for {}: {}% and {}%. Using the last one.",
                        formatting::format_date(event.date), prev.rate, event.rate);
                }
            }
            by_date.insert(event.date, event);
        }

        RateHistory {
            events: by_date.into_values().dedup_by(|prev, next| prev.rate == next.rate).collect(),
        }
    }

    /// Built-in history which is used when no usable rate feed is available.
    pub fn fallback() -> RateHistory {
        let source = "Auður";

        RateHistory::from_events(vec![
            RateChangeEvent::new(date!(2023, 6, 2), dec!(8.25)).with_source(source),
            RateChangeEvent::new(date!(2024, 1, 1), dec!(7.50)).with_source(source),
            RateChangeEvent::new(date!(2024, 6, 1), dec!(7.00)).with_source(source),
            RateChangeEvent::new(date!(2025, 1, 1), dec!(6.90)).with_source(source),
        ])
    }

    pub fn events(&self) -> &[RateChangeEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns the event which defines the rate on the specified date: the latest one not after it or
    /// the earliest one if the date precedes the whole history.
    pub fn effective_event(&self, date: Date) -> Option<&RateChangeEvent> {
        let index = self.events.partition_point(|event| event.date <= date);
        if index == 0 {
            self.events.first()
        } else {
            self.events.get(index - 1)
        }
    }

    pub fn rate_as_of(&self, date: Date) -> Decimal {
        self.effective_event(date).map_or(FALLBACK_RATE, |event| event.rate)
    }

    /// Returns rate changes which happen strictly inside of the (start, end) interval.
    pub fn changes_between(&self, start: Date, end: Date) -> impl Iterator<Item = &RateChangeEvent> {
        let first = self.events.partition_point(|event| event.date <= start);
        self.events[first..].iter().take_while(move |event| event.date < end)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn history() -> RateHistory {
        RateHistory::from_events(vec![
            RateChangeEvent::new(date!(2024, 6, 1), dec!(7.00)),
            RateChangeEvent::new(date!(2023, 6, 2), dec!(8.25)),
            RateChangeEvent::new(date!(2025, 1, 1), dec!(6.90)),
            RateChangeEvent::new(date!(2024, 1, 1), dec!(7.50)),
        ])
    }

    #[test]
    fn sorting() {
        let dates: Vec<Date> = history().events().iter().map(|event| event.date).collect();
        assert_eq!(dates, vec![
            date!(2023, 6, 2), date!(2024, 1, 1), date!(2024, 6, 1), date!(2025, 1, 1),
        ]);
    }

    #[test]
    fn collapsing() {
        let raw = vec![
            RateChangeEvent::new(date!(2024, 1, 1), dec!(7.50)),
            RateChangeEvent::new(date!(2024, 2, 1), dec!(7.50)),
            RateChangeEvent::new(date!(2024, 3, 1), dec!(7.5000)),
            RateChangeEvent::new(date!(2024, 4, 1), dec!(7.00)),
            RateChangeEvent::new(date!(2024, 5, 1), dec!(7.00)),
            RateChangeEvent::new(date!(2024, 6, 1), dec!(7.50)),
        ];
        let history = RateHistory::from_events(raw.clone());

        assert_eq!(history.events(), &[
            RateChangeEvent::new(date!(2024, 1, 1), dec!(7.50)),
            RateChangeEvent::new(date!(2024, 4, 1), dec!(7.00)),
            RateChangeEvent::new(date!(2024, 6, 1), dec!(7.50)),
        ]);

        let mut date = date!(2023, 12, 1);
        while date < date!(2024, 8, 1) {
            let expected = raw.iter().rev()
                .find(|event| event.date <= date)
                .unwrap_or(&raw[0]).rate;

            assert_eq!(history.rate_as_of(date), expected, "{date}");
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn duplicate_dates() {
        let history = RateHistory::from_events(vec![
            RateChangeEvent::new(date!(2024, 1, 1), dec!(7.50)),
            RateChangeEvent::new(date!(2024, 1, 1), dec!(7.50)),
            RateChangeEvent::new(date!(2024, 2, 1), dec!(7.25)),
            RateChangeEvent::new(date!(2024, 2, 1), dec!(7.00)),
        ]);

        assert_eq!(history.events(), &[
            RateChangeEvent::new(date!(2024, 1, 1), dec!(7.50)),
            RateChangeEvent::new(date!(2024, 2, 1), dec!(7.00)),
        ]);
    }

    #[rstest(date, expected,
        case(date!(2000, 1, 1), dec!(8.25)),
        case(date!(2023, 6, 1), dec!(8.25)),
        case(date!(2023, 6, 2), dec!(8.25)),
        case(date!(2023, 12, 31), dec!(8.25)),
        case(date!(2024, 1, 1), dec!(7.50)),
        case(date!(2024, 5, 31), dec!(7.50)),
        case(date!(2024, 6, 1), dec!(7.00)),
        case(date!(2025, 1, 1), dec!(6.90)),
        case(date!(2030, 1, 1), dec!(6.90)),
    )]
    fn rate_as_of(date: Date, expected: Decimal) {
        assert_eq!(history().rate_as_of(date), expected);
    }

    #[test]
    fn empty_history() {
        let history = RateHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.effective_event(date!(2024, 1, 1)), None);
        assert_eq!(history.rate_as_of(date!(2024, 1, 1)), FALLBACK_RATE);
    }

    #[rstest(start, end, expected,
        case(date!(2023, 1, 1), date!(2026, 1, 1), &[
            date!(2023, 6, 2), date!(2024, 1, 1), date!(2024, 6, 1), date!(2025, 1, 1),
        ]),
        case(date!(2024, 1, 1), date!(2024, 6, 1), &[]),
        case(date!(2024, 1, 1), date!(2024, 6, 2), &[date!(2024, 6, 1)]),
        case(date!(2023, 12, 31), date!(2024, 6, 1), &[date!(2024, 1, 1)]),
        case(date!(2025, 1, 2), date!(2026, 1, 1), &[]),
    )]
    fn changes_between(start: Date, end: Date, expected: &[Date]) {
        let history = history();
        let dates: Vec<Date> = history.changes_between(start, end).map(|event| event.date).collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn fallback() {
        let history = RateHistory::fallback();
        assert_eq!(history.len(), 4);
        assert_eq!(history.rate_as_of(date!(2024, 3, 1)), dec!(7.50));
        assert_eq!(history.rate_as_of(crate::time::today().max(date!(2025, 1, 1))), FALLBACK_RATE);
    }
}
