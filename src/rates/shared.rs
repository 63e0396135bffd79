use std::sync::{Arc, PoisonError, RwLock};

use super::RateHistory;

/// Holds the current rate history which may be replaced at any time by a refresh.
///
/// Calculations must work with a [`snapshot`](SharedRateHistory::snapshot) so a concurrent refresh
/// never exposes a half-updated history to them.
pub struct SharedRateHistory {
    current: RwLock<Arc<RateHistory>>,
}

impl SharedRateHistory {
    pub fn new(history: RateHistory) -> SharedRateHistory {
        SharedRateHistory {
            current: RwLock::new(Arc::new(history)),
        }
    }

    pub fn snapshot(&self) -> Arc<RateHistory> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    pub fn refresh(&self, history: RateHistory) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(history);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::rates::RateChangeEvent;
    use crate::types::Decimal;

    use super::*;

    #[test]
    fn snapshot_isolation() {
        let shared = SharedRateHistory::new(RateHistory::fallback());
        let snapshot = shared.snapshot();

        shared.refresh(RateHistory::from_events(vec![
            RateChangeEvent::new(date!(2020, 1, 1), dec!(1)),
        ]));

        assert_eq!(snapshot.rate_as_of(date!(2024, 3, 1)), dec!(7.50));
        assert_eq!(shared.snapshot().rate_as_of(date!(2024, 3, 1)), dec!(1));
    }

    #[test]
    fn concurrent_refresh() {
        let shared = Arc::new(SharedRateHistory::new(RateHistory::fallback()));

        let refresher = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for rate in 1..100_i64 {
                    shared.refresh(RateHistory::from_events(vec![
                        RateChangeEvent::new(date!(2020, 1, 1), Decimal::from(rate)),
                        RateChangeEvent::new(date!(2021, 1, 1), Decimal::from(rate)),
                    ]));
                }
            })
        };

        for _ in 0..100 {
            let snapshot = shared.snapshot();
            assert!(!snapshot.is_empty());
            assert!(snapshot.len() <= 4);
        }

        refresher.join().unwrap();
        assert_eq!(shared.snapshot().rate_as_of(date!(2022, 1, 1)), dec!(99));
    }
}
