use std::collections::BTreeMap;

use crate::time;
use crate::types::Date;
use crate::util;

use super::RateChangeEvent;
use super::feed::{self, FeedError, RateFeed};

/// Savings account rates quoted by several banks in `date,bank,rate` CSV format with ISO dates.
///
/// The deposit must be kept on the best available account, so for each date the highest quote wins.
pub struct BankRatesFeed;

impl RateFeed for BankRatesFeed {
    fn name(&self) -> &str {
        "bank rates"
    }

    fn parse(&self, data: &str) -> Result<Vec<RateChangeEvent>, FeedError> {
        let mut best: BTreeMap<Date, RateChangeEvent> = BTreeMap::new();

        feed::read_records(self.name(), data, |record| {
            if record.len() != 3 {
                return Err!("Got {} columns when 3 are expected", record.len());
            }

            let date = time::parse_date(&record[0], "%Y-%m-%d")?;
            let bank = &record[1];
            if bank.is_empty() {
                return Err!("Bank name is missing");
            }
            let rate = util::parse_decimal(&record[2], util::DecimalRestrictions::PositiveOrZero)?;

            if best.get(&date).is_none_or(|current| rate > current.rate) {
                best.insert(date, RateChangeEvent::new(date, rate).with_source(bank));
            }

            Ok(())
        })?;

        Ok(best.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::rates::RateHistory;

    use super::*;

    #[test]
    fn highest_rate() {
        let data = indoc!("
            date,bank,rate
            2024-01-01,Auður,7.50
            2024-01-01,Arion banki,7.80
            2024-06-01,Auður,7.00
            2024-06-01,Arion banki,6.50
            2024-06-01,Landsbankinn,7.00
            2025-01-01,Auður,6.90
            2025-02-01,Arion banki,6.90
            2025-03-01,Arion banki,-1
        ");

        let history = RateHistory::build(&BankRatesFeed, data).unwrap();

        assert_eq!(history.events(), &[
            RateChangeEvent::new(date!(2024, 1, 1), dec!(7.80)).with_source("Arion banki"),
            RateChangeEvent::new(date!(2024, 6, 1), dec!(7.00)).with_source("Auður"),
            RateChangeEvent::new(date!(2025, 1, 1), dec!(6.90)).with_source("Auður"),
        ]);
    }
}
