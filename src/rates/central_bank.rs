use crate::time;
use crate::types::Decimal;
use crate::util;

use super::RateChangeEvent;
use super::feed::{self, FeedError, RateFeed};

/// Derives a deposit rate from the central bank key interest rate.
pub trait DepositRatePolicy: Send + Sync {
    fn deposit_rate(&self, key_rate: Decimal) -> Decimal;
}

/// Deposit rate is the key rate minus a fixed margin (but never negative).
pub struct KeyRateMargin {
    margin: Decimal,
}

impl KeyRateMargin {
    pub const DEFAULT_MARGIN: Decimal = dec!(0.60);

    pub fn new(margin: Decimal) -> KeyRateMargin {
        KeyRateMargin {margin}
    }
}

impl Default for KeyRateMargin {
    fn default() -> KeyRateMargin {
        KeyRateMargin::new(KeyRateMargin::DEFAULT_MARGIN)
    }
}

impl DepositRatePolicy for KeyRateMargin {
    fn deposit_rate(&self, key_rate: Decimal) -> Decimal {
        std::cmp::max(dec!(0), key_rate - self.margin)
    }
}

pub struct KeyRateAsIs;

impl DepositRatePolicy for KeyRateAsIs {
    fn deposit_rate(&self, key_rate: Decimal) -> Decimal {
        key_rate
    }
}

/// Central bank interest rates in `date,overnight_rate,current_account_rate,key_interest_rate` CSV
/// format with `DD.MM.YYYY` dates. Deposit rates derived from negative key rates are floored at zero.
pub struct CentralBankFeed {
    policy: Box<dyn DepositRatePolicy>,
}

impl CentralBankFeed {
    pub fn new(policy: Box<dyn DepositRatePolicy>) -> CentralBankFeed {
        CentralBankFeed {policy}
    }
}

impl Default for CentralBankFeed {
    fn default() -> CentralBankFeed {
        CentralBankFeed::new(Box::new(KeyRateMargin::default()))
    }
}

impl RateFeed for CentralBankFeed {
    fn name(&self) -> &str {
        "central bank"
    }

    fn parse(&self, data: &str) -> Result<Vec<RateChangeEvent>, FeedError> {
        let mut events = Vec::new();

        feed::read_records(self.name(), data, |record| {
            if record.len() < 4 {
                return Err!("Got {} columns when at least 4 are expected", record.len());
            }

            let date = time::parse_date(&record[0], "%d.%m.%Y")?;
            let key_rate = util::parse_localized_decimal(&record[3])?;

            let rate = std::cmp::max(dec!(0), self.policy.deposit_rate(key_rate));
            events.push(RateChangeEvent::new(date, rate));
            Ok(())
        })?;

        Ok(events)
    }
}
