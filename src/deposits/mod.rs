mod calculator;
mod report;

use std::path::Path;

use log::warn;

use crate::config::Config;
use crate::core::EmptyResult;
use crate::formatting;
use crate::rates::{self, RateHistory};
use crate::types::{Date, Decimal};

pub use self::calculator::{CalculationError, CalculationResult, CompoundingPeriod, DepositCalculator};

pub fn calculate(config: &Config, principal: Decimal, start_date: Date, end_date: Date, json: bool) -> EmptyResult {
    let history = load_rates(config);
    let calculator = DepositCalculator::new(config.tax_rate()?);

    let Some(result) = calculator.calculate(principal, start_date, end_date, &history)? else {
        println!(
            "Nothing to calculate: the deposit term {} -> {} is empty.",
            formatting::format_date(start_date), formatting::format_date(end_date));
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report::print_result(&result);
    }

    Ok(())
}

pub fn list_rates(config: &Config, date: Date) -> EmptyResult {
    let history = load_rates(config);
    report::print_rates(&history, date);
    Ok(())
}

fn load_rates(config: &Config) -> RateHistory {
    let feed = config.rates.feed();
    let loaded = rates::load_history(feed.as_ref(), config.rates.path.as_deref().map(Path::new));

    if let Some(advisory) = loaded.advisory {
        warn!("{advisory}.");
    }

    loaded.history
}
