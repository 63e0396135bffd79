use log::trace;
use rust_decimal::MathematicalOps;
use serde::Serialize;
use thiserror::Error;

use crate::formatting;
use crate::rates::RateHistory;
use crate::taxes::FlatTaxRate;
use crate::time;
use crate::types::{Date, Decimal};

/// Interest is accrued on a fixed 365-day year basis regardless of leap years.
const DAYS_IN_YEAR: u32 = 365;

#[derive(Error, Debug, PartialEq)]
pub enum CalculationError {
    #[error("Unable to calculate the interest: interest rate history is empty")]
    EmptyHistory,

    #[error("Unable to calculate the interest: the amount is too big")]
    Overflow,
}

/// A maximal part of the deposit term during which a single interest rate applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundingPeriod {
    pub start_date: Date,
    /// Exclusive
    pub end_date: Date,
    pub days: u32,
    pub rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub start_balance: Decimal,
    pub end_balance: Decimal,
    pub interest: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub principal: Decimal,
    pub total_days: u32,
    pub gross_interest: Decimal,
    pub tax: Decimal,
    pub net_interest: Decimal,
    pub total_amount: Decimal,
    /// Net interest annualized as a simple rate (in percents). It's not a compound annual rate.
    pub effective_annual_rate: Decimal,
    pub periods: Vec<CompoundingPeriod>,
}

/// Calculates interest accrued on a deposit with daily capitalization under a piecewise-constant
/// interest rate.
pub struct DepositCalculator {
    tax_rate: FlatTaxRate,
}

impl DepositCalculator {
    pub fn new(tax_rate: FlatTaxRate) -> DepositCalculator {
        DepositCalculator {tax_rate}
    }

    /// Returns `Ok(None)` if the inputs don't describe a deposit yet: non-positive principal or the
    /// end date not after the start date.
    pub fn calculate(
        &self, principal: Decimal, start_date: Date, end_date: Date, history: &RateHistory,
    ) -> Result<Option<CalculationResult>, CalculationError> {
        if principal.is_sign_negative() || principal.is_zero() || end_date <= start_date {
            return Ok(None);
        }

        if history.is_empty() {
            return Err(CalculationError::EmptyHistory);
        }

        let total_days = days(start_date, end_date)?;
        let mut boundaries = history.changes_between(start_date, end_date).map(|event| event.date);

        let mut periods = Vec::new();
        let mut date = start_date;
        let mut balance = principal;

        while date < end_date {
            let event = history.effective_event(date).ok_or(CalculationError::EmptyHistory)?;
            let period_end = boundaries.find(|&boundary| boundary > date).unwrap_or(end_date);

            let period_days = days(date, period_end)?;
            if period_days == 0 {
                date = period_end;
                continue;
            }

            let end_balance = compound(balance, event.rate, period_days)?;
            trace!("{} - {}: {}% for {} days: {} -> {}.",
                formatting::format_date(date), formatting::format_date(period_end),
                event.rate, period_days, balance, end_balance);

            periods.push(CompoundingPeriod {
                start_date: date,
                end_date: period_end,
                days: period_days,
                rate: event.rate,
                source: event.source.clone(),
                start_balance: balance,
                end_balance: end_balance,
                interest: end_balance - balance,
            });

            balance = end_balance;
            date = period_end;
        }

        let gross_interest: Decimal = periods.iter().map(|period| period.interest).sum();
        let taxed = self.tax_rate.apply(gross_interest);
        let total_amount = principal + taxed.net;

        let effective_annual_rate = taxed.net / principal
            * (Decimal::from(DAYS_IN_YEAR) / Decimal::from(total_days))
            * dec!(100);

        Ok(Some(CalculationResult {
            principal,
            total_days,
            gross_interest,
            tax: taxed.tax,
            net_interest: taxed.net,
            total_amount,
            effective_annual_rate,
            periods,
        }))
    }
}

impl Default for DepositCalculator {
    fn default() -> DepositCalculator {
        DepositCalculator::new(FlatTaxRate::default())
    }
}

fn days(start: Date, end: Date) -> Result<u32, CalculationError> {
    u32::try_from(time::days_between(start, end)).map_err(|_| CalculationError::Overflow)
}

fn compound(balance: Decimal, rate: Decimal, days: u32) -> Result<Decimal, CalculationError> {
    let daily_rate = rate / dec!(100) / Decimal::from(DAYS_IN_YEAR);
    (dec!(1) + daily_rate).checked_powu(u64::from(days))
        .and_then(|growth| balance.checked_mul(growth))
        .ok_or(CalculationError::Overflow)
}
