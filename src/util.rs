use std::str::FromStr;

use rust_decimal::RoundingStrategy;

use crate::core::GenericResult;
use crate::types::Decimal;

pub enum DecimalRestrictions {
    PositiveOrZero,
    StrictlyPositive,
}

pub fn parse_decimal(string: &str, restrictions: DecimalRestrictions) -> GenericResult<Decimal> {
    let value = Decimal::from_str(string.trim()).map_err(|_| format!(
        "Invalid decimal value: {:?}", string))?;

    if !match restrictions {
        DecimalRestrictions::PositiveOrZero => value.is_sign_positive() || value.is_zero(),
        DecimalRestrictions::StrictlyPositive => value.is_sign_positive() && !value.is_zero(),
    } {
        return Err!("The value doesn't comply to the specified restrictions: {}", value);
    }

    Ok(value)
}

/// Parses a decimal written with either `.` or `,` as the decimal separator.
pub fn parse_localized_decimal(string: &str) -> GenericResult<Decimal> {
    let value = string.trim().replace(',', ".");
    Ok(Decimal::from_str(&value).map_err(|_| format!(
        "Invalid decimal value: {:?}", string))?)
}

pub fn round(value: Decimal) -> Decimal {
    round_to(value, 2)
}

pub fn round_to(value: Decimal, points: u32) -> Decimal {
    value.round_dp_with_strategy(points, RoundingStrategy::MidpointAwayFromZero).normalize()
}
