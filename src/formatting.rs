//! A thin wrapper around prettytable plus formatting of dates, rates and amounts.

use num_traits::ToPrimitive;
use prettytable::{Row as RawRow, Cell as RawCell};
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use separator::Separatable;

pub use prettytable::{Table, format::Alignment};

use crate::types::{Date, Decimal};
use crate::util;

pub fn format_date(date: Date) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Formats an exclusive date range as an inclusive one.
pub fn format_period(start: Date, end: Date) -> String {
    format!("{} - {}", format_date(start), format_date(end.pred_opt().unwrap_or(end)))
}

pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", util::round_to(rate, 2))
}

pub fn format_amount(amount: Decimal) -> String {
    let amount = util::round(amount);
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };

    let amount = amount.abs();
    let integer = amount.trunc().to_u128().unwrap_or_default();
    let fraction = ((amount - amount.trunc()) * dec!(100)).to_u32().unwrap_or_default();

    format!("{sign}{}.{fraction:02}", integer.separated_string())
}

#[derive(Clone)]
pub struct Cell {
    text: String,
    align: Alignment,
}

impl Cell {
    pub fn new(text: &str) -> Cell {
        Cell::new_align(text, Alignment::LEFT)
    }

    pub fn new_align(text: &str, align: Alignment) -> Cell {
        Cell {
            text: text.to_owned(),
            align: align,
        }
    }

    pub fn new_date(date: Date) -> Cell {
        Cell::new_align(&format_date(date), Alignment::CENTER)
    }

    pub fn new_integer(value: u32) -> Cell {
        Cell::new_align(&value.to_string(), Alignment::RIGHT)
    }

    pub fn new_rate(rate: Decimal) -> Cell {
        Cell::new_align(&format_rate(rate), Alignment::RIGHT)
    }

    pub fn new_amount(amount: Decimal) -> Cell {
        Cell::new_align(&format_amount(amount), Alignment::RIGHT)
    }
}

pub fn new_row(row: &[Cell]) -> RawRow {
    RawRow::new(row.iter().map(|cell| RawCell::new_align(&cell.text, cell.align)).collect())
}

pub fn print_table(name: &str, titles: &[&str], mut table: Table) {
    table.set_format(FormatBuilder::new().padding(1, 1).build());
    table.set_titles(RawRow::new(
        titles.iter().map(|name| RawCell::new_align(name, Alignment::CENTER)).collect()));

    let mut wrapping_table = Table::new();

    wrapping_table.set_format(FormatBuilder::new()
        .separator(LinePosition::Title, LineSeparator::new(' ', ' ', ' ', ' '))
        .build());

    wrapping_table.set_titles(RawRow::new(vec![
        RawCell::new_align(&("\n".to_owned() + name), Alignment::CENTER),
    ]));

    wrapping_table.add_row(RawRow::new(vec![RawCell::new(&table.to_string())]));
    wrapping_table.printstd();
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use super::*;

    #[rstest(amount, expected,
        case(dec!(1048228.4223), "1,048,228.42"),
        case(dec!(13602.888), "13,602.89"),
        case(dec!(0), "0.00"),
        case(dec!(999.5), "999.50"),
        case(dec!(-1234.005), "-1,234.01"),
        case(dec!(100000000000000000000), "100,000,000,000,000,000,000.00"),
    )]
    fn amount_formatting(amount: Decimal, expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }

    #[test]
    fn date_formatting() {
        assert_eq!(format_date(date!(2024, 2, 20)), "20.02.2024");
        assert_eq!(format_period(date!(2024, 1, 1), date!(2024, 2, 20)), "01.01.2024 - 19.02.2024");
        assert_eq!(format_rate(dec!(7.5)), "7.5%");
        assert_eq!(format_rate(dec!(4.822842232)), "4.82%");
    }
}
