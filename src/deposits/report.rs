use crate::formatting::{self, Cell, Table};
use crate::rates::RateHistory;
use crate::types::Date;

use super::CalculationResult;

pub fn print_result(result: &CalculationResult) {
    let mut summary = Table::new();

    for (name, value) in [
        ("Deposit", formatting::format_amount(result.principal)),
        ("Days", result.total_days.to_string()),
        ("Gross interest", formatting::format_amount(result.gross_interest)),
        ("Tax", formatting::format_amount(result.tax)),
        ("Net interest", formatting::format_amount(result.net_interest)),
        ("Total amount", formatting::format_amount(result.total_amount)),
        ("Effective annual rate (after tax)", formatting::format_rate(result.effective_annual_rate)),
    ] {
        summary.add_row(formatting::new_row(&[
            Cell::new(name),
            Cell::new_align(&value, formatting::Alignment::RIGHT),
        ]));
    }

    formatting::print_table("Deposit interest", &["", ""], summary);

    // A single period adds nothing to the summary
    if result.periods.len() < 2 {
        return;
    }

    let mut periods = Table::new();

    for period in &result.periods {
        periods.add_row(formatting::new_row(&[
            Cell::new(&formatting::format_period(period.start_date, period.end_date)),
            Cell::new_integer(period.days),
            Cell::new_rate(period.rate),
            Cell::new(period.source.as_deref().unwrap_or_default()),
            Cell::new_amount(period.start_balance),
            Cell::new_amount(period.interest),
            Cell::new_amount(period.end_balance),
        ]));
    }

    formatting::print_table("Interest rate periods", &[
        "Period", "Days", "Rate", "Source", "Start balance", "Interest", "End balance",
    ], periods);
}

pub fn print_rates(history: &RateHistory, date: Date) {
    let mut table = Table::new();

    for event in history.events() {
        table.add_row(formatting::new_row(&[
            Cell::new_date(event.date),
            Cell::new_rate(event.rate),
            Cell::new(event.source.as_deref().unwrap_or_default()),
        ]));
    }

    formatting::print_table("Interest rates", &["Date", "Rate", "Source"], table);

    println!("Interest rate as of {}: {}.",
        formatting::format_date(date), formatting::format_rate(history.rate_as_of(date)));
}
