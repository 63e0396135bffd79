use std::path::PathBuf;

use deposit_interest::types::{Date, Decimal};

pub enum Action {
    Calculate {
        principal: Decimal,
        start_date: Date,
        end_date: Date,
        json: bool,
    },

    Rates {
        date: Date,
    },

    ShellCompletion {
        path: PathBuf,
        data: Vec<u8>,
    },
}
