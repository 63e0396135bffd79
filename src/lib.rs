#[macro_use] pub mod core;
#[macro_use] pub mod types;

pub mod cli;
pub mod config;
pub mod deposits;
pub mod formatting;
pub mod rates;
pub mod taxes;
pub mod time;
pub mod util;
