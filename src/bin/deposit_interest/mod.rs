mod action;
mod parser;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use log::error;

use deposit_interest::config::Config;
use deposit_interest::core::EmptyResult;
use deposit_interest::deposits;

use self::action::Action;
use self::parser::{Parser, GlobalOptions};

fn main() -> ExitCode {
    let mut parser = Parser::new();

    let global = match parser.parse_global() {
        Ok(global) => global,
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err}.");
            return ExitCode::FAILURE;
        },
    };

    if let Err(err) = easy_logging::init(module_path!(), global.log_level) {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {err}.");
        return ExitCode::FAILURE;
    }

    if let Err(err) = run(global, parser) {
        error!("{err}.");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(global: GlobalOptions, parser: Parser) -> EmptyResult {
    let mut config = Config::new(&global.config_dir)?;
    if let Some(path) = global.rates_path {
        config.rates.path = Some(path);
    }

    let action = parser.parse()?;

    match action {
        Action::Calculate {principal, start_date, end_date, json} =>
            deposits::calculate(&config, principal, start_date, end_date, json)?,

        Action::Rates {date} => deposits::list_rates(&config, date)?,

        Action::ShellCompletion {path, data} => {
            write_shell_completion(&path, &data).map_err(|e| format!(
                "Failed to write {:?}: {}", path, e))?;
        },
    };

    Ok(())
}

fn write_shell_completion(path: &Path, data: &[u8]) -> EmptyResult {
    Ok(File::create(path)?.write_all(data)?)
}
