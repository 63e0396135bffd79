use clap::{ArgAction, ArgMatches, value_parser};
use clap_complete::{self, Shell};

use deposit_interest::cli;
use deposit_interest::config::DEFAULT_CONFIG_DIR_PATH;
use deposit_interest::core::GenericResult;
use deposit_interest::time;
use deposit_interest::util::{self, DecimalRestrictions};

use super::action::Action;

pub struct Parser {
    matches: Option<ArgMatches>,
    completion: Option<Vec<u8>>,
}

pub struct GlobalOptions {
    pub log_level: log::Level,
    pub config_dir: String,
    pub rates_path: Option<String>,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            matches: None,
            completion: None,
        }
    }

    pub fn parse_global(&mut self) -> GenericResult<GlobalOptions> {
        let binary_name = "deposit-interest";

        let mut app = cli::new_app(binary_name, "Calculates interest owed on a rental deposit")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .args([
                cli::new_arg("config", "Configuration directory path [default: ~/.deposit-interest]")
                    .short('c').long("config")
                    .value_name("PATH"),

                cli::new_arg("rates", "Interest rate feed path (overrides the configuration)")
                    .short('r').long("rates")
                    .value_name("PATH"),

                cli::new_arg("verbose", "Set verbosity level")
                    .short('v').long("verbose")
                    .action(ArgAction::Count),
            ])

            .subcommand(cli::new_subcommand(
                "calculate", "Calculate interest accrued on the deposit")
                .long_about("\
                    Calculates interest accrued on the deposit with daily capitalization using the \
                    interest rates which were in effect during the deposit term, then applies the \
                    capital gains tax.")
                .args([
                    cli::new_arg("json", "Output the result in JSON format")
                        .long("json")
                        .action(ArgAction::SetTrue),

                    cli::new_arg("AMOUNT", "Deposit amount").required(true),
                    cli::new_arg("START_DATE", "Date when the deposit has been paid").required(true),
                    cli::new_arg("END_DATE", "Date when the deposit is returned").required(true),
                ]))

            .subcommand(cli::new_subcommand(
                "rates", "Show interest rate history")
                .arg(cli::new_arg("date", "Date to show the effective rate for [default: today]")
                    .short('d').long("date")
                    .value_name("DATE")))

            .subcommand(cli::new_subcommand(
                "completion", "Generate shell completion rules")
                .args([
                    cli::new_arg("shell", "Shell to generate completion rules for")
                        .short('s').long("shell").value_name("SHELL")
                        .value_parser(value_parser!(Shell))
                        .default_value("bash"),

                    cli::new_arg("PATH", "Path to save the rules to").required(true),
                ]));

        let matches = app.get_matches_mut();

        let log_level = match matches.get_count("verbose") {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            2 => log::Level::Trace,
            _ => return Err("Invalid verbosity level".into()),
        };

        let config_dir = matches.get_one::<String>("config").cloned().unwrap_or_else(||
            DEFAULT_CONFIG_DIR_PATH.to_owned());
        let rates_path = matches.get_one::<String>("rates").cloned();

        if let Some(("completion", matches)) = matches.subcommand() {
            let mut completion = Vec::new();
            let shell = *matches.get_one::<Shell>("shell").unwrap();
            clap_complete::generate(shell, &mut app, binary_name, &mut completion);
            self.completion = Some(completion);
        }

        self.matches = Some(matches);

        Ok(GlobalOptions {log_level, config_dir, rates_path})
    }

    pub fn parse(mut self) -> GenericResult<Action> {
        let matches = self.matches.take().unwrap();
        let (command, matches) = matches.subcommand().unwrap();
        self.parse_command(command, matches)
    }

    fn parse_command(&self, command: &str, matches: &ArgMatches) -> GenericResult<Action> {
        Ok(match command {
            "calculate" => {
                let amount = get_required(matches, "AMOUNT");
                let principal = util::parse_decimal(amount, DecimalRestrictions::StrictlyPositive)
                    .map_err(|_| format!("Invalid deposit amount: {:?}", amount))?;

                Action::Calculate {
                    principal,
                    start_date: time::parse_user_date(get_required(matches, "START_DATE"))?,
                    end_date: time::parse_user_date(get_required(matches, "END_DATE"))?,
                    json: matches.get_flag("json"),
                }
            },

            "rates" => {
                let date = match matches.get_one::<String>("date") {
                    Some(date) => time::parse_user_date(date)?,
                    None => time::today(),
                };
                Action::Rates {date}
            },

            "completion" => Action::ShellCompletion {
                path: get_required(matches, "PATH").into(),
                data: self.completion.clone().unwrap_or_default(),
            },

            _ => unreachable!(),
        })
    }
}

fn get_required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches.get_one::<String>(name).unwrap()
}
