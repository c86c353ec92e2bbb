// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use atm_bank::{
    Account, AccountError, Atm, BankingSystem, FeeStrategy, InterestStrategy, SavingsTerms,
};
use clap::{ArgAction, Parser};
use csv::{ReaderBuilder, Trim, Writer};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::Level;

/// ATM Bank - Replay an ATM session script
///
/// Opens accounts, runs deposits, withdrawals and interest through ATMs, then
/// writes a report of every open account as CSV.
#[derive(Parser, Debug)]
#[command(name = "atm-bank")]
#[command(about = "Replays ATM operations from a CSV script", long_about = None)]
struct Args {
    /// Path to CSV script
    ///
    /// Expected format: action,account,amount,rate,limit,fee,interest
    /// Example: cargo run -- session.csv > report.csv 2> session.log
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write the account report here instead of stdout
    ///
    /// Operation messages go to stdout when set, to stderr otherwise.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Emit diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    // With the report on stdout, operation messages move to stderr so stdout stays pure CSV.
    let input = BufReader::new(file);
    let result = match &args.report {
        Some(path) => File::create(path)
            .map_err(csv::Error::from)
            .and_then(|report| run_session(input, report, io::stdout(), io::stderr())),
        None => run_session(input, io::stdout(), io::stderr(), io::stderr()),
    };
    if let Err(e) = result {
        eprintln!("Error processing session: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

/// One row of the session script.
///
/// Fields: `action, account, amount, rate, limit, fee, interest`
#[derive(Debug, Deserialize)]
struct ScriptRecord {
    action: String,
    account: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    amount: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    rate: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    limit: Option<f64>,
    #[serde(default)]
    fee: Option<String>,
    #[serde(default)]
    interest: Option<String>,
}

/// A script row after validation.
#[derive(Debug)]
enum Command {
    Open(atm_bank::AccountBuilder),
    Deposit { account: String, amount: f64 },
    Withdraw { account: String, amount: f64 },
    Interest { account: String },
    Close { account: String },
}

impl ScriptRecord {
    fn into_command(self) -> Result<Command, String> {
        let amount = self.amount;
        let require_amount = || amount.ok_or_else(|| "missing amount".to_string());

        match self.action.to_lowercase().as_str() {
            "open-savings" => {
                let terms = SavingsTerms::new(self.rate.unwrap_or(0.0))
                    .with_interest(parse_text::<InterestStrategy>(self.interest.as_deref())?)
                    .with_minimum_balance(self.limit.unwrap_or(0.0));
                Ok(Command::Open(
                    Account::savings(self.account, amount.unwrap_or(0.0), terms)
                        .fee(parse_text::<FeeStrategy>(self.fee.as_deref())?),
                ))
            }
            "open-current" => Ok(Command::Open(
                Account::current(
                    self.account,
                    amount.unwrap_or(0.0),
                    self.limit.unwrap_or(0.0),
                )
                .fee(parse_text::<FeeStrategy>(self.fee.as_deref())?),
            )),
            "deposit" => Ok(Command::Deposit {
                amount: require_amount()?,
                account: self.account,
            }),
            "withdraw" | "withdrawal" => Ok(Command::Withdraw {
                amount: require_amount()?,
                account: self.account,
            }),
            "interest" => Ok(Command::Interest {
                account: self.account,
            }),
            "close" => Ok(Command::Close {
                account: self.account,
            }),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

fn parse_text<T>(text: Option<&str>) -> Result<T, String>
where
    T: std::str::FromStr<Err = AccountError> + Default,
{
    match text.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(text) => text.parse().map_err(|e: AccountError| e.to_string()),
    }
}

/// Replays a session script against a fresh [`BankingSystem`].
///
/// Operation outcomes are written to `out`; rejected operations, unknown
/// accounts and malformed rows are reported on `err` as `ERROR:` lines and
/// skipped.
///
/// # Script Format
///
/// Expected columns: `action, account, amount, rate, limit, fee, interest`
/// - `open-savings`: `amount` opening balance, `rate` interest rate,
///   `limit` minimum balance
/// - `open-current`: `amount` opening balance, `limit` overdraft limit
/// - `deposit`, `withdraw`: `amount`
/// - `interest`, `close`: no extra columns
/// - `fee`: `none`, `flat:<amount>` or `percent:<rate>`
/// - `interest`: `simple` or `compound:<frequency>`
///
/// # Example
///
/// ```csv
/// action,account,amount,rate,limit,fee,interest
/// open-savings,67890,2000,4.5,,flat:2,compound:12
/// open-current,87654321,500,,200
/// withdraw,87654321,600
/// interest,67890
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the header cannot be read.
pub fn run_script<R: Read, O: Write, E: Write>(
    reader: R,
    mut out: O,
    mut err: E,
) -> Result<BankingSystem, csv::Error> {
    let mut bank = BankingSystem::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<ScriptRecord>() {
        let command = match result.map_err(|e| e.to_string()).and_then(ScriptRecord::into_command) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(error = %e, "skipping script row");
                let _ = writeln!(err, "ERROR: {e}");
                continue;
            }
        };

        match command {
            Command::Open(builder) => {
                if let Err(e) = bank.open_account(builder) {
                    let _ = writeln!(err, "ERROR: {e}");
                }
            }
            Command::Close { account } => {
                if bank.remove_account(&account).is_none() {
                    let _ = writeln!(err, "ERROR: account not found: {account}");
                }
            }
            Command::Deposit { account, amount } => {
                with_atm(&mut bank, &account, &mut out, &mut err, |atm| {
                    atm.add_amount(amount);
                });
            }
            Command::Withdraw { account, amount } => {
                with_atm(&mut bank, &account, &mut out, &mut err, |atm| {
                    atm.withdraw_amount(amount);
                });
            }
            Command::Interest { account } => {
                with_atm(&mut bank, &account, &mut out, &mut err, |atm| {
                    atm.apply_specific_behavior();
                });
            }
        }
    }

    Ok(bank)
}

fn with_atm<O: Write, E: Write>(
    bank: &mut BankingSystem,
    number: &str,
    out: &mut O,
    err: &mut E,
    operation: impl FnOnce(&mut Atm<'_, &mut O, &mut E>),
) {
    match bank.find_account_mut(number) {
        Some(account) => operation(&mut Atm::with_output(account, out, err)),
        None => {
            let _ = writeln!(err, "ERROR: account not found: {number}");
        }
    }
}

/// Replays `script`, then writes the live-account count to `log` and the CSV
/// report to `report`.
///
/// Successful operations are logged to `log`, failures to `err`. Nothing but
/// the report is ever written to `report`.
///
/// # Errors
///
/// Returns a CSV error if the script cannot be read or an output fails.
pub fn run_session<R: Read, W: Write, L: Write, E: Write>(
    script: R,
    report: W,
    mut log: L,
    err: E,
) -> Result<(), csv::Error> {
    let bank = run_script(script, &mut log, err)?;
    writeln!(log, "Total accounts open: {}", bank.live_accounts())?;
    write_report(&bank, report)
}

/// Writes the account report as CSV.
///
/// # CSV Format
///
/// Columns: `account, type, balance`
///
/// ```csv
/// account,type,balance
/// 12345678,Savings,600
/// 87654321,Current,-100
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_report<W: Write>(bank: &BankingSystem, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for line in bank.generate_report() {
        wtr.serialize(&line)?;
    }

    wtr.flush()?;
    Ok(())
}
