//! Replay a poker session script.
//!
//! Every buy-in, rebuy and add-on is paid out in chips through the session's
//! distributor; at the end the roster is netted into who-pays-whom transfers.

mod config;
mod script;

use std::path::PathBuf;

use anyhow::{Context, Error, bail};
use log::{info, warn};
use pico_args::Arguments;
use poker_session::{
    money::Money,
    session::{SessionController, SessionMode},
};
use rust_decimal::Decimal;

const HELP: &str = "\
Replay a poker session script and print the settlement

USAGE:
  ps_cli [OPTIONS] SCRIPT

ARGS:
  SCRIPT                   JSON session script (chips + events)

OPTIONS:
  --mode       MODE        cash or tournament          [default: env SESSION_MODE or cash]
  --tolerance  AMOUNT      Settlement tolerance        [default: env SESSION_TOLERANCE or 0.01]

FLAGS:
  --json                   Print the settlement as JSON
  -h, --help               Print help information

ENVIRONMENT:
  SESSION_MODE             cash | tournament
  SESSION_TOLERANCE        Balances below this are treated as settled
  SESSION_MAX_REBUYS       Rebuys per player per round (tournament only)
  SESSION_MAX_ADDONS       Add-ons per player per round (tournament only)
  RUST_LOG                 Log filter (e.g. info, poker_session=debug)
";

struct Args {
    mode: Option<SessionMode>,
    tolerance: Option<Decimal>,
    json: bool,
    script: PathBuf,
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        mode: pargs.opt_value_from_str("--mode")?,
        tolerance: pargs.opt_value_from_str("--tolerance")?,
        json: pargs.contains("--json"),
        script: match pargs.opt_free_from_str()? {
            Some(path) => path,
            None => bail!("missing SCRIPT argument\n\n{HELP}"),
        },
    };

    env_logger::builder().format_target(false).init();

    let config = config::session_config_from_env(args.mode, args.tolerance)?;
    info!("Replaying {} ({} game)", args.script.display(), config.mode);

    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read {}", args.script.display()))?;
    let script: script::Script = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", args.script.display()))?;

    let (session, lines) = script::replay(&script, config)?;
    let settlement = session.settle();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&settlement)?);
    } else {
        for line in &lines {
            println!("{line}");
        }
        println!();
        print_balances(&session);
        println!();
        if settlement.transfers.is_empty() {
            println!("Nothing to settle");
        }
        for transfer in &settlement.transfers {
            println!("{} pays {} {}", transfer.from, transfer.to, transfer.amount);
        }
    }

    if let Some(mismatch) = settlement.reconciliation_error() {
        warn!("Books don't close: {mismatch}");
    }

    Ok(())
}

fn print_balances(session: &SessionController) {
    println!("{:<16} {:>10} {:>10} {:>10}", "PLAYER", "IN", "OUT", "BALANCE");
    for player in session.players() {
        println!(
            "{:<16} {:>10} {:>10} {:>10}",
            player.name,
            player.total_in(),
            player.total_out(),
            signed(player.balance)
        );
    }
    if session.mode() == SessionMode::Tournament {
        println!("Prize pool: {}", session.prize_pool());
    }
}

fn signed(amount: Money) -> String {
    if amount > Decimal::ZERO {
        format!("+{amount}")
    } else {
        amount.to_string()
    }
}
