use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use mpcfill_gen::generate::{self, GenerateOptions};
use mpcfill_gen::imaging::RustBackend;
use mpcfill_gen::output;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mpcfill-gen")]
#[command(about = "Generate an MPC Fill cards.xml from a folder of card images")]
#[command(long_about = "\
Generate an MPC Fill cards.xml from a folder of card images

Every picture file in the card folder (png, jpg, jpeg, bmp, gif, tif, tiff)
becomes a front. Images exported at exactly 1500x2100 get a 72px black
border, in place, so MPC's trim doesn't eat into the card.

Config file (optional, one KEY=VALUE per line, keys case-insensitive):

  # Card back, excluded from the fronts
  CARD_BACK=back.png

  # Quantities, by file name without or with extension
  hero=3
  villain.jpg=2

The single-dash spellings -out, -cards, -cfg and -help are also accepted.")]
#[command(version)]
struct Cli {
    /// Directory to write cards.xml into
    #[arg(long, value_name = "DIR", default_value = ".")]
    out: PathBuf,

    /// Directory containing the card images
    #[arg(long, value_name = "DIR", default_value = ".")]
    cards: PathBuf,

    /// Card config file
    #[arg(long, value_name = "FILE")]
    cfg: Option<PathBuf>,

    /// Print the order as JSON without padding images or writing cards.xml
    #[arg(long)]
    check: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = parse_cli();

    let options = GenerateOptions {
        config_path: cli.cfg,
        check_only: cli.check,
        ..GenerateOptions::new(cli.cards, cli.out)
    };

    let report = generate::generate(&options, &RustBackend::new())
        .inspect_err(|e| tracing::error!("{e}"))?;

    if cli.check {
        println!("{}", serde_json::to_string_pretty(&report.order)?);
    } else {
        output::print_generate_output(&report);
    }
    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Flags that take a value.
const VALUE_FLAGS: &[&str] = &["--out", "--cards", "--cfg"];

/// Parse arguments. An unknown switch prints help and exits successfully.
fn parse_cli() -> Cli {
    match Cli::try_parse_from(prepare_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::UnknownArgument => {
            tracing::warn!("{}", e.to_string().lines().next().unwrap_or_default());
            if let Err(e) = Cli::command().print_help() {
                tracing::error!("Failed to print help: {e}");
            }
            std::process::exit(0);
        }
        Err(e) => e.exit(),
    }
}

fn prepare_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    drop_malformed_args(normalize_legacy_flags(args))
}

/// Rewrite `-out`, `-cards`, `-cfg` and `-help` (any case) to their `--` forms.
fn normalize_legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let legacy = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|s| !s.starts_with('-'))
                .map(str::to_lowercase)
                .filter(|s| matches!(s.as_str(), "out" | "cards" | "cfg" | "help"));
            match legacy {
                Some(flag) => OsString::from(format!("--{flag}")),
                None => arg,
            }
        })
        .collect()
}

/// Drop bare arguments and value flags with nothing after them, logging each.
fn drop_malformed_args(args: Vec<OsString>) -> Vec<OsString> {
    let mut args = args.into_iter().peekable();
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        if !is_switch(&arg) {
            tracing::warn!("Invalid format: {}", arg.to_string_lossy());
            continue;
        }
        if arg.to_str().is_some_and(|a| VALUE_FLAGS.contains(&a)) {
            match args.next_if(|next| !is_switch(next)) {
                Some(value) => kept.extend([arg, value]),
                None => tracing::warn!("Missing value for {}, ignoring it", arg.to_string_lossy()),
            }
            continue;
        }
        kept.push(arg);
    }
    kept
}

fn is_switch(arg: &OsStr) -> bool {
    arg.to_str().is_some_and(|s| s.starts_with('-'))
}
