//! keyval: a resource that carries arbitrary key/value data between jobs.
//!
//! The orchestrator runs the resource as `/opt/resource/check`,
//! `/opt/resource/in <dir>` and `/opt/resource/out <dir>`, all links to this
//! binary. It can also be run directly as `keyval <verb>`.

mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "KEYVAL_LOG";

#[derive(Parser)]
#[command(multicall = true)]
struct Cli {
  #[command(subcommand)]
  applet: Applet,
}

#[derive(Subcommand)]
enum Applet {
  #[command(flatten)]
  Verb(Verb),

  /// Key/value resource for CI pipelines
  #[command(name = "keyval", version)]
  Keyval {
    #[command(subcommand)]
    verb: Verb,
  },
}

#[derive(Subcommand)]
enum Verb {
  /// Report available versions; reads the check request on stdin
  Check(CheckArgs),

  /// Write a version and its derived files into a directory
  #[command(name = "in")]
  In(DirArgs),

  /// Produce a new version from the put mapping
  #[command(name = "out")]
  Out(DirArgs),
}

#[derive(Args)]
struct CheckArgs {
  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

#[derive(Args)]
struct DirArgs {
  /// Working directory provided by the orchestrator
  dir: PathBuf,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

impl Verb {
  fn verbose(&self) -> bool {
    match self {
      Verb::Check(args) => args.verbose,
      Verb::In(args) | Verb::Out(args) => args.verbose,
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  let (Applet::Verb(verb) | Applet::Keyval { verb }) = cli.applet;

  init_logging(verb.verbose());

  let result = match verb {
    Verb::Check(_) => cmd::cmd_check(),
    Verb::In(args) => cmd::cmd_in(&args.dir),
    Verb::Out(args) => cmd::cmd_out(&args.dir),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      output::print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

/// Log to stderr; stdout carries the protocol response.
fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
