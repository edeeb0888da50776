mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chartdeps_lib::consts::DEFAULT_HELM_BINARY;

use crate::cmd::{cmd_build, cmd_deps, cmd_lock, exit_code};
use crate::output::{OutputFormat, print_error};

/// chartdeps - lock the chart versions used by a state file
#[derive(Parser)]
#[command(name = "chartdeps")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the state file
  #[arg(short, long, global = true, env = "CHARTDEPS_FILE", default_value = "helmfile.yaml")]
  file: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve chart versions and update the lock file
  Deps {
    /// Binary used to run `dependency update`
    #[arg(long, env = "CHARTDEPS_HELM_BINARY", default_value = DEFAULT_HELM_BINARY)]
    helm_binary: String,
  },

  /// Print the state file with chart versions pinned from the lock file
  Build {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,
  },

  /// Show the locked chart versions
  Lock,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Deps { helm_binary } => cmd_deps(&cli.file, &helm_binary),
    Commands::Build { output } => cmd_build(&cli.file, output),
    Commands::Lock => cmd_lock(&cli.file),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      exit_code(&err)
    }
  }
}
