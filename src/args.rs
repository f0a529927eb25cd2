//! Code to parse the command lines of `dups` and `lissajous` using `clap`, and
//! definitions of the parsed results

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::styles::ColorChoice;

/// Returns the parsed `dups` command line
#[must_use]
pub fn dups() -> Args {
    from_cli(CliArgs::parse())
}

fn from_cli(parsed: CliArgs) -> Args {
    Args { files: parsed.files, help: parsed.help, color: parsed.color.unwrap_or(ColorChoice::Auto) }
}

/// The parsed `dups` command line
pub struct Args {
    /// `files` is the list of files from the command line, in order
    pub files: Vec<PathBuf>,
    /// `help` is true if the user asked for help
    pub help: bool,
    /// `color` says whether the help message may use color
    pub color: ColorChoice,
}

#[derive(Debug, Parser)]
#[command(name = "dups", version, disable_help_flag = true)]
struct CliArgs {
    #[arg(short, long)]
    /// Print help
    help: bool,
    #[arg(long, value_enum, value_name = "WHEN")]
    /// When to use color in the help message
    color: Option<ColorChoice>,
    #[arg(name = "Input files")]
    /// The files whose duplicated lines we report
    files: Vec<PathBuf>,
}

/// Returns the parsed `lissajous` command line
#[must_use]
pub fn lissajous() -> Mode {
    LissajousCli::parse().into()
}

/// What `lissajous` was asked to do
#[derive(Debug, PartialEq)]
pub enum Mode {
    /// Draw one animation
    Draw {
        /// Palette index of the curve; `None` means the default
        color: Option<u8>,
        /// Number of revolutions of the x oscillator; `None` means the default
        cycles: Option<f64>,
        /// Seed for the random frequency; `None` means seed from entropy
        seed: Option<u64>,
        /// Where to write the GIF; `None` means standard output
        output: Option<PathBuf>,
    },
    /// Serve animations over HTTP
    Serve {
        /// Address to listen on
        addr: String,
        /// Seed for the random frequencies; `None` means seed from entropy
        seed: Option<u64>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "lissajous", version, args_conflicts_with_subcommands = true)]
/// Draws animated Lissajous figures as GIFs
struct LissajousCli {
    #[command(subcommand)]
    command: Option<LissajousCommand>,
    #[command(flatten)]
    draw: DrawArgs,
}

#[derive(Debug, Subcommand)]
enum LissajousCommand {
    /// Serve a fresh animation for each request to `/?color=N&cycles=N`
    Web {
        #[arg(long, default_value = "localhost:8000")]
        /// Address to listen on
        addr: String,
        #[arg(long)]
        /// Seed for the random frequencies
        seed: Option<u64>,
    },
}

#[derive(Debug, clap::Args)]
struct DrawArgs {
    /// Palette index of the curve: 0 white, 1 black, 2 green, 3 blue, 4 red
    color: Option<u8>,
    #[arg(long)]
    /// Number of revolutions of the x oscillator
    cycles: Option<f64>,
    #[arg(long)]
    /// Seed for the random frequency
    seed: Option<u64>,
    #[arg(short, long)]
    /// Write the GIF here instead of to standard output
    output: Option<PathBuf>,
}

impl From<LissajousCli> for Mode {
    fn from(cli: LissajousCli) -> Self {
        match cli.command {
            Some(LissajousCommand::Web { addr, seed }) => Mode::Serve { addr, seed },
            None => {
                let DrawArgs { color, cycles, seed, output } = cli.draw;
                Mode::Draw { color, cycles, seed, output }
            }
        }
    }
}
