use anyhow::{bail, Result};
use is_terminal::IsTerminal;
use std::io;

use dups::report::write_report;

const NAME: &str = "dups";

fn main() -> Result<()> {
    dups::logging::init("warn");
    let args = dups::args::dups();
    if args.help {
        return dups::help::print(args.color);
    }
    if args.files.is_empty() {
        bail!("at least one input file is required (try `{NAME} --help`)");
    }

    let aggregate = dups::find_duplicates(&args.files, |e| eprintln!("{NAME}: {e:#}"));

    let stdout = io::stdout();
    if stdout.is_terminal() {
        write_report(aggregate.report(), stdout.lock())?;
    } else {
        write_report(aggregate.report(), io::BufWriter::new(stdout.lock()))?;
    }
    Ok(())
}
