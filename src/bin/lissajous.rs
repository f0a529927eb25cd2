use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use rand::{rngs::StdRng, SeedableRng};
use std::{fs::File, io};

use dups::args::Mode;
use dups::lissajous::{self, LissajousConfig};
use dups::server::{self, AppState};

fn main() -> Result<()> {
    dups::logging::init("info");
    let config = LissajousConfig::default();
    match dups::args::lissajous() {
        Mode::Draw { color, cycles, seed, output } => {
            let mut rng = seeded(seed);
            let color = color.unwrap_or(config.color);
            let cycles = cycles.unwrap_or(config.cycles);
            config.validate(color, cycles)?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("can't create {}", path.display()))?;
                    let out = io::BufWriter::new(file);
                    lissajous::generate(&config, color, cycles, &mut rng, out)?;
                }
                None => {
                    let stdout = io::stdout();
                    if stdout.is_terminal() {
                        bail!(
                            "refusing to write a GIF to a terminal; \
                             redirect standard output or use --output"
                        );
                    }
                    let out = io::BufWriter::new(stdout.lock());
                    lissajous::generate(&config, color, cycles, &mut rng, out)?;
                }
            }
        }
        Mode::Serve { addr, seed } => {
            let state = AppState::new(config, seeded(seed));
            let runtime = tokio::runtime::Runtime::new().context("can't start the async runtime")?;
            runtime.block_on(server::serve(&addr, state))?;
        }
    }
    Ok(())
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
