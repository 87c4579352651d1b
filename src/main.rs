use anyhow::Result;
use countset::args::Args;
use countset::operations::calculate;
use is_terminal::IsTerminal;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let Args { op, files, exclude, verbose } = countset::args::parsed();
    init_tracing(verbose);

    let stdout = io::stdout();
    if stdout.is_terminal() {
        calculate(op, &files, &exclude, stdout.lock())?;
    } else {
        calculate(op, &files, &exclude, io::BufWriter::new(stdout.lock()))?;
    }
    Ok(())
}

/// Logs go to stderr, leaving stdout for results. `RUST_LOG` wins if set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();
}
