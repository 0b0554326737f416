//! codemod CLI: apply codemods to a project and print a JSON report.
//!
//! Logging: set `RUST_LOG=codemod=debug` (or pass `--verbose`) to see engine
//! logs on stderr. The report goes to stdout unless `--output` is given.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use codemod_cli::{Cli, Outcome, emit_report, execute};
use codemod_core::CancellationFlag;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "codemod=debug"
        } else {
            "codemod=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cancel = CancellationFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; finishing in-flight files");
            on_signal.cancel();
        }
    });

    let output = cli.output.clone();
    let outcome = tokio::task::spawn_blocking(move || execute(&cli, cancel)).await??;

    match outcome {
        Outcome::Listed(listing) => print!("{listing}"),
        Outcome::Ran { report, .. } => {
            if let Some(json) = emit_report(&report, output.as_deref())? {
                println!("{json}");
            }
        }
    }
    Ok(())
}
