use chrome_ext::manifest::{load_config, write_manifest};
use clap::Parser;
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

/// Validate an extension config and write its manifest.json.
#[derive(Debug, Parser)]
#[command(name = "chrome-ext-manifest", version)]
struct Cli {
    /// TOML config describing the extension.
    #[arg(long, short, env = "CHROME_EXT_CONFIG")]
    config: PathBuf,

    /// Directory that receives manifest.json.
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,

    /// Print compact JSON to stdout instead of writing a file.
    #[arg(long)]
    stdout: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> chrome_ext::Result<()> {
    let manifest = load_config(&cli.config)?;
    if cli.stdout {
        let mut out = io::stdout().lock();
        manifest.write(&mut out)?;
        out.write_all(b"\n")?;
        out.flush()?;
        return Ok(());
    }
    let path = write_manifest(&cli.out_dir, &manifest)?;
    tracing::info!(path = %path.display(), name = %manifest.name, "manifest written");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
