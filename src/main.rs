use clap::{Parser, Subcommand};
use portrait_crop::imaging::RustBackend;
use portrait_crop::{batch, config, output};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "portrait-crop")]
#[command(about = "Crop a tree of photographs to a centered 3:4 portrait frame")]
#[command(long_about = "\
Crop a tree of photographs to a centered 3:4 portrait frame

Every file under the input directory is mirrored into the output directory:

  input/                        output/
  ├── top.jpg      600x900  →   ├── top.jpg      600x800
  ├── wide.jpg     900x600  →   │   (skipped: wider than tall)
  └── a/b/photo.jpg 300x500 →   └── a/b/photo.jpg 300x400

Width is kept, height becomes round(width x 1.3333), cut from the vertical
center. Images too short for that height keep their full height. The output
keeps the source format; JPEG is written at the configured quality.

With no arguments, crops ./input into ./output at quality 95.
Run 'portrait-crop gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (optional; defaults apply when it does not exist)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Input directory (overrides config)
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log filter, e.g. "info" or "portrait_crop=debug". RUST_LOG takes priority.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Crop every image under the input directory (default)
    Run,
    /// Show what a run would do without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG > --log-level
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stdout().is_terminal()),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    match cli.command.as_ref().unwrap_or(&Command::Run) {
        Command::Run => {
            let config = load(&cli)?;
            batch::run(&config)?;
        }
        Command::Check => {
            let config = batch::resolve_roots(&load(&cli)?)?;
            let report = batch::check(&RustBackend::new(), &config)?;
            output::print_check_output(&report, &config.input_dir);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the effective config: stock defaults, then the config file, then flags.
fn load(cli: &Cli) -> Result<config::CropConfig, config::ConfigError> {
    let loaded = config::load_config(&cli.config)?;
    tracing::debug!(config = %cli.config.display(), "configuration loaded");
    loaded.with_overrides(cli.input.clone(), cli.output.clone())
}
