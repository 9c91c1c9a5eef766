use broken_links::{ReportingSeverity, config, manifest, output, policy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "broken-links")]
#[command(about = "Find broken links and anchors in a generated site")]
#[command(long_about = "\
Find broken links and anchors in a generated site

Reads a link manifest produced by the site build: the published routes and,
for every rendered page, the links and anchor ids found in its HTML.

  {
    \"routes\": [{ \"path\": \"/docs\", \"children\": [{ \"path\": \"/docs/intro\" }] }],
    \"collectedLinks\": {
      \"/docs/intro\": { \"links\": [\"../blog\", \"#setup\"], \"anchors\": [\"setup\"] }
    }
  }

A link is broken when its resolved page is not a route. An anchor is broken
when its page exists but does not declare the #anchor. Each category has its
own policy: ignore, log, warn or throw (fail with exit status 1).

Run 'broken-links gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a link manifest and apply the broken link policies
    Check(CheckArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Link manifest JSON file
    #[arg(long, default_value = "links.json")]
    manifest: PathBuf,

    /// Override on_broken_links from config.toml
    #[arg(long, value_parser = parse_severity)]
    on_broken_links: Option<ReportingSeverity>,

    /// Override on_broken_anchors from config.toml
    #[arg(long, value_parser = parse_severity)]
    on_broken_anchors: Option<ReportingSeverity>,
}

fn parse_severity(value: &str) -> Result<ReportingSeverity, String> {
    ReportingSeverity::parse(value)
        .ok_or_else(|| format!("expected one of: ignore, log, warn, throw (got '{value}')"))
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Check(args) => {
            let mut config = config::load_config(&cli.config_dir)?;
            if let Some(severity) = args.on_broken_links {
                config.on_broken_links = severity;
            }
            if let Some(severity) = args.on_broken_anchors {
                config.on_broken_anchors = severity;
            }

            println!("==> Checking {}", args.manifest.display());
            let manifest = manifest::load_manifest(&args.manifest)?;
            let report = broken_links::find_broken_links(
                &manifest.routes,
                &manifest.collected_links,
                config.frequency.threshold,
            );
            output::print_check_summary(&report);

            policy::report(&report, config.on_broken_links, config.on_broken_anchors)?;
            println!("==> Link check complete");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
