use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tag_balance::blocks::{parse_stream, validate_stream};
use tag_balance::config::{Args, Config};
use tag_balance::profile::ProfileRegistry;
use tag_balance::validation::{validate_document, Severity};

/// Check raw HTML fragments and block streams for unbalanced tags
#[derive(Debug, Parser)]
#[command(name = "tagbalance")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    args: Args,

    /// Treat inputs as JSON block streams instead of raw HTML
    #[arg(long)]
    blocks: bool,

    /// Files to check; `-` reads standard input
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_args(cli.args)?;
    config.init_logging()?;

    let registry = config.build_registry()?;

    let mut failed = false;
    for path in &cli.paths {
        let (label, content) = read_input(path)?;
        let lines = if cli.blocks {
            check_blocks(&label, &content, &registry)?
        } else {
            check_markup(&label, &content, &registry)
        };

        for (line, is_error) in lines {
            println!("{}", line);
            failed |= is_error;
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn read_input(path: &Path) -> Result<(String, String)> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        return Ok(("<stdin>".to_string(), content));
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((path.display().to_string(), content))
}

/// Report lines for a raw HTML document, each flagged with whether it is an error
fn check_markup(label: &str, content: &str, registry: &ProfileRegistry) -> Vec<(String, bool)> {
    let result = validate_document(content, registry);
    log::debug!("{}: checked with profile {:?}", label, result.profile);

    result
        .diagnostics
        .into_iter()
        .map(|d| {
            let line = match d.position {
                Some(pos) => format!("{}:{}:{}: {}", label, pos.line, pos.column, d.message),
                None => format!("{}: {}", label, d.message),
            };
            (line, d.severity == Severity::Error)
        })
        .collect()
}

/// Report lines for a JSON block stream
fn check_blocks(
    label: &str,
    content: &str,
    registry: &ProfileRegistry,
) -> Result<Vec<(String, bool)>> {
    let stream =
        parse_stream(content).with_context(|| format!("{} is not a block stream", label))?;
    let profile = registry
        .get_active_profile()
        .context("No active profile")?;

    Ok(validate_stream(&stream, profile)
        .into_iter()
        .map(|error| (format!("{}: {}", label, error), true))
        .collect())
}
