use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tabwriter::TabWriter;
use tracing_subscriber::EnvFilter;

use watch_io::config::{load_or_default, Config};
use watch_io::hashing::fingerprint;
use watch_io::patch::{apply_merge_patch, PatchService, PatchTelemetry, ValidationError, Validator};
use watch_io::prelude::{ConversionError, ErrorBody, Watch};
use watch_io::version::resource_path;
use watch_io::watch_json::{parse_watch_json_str, to_pretty_json};

/// I/O, JSON syntax or configuration problems.
const EXIT_INPUT: i32 = 1;
/// The patched or given watch cannot be decoded or is invalid.
const EXIT_REJECTED: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "watch", version, about = "Watch resource merge-patch CLI")]
struct Cli {
    /// TOML config with `[constraints]` and `[log]` tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge a patch into an arbitrary JSON document (no validation).
    Merge {
        #[arg(long)]
        target: PathBuf,
        #[arg(long)]
        patch: PathBuf,
        /// Print patch telemetry JSON to stderr
        #[arg(long)]
        telemetry_json: bool,
    },
    /// Apply a merge patch to a watch and re-validate it.
    ApplyPatch {
        /// Watch JSON path
        #[arg(long)]
        watch: PathBuf,
        /// Merge patch JSON path
        #[arg(long)]
        patch: PathBuf,
        /// Write the patched watch here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Emit failures as an error body JSON on stderr
        #[arg(long)]
        diagnostics_json: bool,
        /// Print patch telemetry JSON to stderr
        #[arg(long)]
        telemetry_json: bool,
    },
    /// Check a watch against the field constraints.
    Validate {
        watch: PathBuf,
        #[arg(long)]
        diagnostics_json: bool,
    },
    /// Show a watch's fields and fingerprint.
    Inspect { watch: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => fail(EXIT_INPUT, &e.to_string()),
    };
    init_tracing(&config);

    match cli.cmd {
        Command::Merge { target, patch, telemetry_json } => {
            let target = read_json(&target);
            let patch = read_json(&patch);
            let merged = apply_merge_patch(&patch, &target);
            if telemetry_json {
                emit_telemetry(&PatchTelemetry::for_patch("merge", &patch))?;
            }
            println!("{}", serde_json::to_string_pretty(&merged)?);
        }

        Command::ApplyPatch { watch, patch, out, diagnostics_json, telemetry_json } => {
            let current = read_watch(&watch, diagnostics_json)?;
            let patch = read_json(&patch);

            let service = PatchService::new(config.constraints);
            let outcome = service.apply_patch(&patch, &current);
            if telemetry_json {
                emit_telemetry(&PatchTelemetry::for_patch("apply", &patch).with_outcome(&outcome))?;
            }

            match outcome {
                Ok(patched) => {
                    let s = to_pretty_json(&patched)?;
                    match out {
                        Some(path) => fs::write(&path, format!("{s}\n"))?,
                        None => println!("{s}"),
                    }
                }
                Err(e) => {
                    if diagnostics_json {
                        let mut body = ErrorBody::from(&e);
                        if let Some(id) = current.id {
                            body = body.at_path(resource_path(id));
                        }
                        fail(EXIT_REJECTED, &serde_json::to_string_pretty(&body)?);
                    }
                    fail(EXIT_REJECTED, &e.to_string());
                }
            }
        }

        Command::Validate { watch, diagnostics_json } => {
            let w = read_watch(&watch, diagnostics_json)?;
            match ValidationError::from_violations(config.constraints.validate(&w)) {
                None => println!("OK"),
                Some(e) if diagnostics_json => {
                    fail(EXIT_REJECTED, &serde_json::to_string_pretty(&ErrorBody::from(&e))?)
                }
                Some(e) => fail(EXIT_REJECTED, &e.to_string()),
            }
        }

        Command::Inspect { watch } => {
            let w = read_watch(&watch, false)?;
            inspect(&w)?;
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(code: i32, msg: &str) -> ! {
    eprintln!("{msg}");
    process::exit(code);
}

fn read_text(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(EXIT_INPUT, &format!("{}: {e}", path.display())))
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&read_text(path))
        .unwrap_or_else(|e| fail(EXIT_INPUT, &format!("{}: invalid JSON: {e}", path.display())))
}

fn read_watch(path: &Path, diagnostics_json: bool) -> anyhow::Result<Watch> {
    let s = read_text(path);
    let e = match parse_watch_json_str(&s) {
        Ok(w) => return Ok(w),
        Err(e) => e,
    };
    tracing::debug!(path = %path.display(), error = %e, "watch file rejected");
    let code = match e {
        ConversionError::InvalidJson(_) => EXIT_INPUT,
        _ => EXIT_REJECTED,
    };
    if diagnostics_json {
        fail(code, &serde_json::to_string_pretty(&ErrorBody::from(&e))?);
    }
    fail(code, &format!("{}: {e}", path.display()))
}

fn emit_telemetry(t: &PatchTelemetry) -> anyhow::Result<()> {
    eprintln!("{}", serde_json::to_string(t)?);
    Ok(())
}

fn inspect(w: &Watch) -> anyhow::Result<()> {
    let mut tw = TabWriter::new(io::stdout());
    writeln!(tw, "field\tvalue")?;
    writeln!(tw, "id\t{}", w.id.map(|i| i.to_string()).unwrap_or_else(|| "-".into()))?;
    writeln!(tw, "title\t{}", w.title.as_deref().unwrap_or("-"))?;
    writeln!(tw, "price\t{}", w.price.map(|p| p.to_string()).unwrap_or_else(|| "-".into()))?;
    writeln!(tw, "description\t{}", w.description.as_deref().map(preview).unwrap_or_else(|| "-".into()))?;
    writeln!(
        tw,
        "fountain\t{}",
        w.fountain.as_ref().map(|b| format!("{} bytes", b.len())).unwrap_or_else(|| "-".into())
    )?;
    writeln!(tw, "fingerprint\t{}", fingerprint(w)?)?;
    tw.flush()?;
    Ok(())
}

// 60-char bound, with ellipsis when truncated.
fn preview(s: &str) -> String {
    const MAX: usize = 60;
    if s.chars().count() <= MAX {
        return s.to_string();
    }
    let mut out: String = s.chars().take(MAX - 1).collect();
    out.push('…');
    out
}
