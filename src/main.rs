use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use caseforge::{
    config::AppConfig,
    export,
    generate::client::Generator,
    generate::model::{GenerationOutcome, TestCaseSet},
    rest, AppContext,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "caseforge",
    about = "caseforge — LLM-backed QA test case generation with JSON/CSV/text/Excel export",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// REST API server port
    #[arg(long, env = "CASEFORGE_PORT")]
    port: Option<u16>,

    /// Bind address for the REST server (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "CASEFORGE_BIND")]
    bind_address: Option<String>,

    /// Path to an optional TOML config file
    #[arg(long, env = "CASEFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CASEFORGE_LOG")]
    log: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "CASEFORGE_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server (default when no subcommand given).
    ///
    /// Examples:
    ///   caseforge serve
    ///   caseforge
    Serve,
    /// Generate test cases once and print or write the chosen export.
    ///
    /// Calls the same generation core as the REST API. On a generation
    /// failure the raw model response is printed to stderr for diagnosis.
    ///
    /// Examples:
    ///   caseforge generate "Login form"
    ///   caseforge generate --format csv --out cases.csv "User registration API"
    ///   caseforge generate --format excel --out cases.xlsx "File upload module"
    Generate {
        /// Module / page description to generate test cases for
        module: Vec<String>,
        /// Export format for the output
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Write output to this file instead of stdout (required for excel)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
    Text,
    Excel,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::new(args.port, args.bind_address, args.config, args.log);
    let _log_guard = setup_logging(&config.log, args.log_file.as_deref(), &config.log_format);

    match args.command {
        None | Some(Command::Serve) => serve(config).await,
        Some(Command::Generate {
            module,
            format,
            out,
        }) => generate_once(config, &module.join(" "), format, out).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let generator = build_generator(&config)?;
    let ctx = Arc::new(AppContext {
        config: Arc::new(config),
        generator,
        started_at: std::time::Instant::now(),
    });
    rest::start_rest_server(ctx).await
}

async fn generate_once(
    config: AppConfig,
    module: &str,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    if module.trim().is_empty() {
        anyhow::bail!("module description is required");
    }
    if matches!(format, ExportFormat::Excel) && out.is_none() {
        anyhow::bail!("excel output is binary — pass --out <path>");
    }

    let generator = build_generator(&config)?;
    info!(module, "generating test cases");

    let value = match generator.generate(module).await {
        GenerationOutcome::Success(value) => value,
        GenerationOutcome::Failure(failure) => {
            eprintln!("generation failed: {}", failure.error);
            if !failure.raw_response.is_empty() {
                eprintln!("--- raw response ---\n{}", failure.raw_response);
            }
            std::process::exit(1);
        }
    };

    match format {
        ExportFormat::Json => write_text(export::json::format(&value), out),
        ExportFormat::Csv => {
            let set = TestCaseSet::from_value(&value);
            write_text(export::csv::format(&set), out)
        }
        ExportFormat::Text => {
            let set = TestCaseSet::from_value(&value);
            write_text(export::text::format(&set), out)
        }
        ExportFormat::Excel => {
            let set = TestCaseSet::from_value(&value);
            let bytes = export::xlsx::format(&set)?;
            // Presence of --out was checked before the network call.
            let path = out.context("excel output requires --out")?;
            std::fs::write(&path, bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "excel export written");
            Ok(())
        }
    }
}

fn write_text(data: String, out: Option<PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, data)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "export written");
        }
        None => print!("{data}"),
    }
    Ok(())
}

fn build_generator(config: &AppConfig) -> Result<Generator> {
    let api_key = config.api_key.clone().context(
        "CASEFORGE_API_KEY is not set — the completion provider credential is required",
    )?;
    Generator::new(api_key, config)
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stdout and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format) or
/// `"json"` (structured JSON for log aggregators).
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("caseforge.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        None
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}
