use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use worklogd::config::Config;
use worklogd::pipeline;
use worklogd::report::Period;
use worklogd::rest;
use worklogd::AppContext;

#[derive(Parser)]
#[command(
    name = "worklogd",
    about = "Work-log backend — extracts tasks from free-text updates and files them into a Zoho sheet",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port
    #[arg(long, env = "WORKLOG_PORT")]
    port: Option<u16>,

    /// Bind address for the HTTP server (default: 0.0.0.0)
    #[arg(long, env = "WORKLOG_BIND")]
    bind_address: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "WORKLOG_LOG")]
    log: Option<String>,

    /// Log output format: "pretty" (default) | "json"
    #[arg(long, env = "WORKLOG_LOG_FORMAT")]
    log_format: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "WORKLOG_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,

    /// Path to the TOML config file
    #[arg(long, env = "WORKLOG_CONFIG", default_value = "config.toml")]
    config: std::path::PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default when no subcommand given).
    Serve,
    /// Log one work update from the command line and print the store's ack.
    ///
    /// Example:
    ///   worklogd log --user Alice "Fixed API latency issue, reviewed PR #112."
    Log {
        /// User the update belongs to
        #[arg(long)]
        user: String,
        /// Free-text work update
        message: String,
        /// Explicit Date cell value (default: current local time)
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Build and print a one-sentence report of a user's recorded tasks.
    ///
    /// Example:
    ///   worklogd report --user Bob --period today
    Report {
        /// User to report on
        #[arg(long)]
        user: String,
        /// "today" or "all"
        #[arg(long, default_value = "all")]
        period: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::new(
        args.port,
        args.bind_address,
        args.log,
        args.log_format,
        &args.config,
    );
    let _log_guard = setup_logging(&config.log, args.log_file.as_deref(), &config.log_format);

    match args.command {
        Some(Command::Log { user, message, timestamp }) => {
            let ctx = AppContext::new(config)?;
            let ack = pipeline::log_message(&ctx, &user, &message, timestamp.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&ack)?);
            Ok(())
        }
        Some(Command::Report { user, period }) => {
            let ctx = AppContext::new(config)?;
            let report = pipeline::build_report(&ctx, &user, Period::parse(&period)).await?;
            println!("{report}");
            Ok(())
        }
        Some(Command::Serve) | None => run_server(config).await,
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        worksheet = %config.worksheet_name,
        "worklogd starting"
    );
    for name in config.missing_credentials() {
        warn!("{name} is not set — calls depending on it will fail");
    }

    let ctx = AppContext::new(config)?;
    rest::start_server(ctx).await
}

/// Initialise the tracing subscriber.
///
/// Stdout always; additionally a daily-rolling file when `log_file` is set.
/// Returns the appender guard in that case — dropping it stops the
/// background writer, so it must live as long as main. An uncreatable log
/// directory degrades to stdout-only rather than aborting startup.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    let file = log_file.and_then(|path| {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let name = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("worklogd.log"));
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e} — logging to stdout only",
                dir.display()
            );
            return None;
        }
        Some(tracing_appender::non_blocking(
            tracing_appender::rolling::daily(dir, name),
        ))
    });

    let Some((writer, guard)) = file else {
        if use_json {
            tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        } else {
            tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        }
        return None;
    };

    let registry = tracing_subscriber::registry().with(EnvFilter::new(log_level));
    if use_json {
        registry
            .with(fmt::layer().json())
            .with(fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(fmt::layer().compact())
            .with(fmt::layer().with_writer(writer))
            .init();
    }
    Some(guard)
}
