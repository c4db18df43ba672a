use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use ezsessions_auditlog::{AuditLogReader, SessionEntry};
use ezsessions_core::{Diagnostics, SessionsReader, UserSession};
use ezsessions_logging::LogFormat;
use ezsessions_terminate::{CommandTerminator, TerminationResult, Terminator, DEFAULT_BINARY_NAME};

mod config;

use config::ProjectConfig;

#[derive(Parser, Debug)]
#[command(
    name = "ezsessions",
    about = "Find and terminate active EZproxy user sessions",
    version
)]
struct Cli {
    /// Path to config file (default: ./ezsessions.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// EZproxy audit log to read (e.g. audit/20200524.txt)
    #[arg(short = 'f', long, global = true)]
    audit_log: Option<PathBuf>,

    /// Seconds to wait before each search attempt
    #[arg(long, global = true, allow_negative_numbers = true)]
    search_delay: Option<i64>,

    /// Extra search attempts while no sessions are found
    #[arg(long, global = true, allow_negative_numbers = true)]
    search_retries: Option<i64>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormatChoice>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List active sessions
    List {
        /// Only sessions for this username (case-insensitive)
        #[arg(short, long)]
        user: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the audit log entries behind each active session
    Entries {
        /// Only entries for this username (case-insensitive)
        #[arg(short, long)]
        user: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Terminate every active session of a user
    Kill {
        /// Username whose sessions should be terminated
        #[arg(short, long)]
        user: String,

        /// Path to the EZproxy executable
        #[arg(long)]
        ezproxy: Option<PathBuf>,

        /// Show the sessions that would be terminated without terminating them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = ProjectConfig::discover(cli.config.as_deref(), &working_dir)?;

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.logging.level.clone())
        .unwrap_or_else(|| "warn".to_string());
    let log_format = match (cli.log_format, config.logging.format.as_deref()) {
        (Some(choice), _) => choice.into(),
        (None, Some(name)) => name.parse::<LogFormat>().map_err(anyhow::Error::msg)?,
        (None, None) => LogFormat::default(),
    };
    let log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    let _log_guard = ezsessions_logging::init_tracing(&log_level, log_format, log_file.as_deref())
        .context("Failed to initialize logging")?;

    let diagnostics = Diagnostics::global();

    let audit_log = cli
        .audit_log
        .clone()
        .or_else(|| config.audit_log.clone())
        .context("No audit log given. Use --audit-log or set audit_log in ezsessions.toml")?;
    let settings = config
        .search_settings(cli.search_delay, cli.search_retries)
        .context("Invalid search settings")?;

    let reader = AuditLogReader::new(audit_log)
        .context("Invalid audit log path")?
        .with_settings(settings)
        .with_diagnostics(diagnostics.clone());

    match cli.command {
        Commands::List { user, json } => {
            let mut sessions = match user.as_deref() {
                Some(user) => reader.user_sessions(user),
                None => reader.all_user_sessions(),
            }
            .with_context(|| format!("Failed to read sessions from {}", reader.path().display()))?;
            sort_sessions(&mut sessions);

            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else {
                print_sessions(&sessions);
            }
        }
        Commands::Entries { user, json } => {
            let mut entries = reader
                .session_entries(user.as_deref())
                .with_context(|| format!("Failed to read entries from {}", reader.path().display()))?;
            entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_entries(&entries);
            }
        }
        Commands::Kill {
            user,
            ezproxy,
            dry_run,
            json,
        } => {
            let mut sessions = reader
                .user_sessions(&user)
                .with_context(|| format!("Failed to read sessions for {}", user))?;
            sort_sessions(&mut sessions);

            if sessions.is_empty() {
                eprintln!("No active sessions found for {}", user.bold());
                return Ok(());
            }

            if dry_run {
                println!("=== Dry Run ===");
                print_sessions(&sessions);
                return Ok(());
            }

            let executable = ezproxy
                .or_else(|| config.ezproxy_binary.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY_NAME));
            let results = CommandTerminator::new(executable)
                .with_diagnostics(diagnostics)
                .terminate(&sessions);

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }

            let failed = results.iter().filter(|r| !r.success()).count();
            if failed > 0 {
                anyhow::bail!("{} of {} sessions could not be terminated", failed, results.len());
            }
        }
    }

    Ok(())
}

fn sort_sessions(sessions: &mut [UserSession]) {
    sessions.sort_by(|a, b| {
        a.username
            .to_lowercase()
            .cmp(&b.username.to_lowercase())
            .then_with(|| a.session_id.cmp(&b.session_id))
    });
}

fn print_sessions(sessions: &[UserSession]) {
    if sessions.is_empty() {
        eprintln!("{}", "No active sessions found".dimmed());
        return;
    }

    println!(
        "{:<20} {:<18} {}",
        "USERNAME".bold(),
        "SESSION".bold(),
        "IP ADDRESS".bold()
    );
    for session in sessions {
        println!(
            "{:<20} {:<18} {}",
            session.username, session.session_id, session.ip_address
        );
    }
    eprintln!("{}", format!("{} active session(s)", sessions.len()).dimmed());
}

fn print_entries(entries: &[SessionEntry]) {
    if entries.is_empty() {
        eprintln!("{}", "No active session entries found".dimmed());
        return;
    }

    for entry in entries {
        println!(
            "{}  {:<22} {:<20} {:<18} {}",
            entry.timestamp.dimmed(),
            entry.kind.to_string().cyan(),
            entry.username,
            entry.session_id,
            entry.ip_address
        );
    }
}

fn print_results(results: &[TerminationResult]) {
    for result in results {
        let status = if result.success() {
            "ok".bright_green()
        } else {
            "failed".bright_red()
        };
        println!(
            "{} {} ({})",
            status,
            result.session_id,
            result.outcome().to_string().dimmed()
        );

        let output = result.combined_output();
        if !output.is_empty() {
            println!("    {}", output.replace('\n', "\n    "));
        }
        if let Some(error) = &result.error {
            println!("    {}", error.to_string().red());
        }
    }
}
