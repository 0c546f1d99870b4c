use activity_pattern::{ClockMode, JitterMode, PatternError, PatternOptions, PlacementMode};
use activity_protocol::ProtocolError;
use activity_writer::WriterError;
use anyhow::{Context as AnyhowContext, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::env;
use std::io;
use std::path::PathBuf;

use crate::flags::IntensityFlag;

mod command;
mod flags;
mod render;

/// Pins the date used as "today" (YYYY-MM-DD)
pub const TODAY_ENV: &str = "ACTIVITY_TODAY";

pub(crate) fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "activity")]
#[command(about = "Draw a message on the contribution activity graph", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repository to write into
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show where the message lands, without touching the repository
    #[command(visible_alias = "p")]
    Preview(PreviewArgs),

    /// Generate the pattern (initializes the repository if needed)
    #[command(visible_aliases = ["c", "generate"])]
    Create(PatternArgs),

    /// Rebuild history with a new message, centered in the current window
    #[command(visible_alias = "swap")]
    Replace(PatternArgs),

    /// Regenerate the last pattern so it is centered on today's window
    #[command(visible_alias = "r")]
    Refresh(RefreshArgs),

    /// Show the saved configuration and repository state
    #[command(visible_alias = "s")]
    Status(StatusArgs),

    /// Show the current 53-week display window
    #[command(visible_alias = "w")]
    Window(WindowArgs),

    /// Interactive guided setup
    Setup(SetupArgs),

    /// List recommended messages and intensity levels
    #[command(visible_aliases = ["list", "v"])]
    Versions(VersionsArgs),
}

#[derive(Args, Clone, Default)]
pub(crate) struct JitterArgs {
    /// Seed for reproducible commit times
    #[arg(long, conflicts_with = "even_spread")]
    seed: Option<u64>,

    /// Spread commits evenly over each day, without randomness
    #[arg(long)]
    even_spread: bool,
}

impl JitterArgs {
    pub(crate) fn mode(&self) -> JitterMode {
        match (self.seed, self.even_spread) {
            (_, true) => JitterMode::Even,
            (Some(seed), false) => JitterMode::Seeded(seed),
            (None, false) => JitterMode::Random,
        }
    }
}

#[derive(Args, Clone)]
pub(crate) struct PatternArgs {
    /// Message to draw: A-Z, 0-9, space and ! . - ? + #
    message: String,

    /// Commits per active day level
    #[arg(long, value_enum)]
    intensity: Option<IntensityFlag>,

    /// Exact commits per active day (overrides --intensity)
    #[arg(long, value_name = "N")]
    commits: Option<u32>,

    /// Start at the left edge of the window instead of centering
    #[arg(long)]
    no_center: bool,

    /// Rebuild history from scratch and allow messages wider than the window
    #[arg(short = 'f', long)]
    force_replace: bool,

    /// Record refresh dates so the message can be kept in view
    #[arg(short = 'k', long)]
    keep_in_view: bool,

    /// Use UTC dates instead of local time
    #[arg(long)]
    use_utc: bool,

    /// Explicit first column (moved back to its Sunday)
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    /// Plan and preview only
    #[arg(short = 'd', long)]
    dry_run: bool,

    #[command(flatten)]
    jitter: JitterArgs,
}

impl PatternArgs {
    pub(crate) fn options(&self) -> PatternOptions {
        PatternOptions {
            intensity: self
                .intensity
                .map(IntensityFlag::as_domain)
                .unwrap_or_default(),
            commits_per_day: self.commits,
            placement: if self.no_center {
                PlacementMode::LeftAligned
            } else {
                PlacementMode::Centered
            },
            force_replace: self.force_replace,
            keep_in_view: self.keep_in_view,
            clock: clock_for(self.use_utc),
            start_date: self.start_date,
            dry_run: self.dry_run,
            jitter: self.jitter.mode(),
        }
    }
}

#[derive(Args)]
struct PreviewArgs {
    #[command(flatten)]
    pattern: PatternArgs,

    /// Print the preview as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RefreshArgs {
    /// Plan and preview only
    #[arg(short = 'd', long)]
    dry_run: bool,

    #[command(flatten)]
    jitter: JitterArgs,
}

#[derive(Args)]
struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct WindowArgs {
    /// Use UTC dates instead of local time
    #[arg(long)]
    use_utc: bool,

    /// Print the window as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SetupArgs {
    #[command(flatten)]
    jitter: JitterArgs,
}

#[derive(Args)]
struct VersionsArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) fn clock_for(use_utc: bool) -> ClockMode {
    if use_utc {
        ClockMode::Utc
    } else {
        ClockMode::Local
    }
}

/// Today's date in the given clock, unless pinned through `ACTIVITY_TODAY`.
pub(crate) fn resolve_today(clock: ClockMode) -> Result<NaiveDate> {
    match env::var(TODAY_ENV) {
        Ok(raw) if !raw.trim().is_empty() => {
            let today = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| PatternError::InvalidDate(raw.clone()))
                .with_context(|| format!("Failed to parse {TODAY_ENV}"))?;
            log::debug!("Using pinned date {today}");
            Ok(today)
        }
        _ => Ok(clock.today()),
    }
}

/// Remediation for errors the user can act on.
fn hint_for(err: &anyhow::Error) -> Option<String> {
    for cause in err.chain() {
        if let Some(pattern) = cause.downcast_ref::<PatternError>() {
            return match pattern {
                PatternError::MessageTooWide { .. } => Some(
                    "Shorten the message, or pass --force-replace to draw it from the left edge anyway"
                        .to_string(),
                ),
                PatternError::EmptyMessage => Some(
                    "Supported characters are A-Z, 0-9, space and ! . - ? + #".to_string(),
                ),
                PatternError::InvalidCommitsPerDay(_) => {
                    Some("--commits must be at least 1".to_string())
                }
                PatternError::InvalidDate(_) => Some("Dates use the YYYY-MM-DD format".to_string()),
                _ => None,
            };
        }
        if let Some(protocol) = cause.downcast_ref::<ProtocolError>() {
            return match protocol {
                ProtocolError::MissingConfiguration { .. } => Some(
                    "Run `activity create <MESSAGE>` first (see `activity versions` for ideas)"
                        .to_string(),
                ),
                ProtocolError::Serialization(_) | ProtocolError::InvalidSnapshot(_) => Some(
                    "Re-create the pattern with `activity replace <MESSAGE>`".to_string(),
                ),
                ProtocolError::Io { .. } => None,
            };
        }
        if let Some(writer) = cause.downcast_ref::<WriterError>() {
            let partial = match writer {
                WriterError::Aborted { created, .. } => Some(*created),
                _ => None,
            };
            let base = match writer.root() {
                WriterError::Spawn { .. } => "Make sure git is installed and on PATH",
                WriterError::CommandFailed { command, .. } if command.starts_with("git commit") => {
                    "Check that git user.name and user.email are configured"
                }
                _ => "Inspect the repository with `git status`",
            };
            return Some(match partial {
                Some(created) => format!(
                    "{base}; {created} commits were written, run `activity replace <MESSAGE>` to start over"
                ),
                None => base.to_string(),
            });
        }
    }
    None
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // --json keeps stdout clean for parsing
    let json_output = match &cli.command {
        Commands::Preview(args) => args.json,
        Commands::Status(args) => args.json,
        Commands::Window(args) => args.json,
        Commands::Versions(args) => args.json,
        _ => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        if let Some(hint) = hint_for(&err) {
            eprintln!("Hint: {hint}");
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let repo = cli.repo;
    let quiet = cli.quiet;
    match cli.command {
        Commands::Preview(args) => command::preview(&args.pattern, args.json),
        Commands::Create(args) => command::create(&repo, &args, quiet).await,
        Commands::Replace(args) => command::replace(&repo, &args, quiet).await,
        Commands::Refresh(args) => {
            command::refresh(&repo, args.dry_run, &args.jitter, quiet).await
        }
        Commands::Status(args) => command::status(&repo, args.json).await,
        Commands::Window(args) => command::window(clock_for(args.use_utc), args.json),
        Commands::Setup(args) => command::setup(&repo, &args.jitter, quiet).await,
        Commands::Versions(args) => command::versions(args.json),
    }
}
