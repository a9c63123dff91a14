//! userlens - send analytics events to Userlens from the command line
//!
//! Thin front end over `userlens-core` for shell scripts and deploy hooks:
//! - `identify` a user with traits
//! - `track` an event for a user
//! - `group` a user into an account
//! - `config` to inspect the resolved configuration
//!
//! Settings come from `$XDG_CONFIG_HOME/userlens/config.toml`
//! (~/.config/userlens/config.toml), overridden by flags. The write code can
//! also be supplied through `USERLENS_WRITE_CODE`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use userlens_core::{Config, SyncEventTracker, TrackerConfig, Traits};

#[derive(Parser)]
#[command(name = "userlens")]
#[command(about = "Send analytics events to Userlens")]
#[command(version)]
struct Args {
    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write code identifying the destination workspace
    #[arg(long, env = "USERLENS_WRITE_CODE", hide_env_values = true, global = true)]
    write_code: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Ingestion base URL
    #[arg(long, global = true)]
    ingestor_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Associate a user with traits
    Identify {
        /// User identifier
        user_id: String,

        /// Traits as a JSON object, e.g. '{"plan":"pro"}'
        #[arg(long)]
        traits: Option<String>,
    },

    /// Record an event for a user
    Track {
        /// User identifier
        user_id: String,

        /// Event name
        event: String,

        /// Traits forwarded with the follow-up identify
        #[arg(long)]
        traits: Option<String>,
    },

    /// Associate a group (account, company) with traits
    Group {
        /// Group identifier
        group_id: String,

        /// Member user to attach to the group
        #[arg(long)]
        user_id: Option<String>,

        /// Group traits as a JSON object
        #[arg(long)]
        traits: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    let _log_guard =
        userlens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let tracker_config = apply_overrides(config.tracker, &args);

    match &args.command {
        Command::Config => {
            cmd_config(&tracker_config);
            Ok(())
        }
        Command::Identify { user_id, traits } => {
            let tracker = build_tracker(tracker_config)?;
            let traits = parse_traits(traits.as_deref())?;
            report("identify", tracker.identify(user_id, traits.as_ref()))
        }
        Command::Track {
            user_id,
            event,
            traits,
        } => {
            let tracker = build_tracker(tracker_config)?;
            let traits = parse_traits(traits.as_deref())?;
            report("track", tracker.track(user_id, event, traits.as_ref()))
        }
        Command::Group {
            group_id,
            user_id,
            traits,
        } => {
            let tracker = build_tracker(tracker_config)?;
            let traits = parse_traits(traits.as_deref())?;
            report(
                "group",
                tracker.group(group_id, user_id.as_deref(), traits.as_ref()),
            )
        }
    }
}

/// Layer command-line flags over the file configuration
fn apply_overrides(mut tracker: TrackerConfig, args: &Args) -> TrackerConfig {
    if let Some(write_code) = &args.write_code {
        tracker.write_code = Some(write_code.clone());
    }
    if let Some(timeout) = args.timeout {
        tracker.requests_timeout = timeout;
    }
    if let Some(url) = &args.ingestor_url {
        tracker.ingestor_url = url.clone();
    }
    tracker
}

fn build_tracker(config: TrackerConfig) -> Result<SyncEventTracker> {
    SyncEventTracker::from_config(config).context("invalid tracker configuration")
}

/// Parse `--traits`; anything other than a JSON object is dropped
fn parse_traits(raw: Option<&str>) -> Result<Option<Traits>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let value: serde_json::Value =
        serde_json::from_str(raw).context("--traits must be valid JSON")?;

    match value {
        serde_json::Value::Object(map) => Ok(Some(map)),
        other => {
            tracing::warn!(traits = %other, "traits must be a JSON object, omitting them");
            Ok(None)
        }
    }
}

fn report(kind: &str, outcome: Option<&'static str>) -> Result<()> {
    match outcome {
        Some(message) => {
            println!("{}", message);
            Ok(())
        }
        None => bail!("{} event was not delivered (see log output above)", kind),
    }
}

fn cmd_config(tracker: &TrackerConfig) {
    println!("Userlens Configuration");
    println!("======================");
    println!();
    println!("Config File:     {}", Config::config_path().display());
    println!(
        "Write Code:      {}",
        if tracker.write_code.as_deref().is_some_and(|c| !c.is_empty()) {
            "<set>"
        } else {
            "<not set>"
        }
    );
    println!("Timeout:         {}s", tracker.requests_timeout);
    println!("Ingestor URL:    {}", tracker.ingestor_url);
    println!("Source:          {}", tracker.source);

    println!();
    match tracker.validate() {
        Ok(()) => println!("Status: Ready to send events"),
        Err(e) => println!("Status: Not ready ({})", e),
    }
}
