//! Revelion CLI - manage the party planner from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (and log in)
//! rv-cli account register Ana 1111
//!
//! # Answer the invitation for the active event
//! rv-cli rsvp submit --status confirmed --guest Ion --guest Radu
//!
//! # Queue a song
//! rv-cli music add "https://youtu.be/dQw4w9WgXcQ"
//!
//! # Unlock the dashboard and show statistics
//! rv-cli admin unlock 1234
//! rv-cli admin stats --event christmas
//! ```
//!
//! # Commands
//!
//! - `account` - Register, log in, and manage accounts
//! - `rsvp` - Submit and review RSVPs
//! - `shop` - Shared shopping list
//! - `music` - Collaborative music queue
//! - `config` - Event configuration (dashboard only)
//! - `admin` - Dashboard unlock and statistics
//!
//! Data lives under `REVELION_DATA_DIR` (default `./data`); see
//! `revelion_planner::config` for the other variables. Set `REVELION_LOG_JSON`
//! for JSON log lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use revelion_core::{EventMode, RsvpStatus};
use revelion_planner::Planner;
use revelion_planner::config::PlannerConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "rv-cli")]
#[command(author, version, about = "Revelion party planner CLI")]
struct Cli {
    /// Data directory (overrides `REVELION_DATA_DIR`; session goes under `<dir>/session`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register, log in, and manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Submit and review RSVPs
    Rsvp {
        #[command(subcommand)]
        action: RsvpAction,
    },
    /// Shared shopping list
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Collaborative music queue
    Music {
        #[command(subcommand)]
        action: MusicAction,
    },
    /// Event configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Dashboard unlock and statistics
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account and log in
    Register { name: String, pin: String },
    /// Log in by name and PIN
    Login { name: String, pin: String },
    /// End the session
    Logout,
    /// Show the active account
    Whoami,
    /// List accounts (dashboard only)
    List,
    /// Delete an account (dashboard only)
    Delete { id: String },
}

#[derive(Subcommand)]
enum RsvpAction {
    /// Create or update an RSVP
    Submit(SubmitArgs),
    /// List RSVPs for an event
    List {
        /// Event (`christmas` or `newyear`); defaults to the active mode
        #[arg(short, long)]
        event: Option<EventMode>,
    },
    /// Delete an RSVP (dashboard only)
    Remove { id: String },
}

#[derive(Args)]
struct SubmitArgs {
    /// Name on the RSVP; defaults to the active account's name
    #[arg(short, long)]
    name: Option<String>,

    /// `confirmed`, `maybe` or `declined`
    #[arg(short, long, default_value = "confirmed")]
    status: RsvpStatus,

    /// Event; defaults to the active mode
    #[arg(short, long)]
    event: Option<EventMode>,

    /// Dietary notes
    #[arg(short, long)]
    dietary: Option<String>,

    /// Guest name (repeatable)
    #[arg(short, long = "guest")]
    guests: Vec<String>,

    /// Remove all guests from an existing RSVP
    #[arg(long, conflicts_with = "guests")]
    no_guests: bool,
}

#[derive(Subcommand)]
enum ShopAction {
    /// Add an item
    Add { name: String },
    /// Claim an item
    Claim {
        id: String,
        /// Name to claim under; defaults to the active account's name
        #[arg(long = "as")]
        claimant: Option<String>,
    },
    /// Release a claim
    Release { id: String },
    /// Toggle the bought flag
    Check { id: String },
    /// Delete an item you added
    Remove { id: String },
    /// Show the list
    List,
}

#[derive(Subcommand)]
enum MusicAction {
    /// Queue a video link
    Add { url: String },
    /// Toggle your vote on a song
    Vote { id: String },
    /// Delete a song you added
    Remove { id: String },
    /// Show the queue
    List,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the configuration
    Show,
    /// Switch the active event
    Mode { mode: EventMode },
    /// Edit an event's location
    Location(LocationArgs),
    /// Replace the house rules
    Rules { text: String },
    /// Replace the shared playlist link
    Playlist { url: String },
    /// Edit the message shown after an RSVP with the given status
    Message {
        /// `confirmed`, `maybe` or `declined`
        status: RsvpStatus,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Change the dashboard password
    Password { password: String },
}

#[derive(Args)]
struct LocationArgs {
    /// Event to edit; defaults to the active mode
    #[arg(short, long)]
    event: Option<EventMode>,
    #[arg(long)]
    venue: Option<String>,
    #[arg(long)]
    lat: Option<String>,
    #[arg(long)]
    lng: Option<String>,
    /// Start time as `YYYY-MM-DDTHH:MM`
    #[arg(long)]
    date: Option<String>,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Unlock the dashboard for this session
    Unlock { password: String },
    /// Lock the dashboard
    Lock,
    /// Show dashboard statistics
    Stats {
        /// Event for the guest list; defaults to the active mode
        #[arg(short, long)]
        event: Option<EventMode>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env first so RUST_LOG can come from it
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rv_cli=info,revelion_planner=warn".into());

    // JSON lines when REVELION_LOG_JSON is set, plain text otherwise
    let is_json = std::env::var("REVELION_LOG_JSON").is_ok();
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = PlannerConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.session_dir = dir.join("session");
        config.data_dir = dir;
    }
    let mut planner = Planner::from_config(&config)?;
    let planner = &mut planner;

    match cli.command {
        Commands::Account { action } => match action {
            AccountAction::Register { name, pin } => {
                commands::account::register(planner, &name, &pin)?;
            }
            AccountAction::Login { name, pin } => commands::account::login(planner, &name, &pin)?,
            AccountAction::Logout => commands::account::logout(planner)?,
            AccountAction::Whoami => commands::account::whoami(planner)?,
            AccountAction::List => commands::account::list(planner)?,
            AccountAction::Delete { id } => commands::account::delete(planner, &id)?,
        },
        Commands::Rsvp { action } => match action {
            RsvpAction::Submit(args) => commands::rsvp::submit(
                planner,
                commands::rsvp::Submit {
                    name: args.name,
                    status: args.status,
                    event: args.event,
                    dietary: args.dietary,
                    guests: (args.no_guests || !args.guests.is_empty()).then_some(args.guests),
                },
            )?,
            RsvpAction::List { event } => commands::rsvp::list(planner, event),
            RsvpAction::Remove { id } => commands::rsvp::remove(planner, &id)?,
        },
        Commands::Shop { action } => match action {
            ShopAction::Add { name } => commands::shop::add(planner, &name)?,
            ShopAction::Claim { id, claimant } => {
                commands::shop::claim(planner, &id, claimant.as_deref())?;
            }
            ShopAction::Release { id } => commands::shop::release(planner, &id)?,
            ShopAction::Check { id } => commands::shop::check(planner, &id)?,
            ShopAction::Remove { id } => commands::shop::remove(planner, &id)?,
            ShopAction::List => commands::shop::list(planner),
        },
        Commands::Music { action } => match action {
            MusicAction::Add { url } => commands::music::add(planner, &url).await?,
            MusicAction::Vote { id } => commands::music::vote(planner, &id)?,
            MusicAction::Remove { id } => commands::music::remove(planner, &id)?,
            MusicAction::List => commands::music::list(planner),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(planner),
            ConfigAction::Mode { mode } => commands::config::set_mode(planner, mode)?,
            ConfigAction::Location(args) => commands::config::set_location(
                planner,
                args.event,
                revelion_planner::models::LocationPatch {
                    venue_name: args.venue,
                    lat: args.lat,
                    lng: args.lng,
                    date: args.date,
                },
            )?,
            ConfigAction::Rules { text } => commands::config::set_rules(planner, text)?,
            ConfigAction::Playlist { url } => commands::config::set_playlist(planner, url)?,
            ConfigAction::Message {
                status,
                title,
                message,
            } => commands::config::set_message(planner, status, title, message)?,
            ConfigAction::Password { password } => {
                commands::config::set_password(planner, password)?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Unlock { password } => commands::admin::unlock(planner, &password)?,
            AdminAction::Lock => commands::admin::lock(planner)?,
            AdminAction::Stats { event } => commands::admin::stats(planner, event)?,
        },
    }
    Ok(())
}
