#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Raid Roller widget.

mod trophy_store;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use raid_roller_core::{Command as RollCommand, Event, OptionCatalog, SquadSize, WIDGET_TITLE};
use raid_roller_presentation::{seasonal_theme, Acknowledgment, Announcer, Clipboard, Scene};
use raid_roller_session::{self as session, query, Session, SessionConfig};
use raid_roller_system_composer::compose_invite;
use raid_roller_system_trophies::{SortMode, TrophyCatalog};

use crate::trophy_store::TrophyStore;

const TICK: Duration = Duration::from_millis(25);
const MAX_TICKS: u32 = 2_000;

#[derive(Debug, Parser)]
#[command(name = "raid-roller", about = "Squad randomizer for raid drops")]
struct Cli {
    /// Base seed for the roll RNG streams; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Squad size used for the roll.
    #[arg(long, value_enum, default_value = "solo")]
    squad: SquadArg,

    /// TOML file overriding the standard option catalog.
    #[arg(long)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Rolls every category and prints the invite message.
    Roll,
    /// Lists or toggles tracked trophies.
    Trophies {
        /// Path of the trophy log file.
        #[arg(long, default_value = "trophies.json")]
        path: PathBuf,
        /// Trophy identifier to toggle before listing.
        #[arg(long)]
        toggle: Option<String>,
        /// Ordering applied to the printed list.
        #[arg(long, value_enum, default_value = "name")]
        sort: SortArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SquadArg {
    Solo,
    Duo,
    Trio,
}

impl From<SquadArg> for SquadSize {
    fn from(value: SquadArg) -> Self {
        match value {
            SquadArg::Solo => Self::Solo,
            SquadArg::Duo => Self::Duo,
            SquadArg::Trio => Self::Trio,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Name,
    Tracked,
}

impl From<SortArg> for SortMode {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => Self::Name,
            SortArg::Tracked => Self::TrackedFirst,
        }
    }
}

/// Entry point for the Raid Roller command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        None | Some(CliCommand::Roll) => run_roll(&cli),
        Some(CliCommand::Trophies { path, toggle, sort }) => {
            run_trophies(path, toggle.as_deref(), (*sort).into())
        }
    }
}

fn run_roll(cli: &Cli) -> Result<()> {
    let catalog = load_catalog(cli.options.as_deref())?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    let squad_size = SquadSize::from(cli.squad);

    let mut session = Session::new(SessionConfig::new(catalog, seed));
    let mut scene = Scene::new(SquadSize::Solo);
    let today = chrono::Local::now();
    scene.set_seasonal(seasonal_theme(today.month(), today.day()));
    let mut announcer = StdoutAnnouncer;

    println!("{WIDGET_TITLE} (seed {seed})");
    if let Some(theme) = scene.seasonal() {
        println!("{}", theme.banner());
    }

    let _ = dispatch(
        &mut session,
        RollCommand::SelectSquadSize { size: squad_size },
        &mut scene,
        &mut announcer,
    );
    let _ = dispatch(&mut session, RollCommand::RollAll, &mut scene, &mut announcer);

    let mut completed = false;
    for _ in 0..MAX_TICKS {
        let events = dispatch(
            &mut session,
            RollCommand::Tick { dt: TICK },
            &mut scene,
            &mut announcer,
        );
        if events
            .iter()
            .any(|event| matches!(event, Event::RollCompleted))
        {
            completed = true;
            break;
        }
    }
    if !completed {
        bail!("roll animation did not complete within the tick budget");
    }

    println!("squad: {}", scene.squad_size().label());
    for row in scene.slot_rows() {
        println!("  {:<13} {}", row.category.label(), row.text);
    }

    let view = query::invite_view(&session)
        .context("roll completed but the session is still busy")?;
    let message = compose_invite(&view)?;

    let mut clipboard = EchoClipboard;
    scene.report_copy(clipboard.write(&message).is_ok());
    match scene.acknowledgment() {
        Acknowledgment::Copied { .. } => println!("invite copied - share it with your squad"),
        Acknowledgment::Failed { .. } => println!("copy failed - grab the message above manually"),
        Acknowledgment::Idle => {}
    }
    Ok(())
}

fn run_trophies(path: &Path, toggle: Option<&str>, sort: SortMode) -> Result<()> {
    let store = TrophyStore::new(path.to_owned());
    let mut log = store.load();

    if let Some(id) = toggle {
        if log.toggle(id) {
            println!("now tracking {id}");
        } else {
            println!("stopped tracking {id}");
        }
        store.save(&log)?;
    }

    let catalog = TrophyCatalog::standard();
    for entry in log.sorted_entries(&catalog, sort) {
        let marker = if entry.tracked { "x" } else { " " };
        println!(
            "  [{marker}] {:<12} {}",
            entry.definition.id(),
            entry.definition.name()
        );
    }
    Ok(())
}

/// Applies one command, forwards announcement requests, and updates the scene.
fn dispatch(
    session: &mut Session,
    command: RollCommand,
    scene: &mut Scene,
    announcer: &mut dyn Announcer,
) -> Vec<Event> {
    let mut events = Vec::new();
    session::apply(session, command, &mut events);
    for event in &events {
        if matches!(event, Event::AnnouncementRequested) {
            announcer.announce();
        }
    }
    scene.handle(&events);
    events
}

fn load_catalog(path: Option<&Path>) -> Result<OptionCatalog> {
    let Some(path) = path else {
        return Ok(OptionCatalog::standard());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read option catalog at {}", path.display()))?;
    let catalog = toml::from_str(&contents).context("failed to parse option catalog toml contents")?;
    Ok(catalog)
}

/// Announcer that speaks through stdout.
struct StdoutAnnouncer;

impl Announcer for StdoutAnnouncer {
    fn announce(&mut self) {
        println!("* announcer: dropping in, good luck raiders *");
    }
}

/// Clipboard that prints the copied text so the user can grab it manually.
struct EchoClipboard;

impl Clipboard for EchoClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}
